use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;

use tg_boundary::Place;

use crate::{
    error::Error,
    gateways::{DirectoryGateway, PlaceQuery},
};

/// The city this deployment is scoped to.
pub const CITY: &str = "Surat";

/// Lowercase substrings that identify a local place-name search.
const LOCAL_PLACE_HINTS: &[&str] = &["surat", "dumas", "nanpura", "adajan", "vesu"];

/// Free-text queries longer than this must contain one of the local
/// hints, otherwise they are rejected without a request.
const MAX_UNMATCHED_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Default)]
struct FeedFilter {
    category: Option<String>,
    search: Option<String>,
}

/// What happened to one `refresh` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the visible list.
    Applied,
    /// A newer request was issued while this one was in flight; its
    /// response was discarded.
    Superseded,
    /// The first load after startup failed. An empty feed at cold start
    /// is expected, so the failure is not surfaced.
    Suppressed,
}

/// Owns the visible list of approved places and the active filter.
///
/// All mutating operations re-derive the list from the server; the
/// completion of the most recently issued request wins, regardless of
/// the order in which responses arrive.
pub struct PlaceFeed<G> {
    gateway: G,
    filter: Mutex<FeedFilter>,
    places: Mutex<Vec<Place>>,
    issued: AtomicU64,
    loaded_once: AtomicBool,
}

impl<G: DirectoryGateway> PlaceFeed<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            filter: Mutex::new(FeedFilter::default()),
            places: Mutex::new(Vec::new()),
            issued: AtomicU64::new(0),
            loaded_once: AtomicBool::new(false),
        }
    }

    /// Snapshot of the currently visible places.
    #[must_use]
    pub fn places(&self) -> Vec<Place> {
        self.places.lock().clone()
    }

    #[must_use]
    pub fn active_category(&self) -> Option<String> {
        self.filter.lock().category.clone()
    }

    /// Re-derives the visible list with the active filter.
    ///
    /// Unapproved places are filtered out even if the backend returns
    /// them. On failure the previous list is left untouched.
    pub async fn refresh(&self) -> Result<RefreshOutcome, Error> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let filter = self.filter.lock();
            PlaceQuery {
                category: filter.category.clone(),
                search: filter.search.clone(),
                city: Some(CITY.to_string()),
            }
        };
        let outcome = self.gateway.places(&query).await;
        if seq != self.issued.load(Ordering::SeqCst) {
            log::debug!("Discarding stale place list response #{seq}");
            return Ok(RefreshOutcome::Superseded);
        }
        let first_load = !self.loaded_once.swap(true, Ordering::SeqCst);
        match outcome.into_result() {
            Ok(list) => {
                let total = list.len();
                let approved: Vec<_> = list.into_iter().filter(|p| p.is_approved).collect();
                log::debug!("Loaded {total} places, {} approved", approved.len());
                *self.places.lock() = approved;
                Ok(RefreshOutcome::Applied)
            }
            Err(err) if first_load => {
                log::debug!("Suppressing feed error on first load: {err}");
                Ok(RefreshOutcome::Suppressed)
            }
            Err(err) => Err(err),
        }
    }

    /// Sets or clears the category filter and reloads.
    pub async fn set_category(&self, category: Option<String>) -> Result<RefreshOutcome, Error> {
        self.filter.lock().category = category;
        self.refresh().await
    }

    /// Applies a free-text search. The directory only covers one city,
    /// so a query that clearly looks beyond it is rejected locally.
    pub async fn search(&self, text: &str) -> Result<RefreshOutcome, Error> {
        let text = text.trim();
        if text.is_empty() {
            return self.clear_search().await;
        }
        if !is_local_query(text) && text.len() > MAX_UNMATCHED_QUERY_LEN {
            return Err(Error::SearchOutsideCity(CITY));
        }
        self.filter.lock().search = Some(text.to_string());
        self.refresh().await
    }

    pub async fn clear_search(&self) -> Result<RefreshOutcome, Error> {
        self.filter.lock().search = None;
        self.refresh().await
    }
}

fn is_local_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    LOCAL_PLACE_HINTS.iter().any(|hint| lower.contains(hint))
}
