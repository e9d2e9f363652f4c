use parking_lot::Mutex;

use tg_boundary::Place;

use crate::{error::Error, gateways::DirectoryGateway, outcome::Outcome};

/// Administrator view of the places awaiting approval.
///
/// A place leaves the queue through `approve` or `reject`; both
/// transitions are terminal, nothing returns to pending. After a
/// mutation the queue is reloaded because only the server knows the
/// resulting state.
pub struct ModerationQueue<G> {
    gateway: G,
    pending: Mutex<Vec<Place>>,
}

impl<G: DirectoryGateway> ModerationQueue<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the pending queue.
    #[must_use]
    pub fn pending(&self) -> Vec<Place> {
        self.pending.lock().clone()
    }

    /// Loads all places awaiting approval.
    ///
    /// The backend occasionally answers this endpoint with a bare
    /// string; such a soft failure degrades to an empty queue instead
    /// of an error. Hard failures leave the queue untouched.
    pub async fn load_pending(&self) -> Result<Vec<Place>, Error> {
        match self.gateway.pending_places().await {
            Outcome::Ok(list) => {
                let pending: Vec<_> = list.into_iter().filter(|p| !p.is_approved).collect();
                log::debug!("{} places pending approval", pending.len());
                *self.pending.lock() = pending.clone();
                Ok(pending)
            }
            Outcome::SoftFail(message) => {
                log::warn!("Pending list unavailable: {message}");
                self.pending.lock().clear();
                Ok(Vec::new())
            }
            Outcome::HardFail(code, message) => Err(Error::Status(code, message)),
            Outcome::TransportError(cause) => Err(Error::Transport(cause)),
        }
    }

    /// Approves a pending place.
    ///
    /// The acknowledgment body of this endpoint is unreliable, so the
    /// gateway classifies it with the HTTP status as the primary
    /// signal. On success the queue is re-fetched.
    pub async fn approve(&self, place_id: &str) -> Result<(), Error> {
        self.gateway.approve_place(place_id).await.into_result()?;
        log::debug!("Place {place_id} approved");
        self.load_pending().await?;
        Ok(())
    }

    /// Rejects a submission by deleting it. On failure the queue is
    /// left untouched.
    pub async fn reject(&self, place_id: &str) -> Result<(), Error> {
        self.gateway.delete_place(place_id).await.into_result()?;
        log::debug!("Place {place_id} rejected");
        self.pending.lock().retain(|p| p.id != place_id);
        Ok(())
    }
}
