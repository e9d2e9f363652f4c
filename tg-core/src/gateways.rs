use std::path::PathBuf;

use async_trait::async_trait;

use tg_boundary::{
    AuthData, Category, Credentials, LikeState, NewAccount, NewCategory, NewPlace, NewReview,
    Place, Review, UpdatePlace,
};

use crate::outcome::Outcome;

/// Query parameters of the public place listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub city: Option<String>,
}

impl PlaceQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            category,
            search,
            city,
        } = self;
        category.is_none() && search.is_none() && city.is_none()
    }
}

/// Unauthenticated part of the backend API.
#[async_trait]
pub trait AuthGateway {
    async fn register(&self, new_account: &NewAccount) -> Outcome<AuthData>;
    async fn login(&self, credentials: &Credentials) -> Outcome<AuthData>;
}

/// Authenticated backend API consumed by the controllers.
///
/// Every method performs exactly one HTTP call and reports the
/// classified [`Outcome`]; no method retries.
#[async_trait]
pub trait DirectoryGateway {
    async fn places(&self, query: &PlaceQuery) -> Outcome<Vec<Place>>;
    async fn my_places(&self) -> Outcome<Vec<Place>>;
    async fn place(&self, place_id: &str) -> Outcome<Place>;
    async fn create_place(&self, place: &NewPlace, images: &[PathBuf]) -> Outcome<Place>;
    async fn update_place(
        &self,
        place_id: &str,
        update: &UpdatePlace,
        images: &[PathBuf],
    ) -> Outcome<Place>;
    async fn delete_place(&self, place_id: &str) -> Outcome<()>;

    async fn pending_places(&self) -> Outcome<Vec<Place>>;
    async fn approve_place(&self, place_id: &str) -> Outcome<()>;

    async fn categories(&self) -> Outcome<Vec<Category>>;
    async fn create_category(&self, category: &NewCategory) -> Outcome<Category>;

    async fn toggle_like(&self, place_id: &str) -> Outcome<LikeState>;
    async fn liked_places(&self) -> Outcome<Vec<Place>>;
    async fn like_status(&self, place_id: &str) -> Outcome<LikeState>;

    async fn reviews(&self, place_id: &str) -> Outcome<Vec<Review>>;
    async fn add_review(&self, place_id: &str, review: &NewReview) -> Outcome<Review>;
    async fn update_review(&self, review_id: &str, review: &NewReview) -> Outcome<Review>;
    async fn delete_review(&self, review_id: &str) -> Outcome<()>;
}
