use parking_lot::Mutex;

use tg_boundary::{LikeState, NewReview, Place, Review};

use crate::{error::Error, gateways::DirectoryGateway, outcome::Outcome, validate};

/// Detail-view state of one place: the place record, its reviews and
/// the viewer's like state.
#[derive(Debug, Clone, Default)]
pub struct EngagementState {
    pub place: Option<Place>,
    pub reviews: Vec<Review>,
    pub is_liked: bool,
    pub likes_count: u64,
}

/// Likes and reviews of a single place.
///
/// Mutations never adjust counters locally: the place detail and the
/// review list are re-fetched so that `reviews_count` and
/// `average_rating` reflect what the server recomputed.
pub struct PlaceEngagement<G> {
    gateway: G,
    place_id: String,
    state: Mutex<EngagementState>,
}

impl<G: DirectoryGateway> PlaceEngagement<G> {
    pub fn new(gateway: G, place_id: impl Into<String>) -> Self {
        Self {
            gateway,
            place_id: place_id.into(),
            state: Mutex::new(EngagementState::default()),
        }
    }

    #[must_use]
    pub fn state(&self) -> EngagementState {
        self.state.lock().clone()
    }

    /// Loads the place detail.
    pub async fn load(&self) -> Result<Place, Error> {
        let place = self.gateway.place(&self.place_id).await.into_result()?;
        let mut state = self.state.lock();
        state.likes_count = place.likes_count;
        state.place = Some(place.clone());
        Ok(place)
    }

    /// Loads the reviews. A soft failure degrades to an empty list.
    pub async fn load_reviews(&self) -> Result<Vec<Review>, Error> {
        match self.gateway.reviews(&self.place_id).await {
            Outcome::Ok(reviews) => {
                self.state.lock().reviews = reviews.clone();
                Ok(reviews)
            }
            Outcome::SoftFail(message) => {
                log::warn!("Reviews unavailable for {}: {message}", self.place_id);
                self.state.lock().reviews.clear();
                Ok(Vec::new())
            }
            Outcome::HardFail(code, message) => Err(Error::Status(code, message)),
            Outcome::TransportError(cause) => Err(Error::Transport(cause)),
        }
    }

    pub async fn load_like_status(&self) -> Result<LikeState, Error> {
        let status = self.gateway.like_status(&self.place_id).await.into_result()?;
        self.apply_like_state(status);
        Ok(status)
    }

    /// Flips the like state. The response is authoritative and replaces
    /// the local state wholesale; rapid repeated calls are not
    /// deduplicated, the server decides the final parity.
    pub async fn toggle_like(&self) -> Result<LikeState, Error> {
        let status = self.gateway.toggle_like(&self.place_id).await.into_result()?;
        self.apply_like_state(status);
        Ok(status)
    }

    /// Submits a review after local validation and reloads both the
    /// review list and the place detail.
    pub async fn add_review(&self, rating: u8, comment: &str) -> Result<(), Error> {
        let review = NewReview {
            rating,
            comment: comment.trim().to_string(),
        };
        validate::validate_review(&review)?;
        self.gateway
            .add_review(&self.place_id, &review)
            .await
            .into_result()?;
        self.reload_after_review_change().await
    }

    /// Rewrites an existing review. The backend rejects non-authors;
    /// the affordance is hidden locally via
    /// [`crate::authorization::can_modify_review`].
    pub async fn update_review(
        &self,
        review_id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<(), Error> {
        let review = NewReview {
            rating,
            comment: comment.trim().to_string(),
        };
        validate::validate_review(&review)?;
        self.gateway
            .update_review(review_id, &review)
            .await
            .into_result()?;
        self.reload_after_review_change().await
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<(), Error> {
        self.gateway.delete_review(review_id).await.into_result()?;
        self.reload_after_review_change().await
    }

    fn apply_like_state(&self, status: LikeState) {
        let mut state = self.state.lock();
        state.is_liked = status.is_liked;
        state.likes_count = status.likes_count;
        if let Some(place) = &mut state.place {
            place.likes_count = status.likes_count;
        }
    }

    // A review mutation changes the aggregate rating, so server truth
    // is re-fetched for both views.
    async fn reload_after_review_change(&self) -> Result<(), Error> {
        self.load_reviews().await?;
        self.load().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{approved_place, sample_review, MockGateway};

    fn like(is_liked: bool, likes_count: u64) -> LikeState {
        LikeState {
            is_liked,
            likes_count,
        }
    }

    #[tokio::test]
    async fn toggling_twice_restores_the_original_state() {
        let gateway = MockGateway::default();
        gateway.like_status.push(Outcome::Ok(like(false, 7)));
        gateway.toggle_like.push(Outcome::Ok(like(true, 8)));
        gateway.toggle_like.push(Outcome::Ok(like(false, 7)));
        let engagement = PlaceEngagement::new(gateway, "p1");

        let initial = engagement.load_like_status().await.unwrap();
        let toggled = engagement.toggle_like().await.unwrap();
        assert_eq!(toggled, like(true, 8));
        let restored = engagement.toggle_like().await.unwrap();
        assert_eq!(restored, initial);
        assert_eq!(engagement.state().likes_count, 7);
        assert!(!engagement.state().is_liked);
    }

    #[tokio::test]
    async fn like_response_replaces_local_state() {
        let gateway = MockGateway::default();
        gateway.place.push(Outcome::Ok(approved_place("p1")));
        // server reports a count unrelated to what the client had
        gateway.toggle_like.push(Outcome::Ok(like(true, 42)));
        let engagement = PlaceEngagement::new(gateway, "p1");

        engagement.load().await.unwrap();
        engagement.toggle_like().await.unwrap();
        let state = engagement.state();
        assert_eq!(state.likes_count, 42);
        assert_eq!(state.place.unwrap().likes_count, 42);
    }

    #[tokio::test]
    async fn add_review_round_trip_updates_the_aggregates() {
        let mut place_before = approved_place("p1");
        place_before.reviews_count = 1;
        place_before.average_rating = 3.0;
        let mut place_after = place_before.clone();
        place_after.reviews_count = 2;
        place_after.average_rating = 4.0;

        let gateway = MockGateway::default();
        gateway.place.push(Outcome::Ok(place_before));
        gateway
            .add_review
            .push(Outcome::Ok(sample_review("r2", "p1", "u1", 5, "Great")));
        gateway.reviews.push(Outcome::Ok(vec![
            sample_review("r1", "p1", "u2", 3, "Okay"),
            sample_review("r2", "p1", "u1", 5, "Great"),
        ]));
        gateway.place.push(Outcome::Ok(place_after));
        let engagement = PlaceEngagement::new(gateway, "p1");

        engagement.load().await.unwrap();
        assert_eq!(engagement.state().place.unwrap().reviews_count, 1);

        engagement.add_review(5, "Great").await.unwrap();
        let state = engagement.state();
        assert!(state
            .reviews
            .iter()
            .any(|r| r.rating == 5 && r.comment == "Great"));
        let place = state.place.unwrap();
        assert_eq!(place.reviews_count, 2);
        assert!((place.average_rating - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn invalid_reviews_never_reach_the_gateway() {
        let gateway = MockGateway::default();
        let engagement = PlaceEngagement::new(gateway, "p1");

        assert_eq!(
            engagement.add_review(0, "fine").await,
            Err(Error::RatingValue)
        );
        assert_eq!(
            engagement.add_review(6, "fine").await,
            Err(Error::RatingValue)
        );
        assert_eq!(
            engagement.add_review(4, "   ").await,
            Err(Error::EmptyComment)
        );
    }

    #[tokio::test]
    async fn delete_review_reloads_both_views() {
        let gateway = MockGateway::default();
        gateway.delete_review.push(Outcome::Ok(()));
        gateway.reviews.push(Outcome::Ok(vec![]));
        let mut place = approved_place("p1");
        place.reviews_count = 0;
        gateway.place.push(Outcome::Ok(place));
        let engagement = PlaceEngagement::new(gateway, "p1");

        engagement.delete_review("r1").await.unwrap();
        let state = engagement.state();
        assert!(state.reviews.is_empty());
        assert_eq!(state.place.unwrap().reviews_count, 0);
    }

    #[tokio::test]
    async fn review_soft_failure_degrades_to_empty_list() {
        let gateway = MockGateway::default();
        gateway
            .reviews
            .push(Outcome::SoftFail("Service warming up".into()));
        let engagement = PlaceEngagement::new(gateway, "p1");
        assert_eq!(engagement.load_reviews().await, Ok(Vec::new()));
    }
}
