use std::path::PathBuf;

use tg_boundary::{NewPlace, Place, UpdatePlace};

use crate::{error::Error, gateways::DirectoryGateway, validate};

/// Submits a new place for moderation. The submission enters the
/// pending state; it only becomes publicly visible once approved.
pub async fn submit_place<G>(
    gateway: &G,
    place: &NewPlace,
    images: &[PathBuf],
) -> Result<Place, Error>
where
    G: DirectoryGateway,
{
    validate::validate_new_place(place)?;
    let created = gateway.create_place(place, images).await.into_result()?;
    log::debug!("Submitted place {} for approval", created.id);
    Ok(created)
}

/// Partially updates a place owned by the signed-in user (or any place
/// for administrators; the backend decides).
pub async fn update_place<G>(
    gateway: &G,
    place_id: &str,
    update: &UpdatePlace,
    images: &[PathBuf],
) -> Result<Place, Error>
where
    G: DirectoryGateway,
{
    gateway
        .update_place(place_id, update, images)
        .await
        .into_result()
}

pub async fn delete_place<G>(gateway: &G, place_id: &str) -> Result<(), Error>
where
    G: DirectoryGateway,
{
    gateway.delete_place(place_id).await.into_result()
}

/// The signed-in user's own submissions, pending ones included. This is
/// the one listing where an unapproved place is visible to its owner.
pub async fn my_places<G>(gateway: &G) -> Result<Vec<Place>, Error>
where
    G: DirectoryGateway,
{
    gateway.my_places().await.into_result()
}

pub async fn liked_places<G>(gateway: &G) -> Result<Vec<Place>, Error>
where
    G: DirectoryGateway,
{
    gateway.liked_places().await.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        outcome::Outcome,
        tests::{approved_place, pending_place, MockGateway},
    };

    #[tokio::test]
    async fn incomplete_submission_is_rejected_without_a_call() {
        let gateway = MockGateway::default();
        let place = NewPlace {
            name: "Dutch Garden".into(),
            ..NewPlace::default()
        };
        assert_eq!(
            submit_place(&gateway, &place, &[]).await,
            Err(Error::EmptyField("location"))
        );
    }

    #[tokio::test]
    async fn submission_returns_the_pending_place() {
        let gateway = MockGateway::default();
        gateway.create_place.push(Outcome::Ok(pending_place("p9")));
        let place = NewPlace {
            name: "Dutch Garden".into(),
            location: "Nanpura".into(),
            city: "Surat".into(),
            description: "Historic garden".into(),
            category: "cat1".into(),
            link: None,
        };
        let created = submit_place(&gateway, &place, &[]).await.unwrap();
        assert_eq!(created.id, "p9");
        assert!(!created.is_approved);
    }

    #[tokio::test]
    async fn my_places_includes_pending_submissions() {
        let gateway = MockGateway::default();
        gateway.my_places.push(Outcome::Ok(vec![
            approved_place("p1"),
            pending_place("p2"),
        ]));
        let places = my_places(&gateway).await.unwrap();
        assert_eq!(places.len(), 2);
    }
}
