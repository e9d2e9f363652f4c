use tg_boundary::{Category, NewCategory};

use crate::{error::Error, gateways::DirectoryGateway, outcome::Outcome, validate};

/// Loads the active categories for the feed's filter.
///
/// The feed works without the filter, so every failure degrades to an
/// empty list instead of an error.
pub async fn load_categories<G>(gateway: &G) -> Vec<Category>
where
    G: DirectoryGateway,
{
    match gateway.categories().await {
        Outcome::Ok(categories) => categories.into_iter().filter(|c| c.is_active).collect(),
        Outcome::SoftFail(message) => {
            log::debug!("Categories unavailable: {message}");
            Vec::new()
        }
        Outcome::HardFail(code, message) => {
            log::debug!("Categories unavailable ({code}): {message}");
            Vec::new()
        }
        Outcome::TransportError(cause) => {
            log::debug!("Categories unavailable: {cause}");
            Vec::new()
        }
    }
}

/// Creates a new category (administrator only; the backend enforces
/// the role).
pub async fn create_category<G>(gateway: &G, category: &NewCategory) -> Result<Category, Error>
where
    G: DirectoryGateway,
{
    validate::validate_new_category(category)?;
    gateway.create_category(category).await.into_result()
}
