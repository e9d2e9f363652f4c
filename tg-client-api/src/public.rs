use async_trait::async_trait;
use reqwest::Client;

use tg_boundary::{AuthData, Credentials, NewAccount};
use tg_core::{gateways::AuthGateway, outcome::Outcome};

use crate::{into_outcome, UserApi};

/// Unauthenticated Tourist Guide API (register and login only).
#[derive(Clone)]
pub struct PublicApi {
    url: String,
    client: Client,
}

impl PublicApi {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    /// Upgrades to the authorized API with the bearer token obtained
    /// from a successful login or registration.
    #[must_use]
    pub fn authorize(&self, token: impl Into<String>) -> UserApi {
        UserApi::new(self.url.clone(), token)
    }
}

#[async_trait]
impl AuthGateway for PublicApi {
    async fn register(&self, new_account: &NewAccount) -> Outcome<AuthData> {
        let url = format!("{}/auth/register", self.url);
        into_outcome(self.client.post(&url).json(new_account).send().await).await
    }

    async fn login(&self, credentials: &Credentials) -> Outcome<AuthData> {
        let url = format!("{}/auth/login", self.url);
        into_outcome(self.client.post(&url).json(credentials).send().await).await
    }
}
