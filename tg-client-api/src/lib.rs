use reqwest::Response;
use serde::de::DeserializeOwned;

use tg_core::outcome::{classify, classify_ack, Outcome};

mod public;
mod user;

pub use self::{public::PublicApi, user::UserApi};

/// Collapses a finished `reqwest` call into a classified outcome.
///
/// The backend's envelopes are not reliable enough to deserialize the
/// response directly; classification works on the raw body text so
/// that a garbled 2xx degrades gracefully instead of erroring out.
async fn into_outcome<T>(response: reqwest::Result<Response>) -> Outcome<T>
where
    T: DeserializeOwned,
{
    match response {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => classify(status, Some(&body)),
                Err(err) => Outcome::TransportError(err.to_string()),
            }
        }
        Err(err) => Outcome::TransportError(err.to_string()),
    }
}

/// Like [`into_outcome`], for acknowledgment endpoints whose body
/// format is unreliable (see `tg_core::outcome::classify_ack`).
async fn into_ack(response: reqwest::Result<Response>) -> Outcome<()> {
    match response {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => classify_ack(status, Some(&body)),
                Err(err) => Outcome::TransportError(err.to_string()),
            }
        }
        Err(err) => Outcome::TransportError(err.to_string()),
    }
}
