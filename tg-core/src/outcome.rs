use serde::de::DeserializeOwned;

use tg_boundary::ResponseEnvelope;

use crate::error::Error;

const FALLBACK_MESSAGE: &str = "Unexpected response from the server";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Classified result of one HTTP call.
///
/// The backend mixes well-formed `{success, message, data}` envelopes
/// with bare strings, empty bodies and malformed JSON, sometimes on the
/// same endpoint. Callers match on this type instead of sniffing
/// response bodies themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// HTTP 2xx with an envelope confirming success.
    Ok(T),
    /// HTTP 2xx, but the body is missing, unparseable or negative.
    SoftFail(String),
    /// HTTP status outside the success range.
    HardFail(u16, String),
    /// The call never produced an HTTP status.
    TransportError(String),
}

impl<T> Outcome<T> {
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::SoftFail(message) => Err(Error::Api(message)),
            Self::HardFail(code, message) => Err(Error::Status(code, message)),
            Self::TransportError(cause) => Err(Error::Transport(cause)),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Classifies a payload-carrying response.
///
/// A parse failure on a 2xx status degrades to [`Outcome::SoftFail`],
/// never to a transport error: the request did reach the server.
pub fn classify<T>(status: u16, body: Option<&str>) -> Outcome<T>
where
    T: DeserializeOwned,
{
    if !is_success_status(status) {
        return Outcome::HardFail(status, error_message(body));
    }
    let Some(raw) = body.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Outcome::SoftFail(FALLBACK_MESSAGE.to_string());
    };
    match serde_json::from_str::<ResponseEnvelope<T>>(raw) {
        Ok(envelope) if envelope.success => match envelope.data {
            Some(data) => Outcome::Ok(data),
            None => Outcome::SoftFail(
                envelope
                    .message
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ),
        },
        Ok(envelope) => Outcome::SoftFail(
            envelope
                .message
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        ),
        Err(_) => Outcome::SoftFail(best_effort_message(raw)),
    }
}

/// Classifies an acknowledgment response whose body format is known to
/// be unreliable (the approve endpoint answers with an empty body, an
/// envelope or a plain string for the same logical outcome).
///
/// HTTP 2xx is authoritative over ambiguous body text: a non-JSON body
/// only turns the call into a failure when it explicitly signals one.
pub fn classify_ack(status: u16, body: Option<&str>) -> Outcome<()> {
    if !is_success_status(status) {
        return Outcome::HardFail(status, error_message(body));
    }
    let raw = body.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Outcome::Ok(());
    }
    if let Ok(envelope) = serde_json::from_str::<ResponseEnvelope<serde_json::Value>>(raw) {
        return if envelope.success {
            Outcome::Ok(())
        } else {
            Outcome::SoftFail(
                envelope
                    .message
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            )
        };
    }
    if ack_signals_success(raw) {
        Outcome::Ok(())
    } else {
        Outcome::SoftFail(best_effort_message(raw))
    }
}

/// Success-biased reading of an ambiguous acknowledgment body: the text
/// counts as a failure only when it contains "error" without also
/// containing "success" or "approved".
#[must_use]
pub fn ack_signals_success(raw: &str) -> bool {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return true;
    }
    let negative = lower.contains("error");
    let positive = lower.contains("success") || lower.contains("approved");
    !negative || positive
}

fn best_effort_message(raw: &str) -> String {
    // a bare JSON string is unwrapped, malformed JSON gets the fallback
    if let Ok(text) = serde_json::from_str::<String>(raw) {
        return text;
    }
    if raw.starts_with('{') || raw.starts_with('[') {
        FALLBACK_MESSAGE.to_string()
    } else {
        raw.to_string()
    }
}

fn error_message(body: Option<&str>) -> String {
    let Some(raw) = body.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return UNKNOWN_ERROR.to_string();
    };
    match serde_json::from_str::<ResponseEnvelope<serde_json::Value>>(raw) {
        Ok(envelope) => envelope.message.unwrap_or_else(|| raw.to_string()),
        Err(_) => best_effort_message(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tg_boundary::LikeState;

    #[test]
    fn classify_success_envelope() {
        let body = r#"{ "success": true, "data": { "isLiked": true, "likesCount": 3 } }"#;
        let outcome = classify::<LikeState>(200, Some(body));
        assert_eq!(
            outcome,
            Outcome::Ok(LikeState {
                is_liked: true,
                likes_count: 3
            })
        );
    }

    #[test]
    fn classify_negative_envelope_is_soft() {
        let body = r#"{ "success": false, "message": "No places found" }"#;
        let outcome = classify::<Vec<LikeState>>(200, Some(body));
        assert_eq!(outcome, Outcome::SoftFail("No places found".to_string()));
    }

    #[test]
    fn classify_bare_string_on_success_status_is_soft() {
        let outcome = classify::<Vec<LikeState>>(200, Some("Service warming up"));
        assert_eq!(outcome, Outcome::SoftFail("Service warming up".to_string()));
    }

    #[test]
    fn classify_malformed_json_on_success_status_is_soft() {
        let outcome = classify::<Vec<LikeState>>(200, Some(r#"{"success": tr"#));
        assert!(matches!(outcome, Outcome::SoftFail(_)));
    }

    #[test]
    fn classify_empty_body_on_success_status_is_soft() {
        assert!(matches!(
            classify::<Vec<LikeState>>(200, None),
            Outcome::SoftFail(_)
        ));
        assert!(matches!(
            classify::<Vec<LikeState>>(204, Some("")),
            Outcome::SoftFail(_)
        ));
    }

    #[test]
    fn classify_error_status_extracts_envelope_message() {
        let body = r#"{ "success": false, "message": "Not authorized" }"#;
        let outcome = classify::<Vec<LikeState>>(403, Some(body));
        assert_eq!(
            outcome,
            Outcome::HardFail(403, "Not authorized".to_string())
        );
    }

    #[test]
    fn classify_error_status_with_plain_body() {
        let outcome = classify::<Vec<LikeState>>(500, Some("Internal Server Error"));
        assert_eq!(
            outcome,
            Outcome::HardFail(500, "Internal Server Error".to_string())
        );
        let outcome = classify::<Vec<LikeState>>(502, None);
        assert_eq!(outcome, Outcome::HardFail(502, UNKNOWN_ERROR.to_string()));
    }

    // The acknowledgment table: HTTP 2xx is authoritative unless the
    // body contains "error" without "success"/"approved".
    #[test]
    fn ack_accepts_ambiguous_success_bodies() {
        for body in [
            None,
            Some(""),
            Some("   "),
            Some("Place approved"),
            Some("APPROVED"),
            Some("operation successful"),
            Some("\"Approved\""),
            Some(r#"{ "success": true }"#),
            Some(r#"{ "success": true, "message": "Place approved" }"#),
            // positive keyword outweighs the negative one
            Some("no error: approved successfully"),
            // garbage without an explicit failure signal
            Some("OK-ish 200"),
        ] {
            assert_eq!(classify_ack(200, body), Outcome::Ok(()), "body: {body:?}");
        }
    }

    #[test]
    fn ack_rejects_explicit_failures() {
        assert_eq!(
            classify_ack(200, Some("error: db write failed")),
            Outcome::SoftFail("error: db write failed".to_string())
        );
        assert_eq!(
            classify_ack(200, Some(r#"{ "success": false, "message": "nope" }"#)),
            Outcome::SoftFail("nope".to_string())
        );
        assert_eq!(
            classify_ack(403, Some(r#"{ "success": false, "message": "admin only" }"#)),
            Outcome::HardFail(403, "admin only".to_string())
        );
    }

    #[test]
    fn into_result_maps_variants() {
        assert_eq!(Outcome::Ok(1).into_result(), Ok(1));
        assert_eq!(
            Outcome::<i32>::SoftFail("m".into()).into_result(),
            Err(Error::Api("m".into()))
        );
        assert_eq!(
            Outcome::<i32>::HardFail(500, "m".into()).into_result(),
            Err(Error::Status(500, "m".into()))
        );
        assert_eq!(
            Outcome::<i32>::TransportError("m".into()).into_result(),
            Err(Error::Transport("m".into()))
        );
    }
}
