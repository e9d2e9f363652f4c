use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("The name must not be empty")]
    EmptyName,
    #[error("The email address must not be empty")]
    EmptyEmail,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("The password must not be empty")]
    EmptyPassword,
    #[error("The password must have at least 6 characters")]
    PasswordTooShort,
    #[error("The passwords do not match")]
    PasswordMismatch,
    #[error("The {0} must not be empty")]
    EmptyField(&'static str),
    #[error("No category selected")]
    MissingCategory,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("The comment must not be empty")]
    EmptyComment,
    #[error("Search is currently limited to {0}")]
    SearchOutsideCity(&'static str),

    /// The server answered but refused or garbled the request.
    #[error("{0}")]
    Api(String),
    /// HTTP error status.
    #[error("Request failed with status {0}: {1}")]
    Status(u16, String),
    /// The call never reached the server.
    #[error("{0}")]
    Transport(String),
}
