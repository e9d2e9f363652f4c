use tg_boundary::{Credentials, NewAccount};

use crate::{
    error::Error,
    gateways::AuthGateway,
    session::{Session, SessionStore},
    validate,
};

/// Signs in and populates the session store with the returned tuple.
pub async fn login<G, S>(
    gateway: &G,
    store: &S,
    email: &str,
    password: &str,
) -> Result<Session, Error>
where
    G: AuthGateway,
    S: SessionStore,
{
    let email = email.trim();
    if email.is_empty() {
        return Err(Error::EmptyEmail);
    }
    if !validate::is_valid_email(email) {
        return Err(Error::EmailAddress);
    }
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    let auth = gateway.login(&credentials).await.into_result()?;
    let session = Session::from(auth);
    store.save_auth_data(&session);
    log::debug!("Signed in as {}", session.user_email);
    Ok(session)
}

/// Creates a new account. A successful registration signs the user in
/// right away, exactly like a login.
pub async fn register<G, S>(
    gateway: &G,
    store: &S,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Session, Error>
where
    G: AuthGateway,
    S: SessionStore,
{
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    if email.is_empty() {
        return Err(Error::EmptyEmail);
    }
    if !validate::is_valid_email(email) {
        return Err(Error::EmailAddress);
    }
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    if !validate::is_valid_password(password) {
        return Err(Error::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(Error::PasswordMismatch);
    }
    let new_account = NewAccount {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let auth = gateway.register(&new_account).await.into_result()?;
    let session = Session::from(auth);
    store.save_auth_data(&session);
    log::debug!("Registered new account for {}", session.user_email);
    Ok(session)
}

/// Clears the persisted session wholesale. Purely local; the token is
/// simply forgotten.
pub fn logout<S: SessionStore>(store: &S) {
    store.clear_auth_data();
    log::debug!("Session cleared");
}
