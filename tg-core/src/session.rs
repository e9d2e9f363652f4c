use serde::{Deserialize, Serialize};

use tg_boundary::{AuthData, UserRole};

/// The locally persisted session tuple. A single instance exists per
/// process and survives restarts until an explicit logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_role: UserRole,
}

impl From<AuthData> for Session {
    fn from(from: AuthData) -> Self {
        let AuthData {
            id,
            name,
            email,
            role,
            token,
        } = from;
        Self {
            token,
            user_id: id,
            user_name: name,
            user_email: email,
            user_role: role,
        }
    }
}

/// Flat credential store. Implementations persist the tuple wholesale;
/// readers tolerate eventually-consistent reads.
pub trait SessionStore {
    fn current(&self) -> Option<Session>;
    fn save_auth_data(&self, session: &Session);
    fn clear_auth_data(&self);

    fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    fn is_admin(&self) -> bool {
        self.current()
            .is_some_and(|session| session.user_role.is_admin())
    }

    fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    fn user_id(&self) -> Option<String> {
        self.current().map(|session| session.user_id)
    }
}
