use std::{io, path::Path};

use jfs::Store;

use tg_core::session::{Session, SessionStore};

const SESSION_KEY: &str = "session";

/// File-backed session store. The session tuple is kept as a single
/// JSON document and survives restarts until an explicit logout.
pub struct FileSessionStore {
    json_store: Store,
}

impl FileSessionStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }
}

impl SessionStore for FileSessionStore {
    fn current(&self) -> Option<Session> {
        self.json_store.get(SESSION_KEY).ok()
    }

    fn save_auth_data(&self, session: &Session) {
        if let Err(err) = self.json_store.save_with_id(session, SESSION_KEY) {
            log::warn!("Unable to persist session: {err}");
        }
    }

    fn clear_auth_data(&self) {
        if let Err(err) = self.json_store.delete(SESSION_KEY) {
            if err.kind() != io::ErrorKind::NotFound {
                log::warn!("Unable to clear session: {err}");
            }
        }
    }
}
