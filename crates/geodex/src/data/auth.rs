//! Mock authentication store
//!
//! A demo login gate with a fixed credential pair and a simulated network
//! delay. Not a security boundary: the session is persisted client-side and
//! the credentials are hardcoded.

use crate::config::auth::{LOGIN_DELAY_MS, MOCK_EMAIL, MOCK_PASSWORD, MOCK_USERNAME};
use crate::config::storage::AUTH_KEY;
use crate::data::storage::{self, StorageBackend};
use crate::error::{AppError, Result};
use crate::notify::{Notification, NotificationSink};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The logged-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub email: String,
}

/// Persisted session payload: `{"user": {...} | null, "isAuthenticated": bool}`
#[derive(Default, Serialize, Deserialize)]
struct AuthFile {
    #[serde(default)]
    user: Option<User>,
    #[serde(default, rename = "isAuthenticated")]
    is_authenticated: bool,
}

/// Mock login session
pub struct AuthStore {
    user: Option<User>,
    authenticated: bool,
    storage: Arc<dyn StorageBackend>,
    sink: Arc<dyn NotificationSink>,
    login_delay: Duration,
}

impl AuthStore {
    /// Hydrate the session from persisted state
    pub fn load(storage: Arc<dyn StorageBackend>, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_login_delay(storage, sink, Duration::from_millis(LOGIN_DELAY_MS))
    }

    /// Hydrate with a custom simulated delay (for testing)
    pub fn with_login_delay(
        storage: Arc<dyn StorageBackend>,
        sink: Arc<dyn NotificationSink>,
        login_delay: Duration,
    ) -> Self {
        let file = match storage::load_json::<AuthFile>(storage.as_ref(), AUTH_KEY) {
            Ok(Some(file)) => file,
            Ok(None) => AuthFile::default(),
            Err(e) => {
                eprintln!("Failed to load auth session: {e}");
                AuthFile::default()
            }
        };

        Self {
            user: file.user,
            authenticated: file.is_authenticated,
            storage,
            sink,
            login_delay,
        }
    }

    /// Attempt a login against the mock credentials
    ///
    /// Blocks for the simulated round-trip delay, then either establishes
    /// the session (persisted, success notification) or returns
    /// `AppError::Auth` with state untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        std::thread::sleep(self.login_delay);

        if username != MOCK_USERNAME || password != MOCK_PASSWORD {
            return Err(AppError::Auth("Invalid username or password".to_string()));
        }

        self.user = Some(User {
            username: username.to_string(),
            email: MOCK_EMAIL.to_string(),
        });
        self.authenticated = true;
        self.persist();

        self.sink
            .dispatch(Notification::success("Successfully logged in!"));

        Ok(())
    }

    /// End the session
    pub fn logout(&mut self) {
        let name = self
            .user
            .take()
            .map(|u| u.username)
            .unwrap_or_else(|| "User".to_string());
        self.authenticated = false;
        self.persist();

        self.sink.dispatch(Notification::info(format!(
            "Goodbye {name}! You have been logged out."
        )));
    }

    /// Whether a session is established
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The logged-in user, if any
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn persist(&self) {
        let file = AuthFile {
            user: self.user.clone(),
            is_authenticated: self.authenticated,
        };
        if let Err(e) = storage::save_json(self.storage.as_ref(), AUTH_KEY, &file) {
            eprintln!("Failed to persist auth session: {e}");
        }
    }
}
