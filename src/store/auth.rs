use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

/// `is_authenticated` is true exactly when `user` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn initial() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: Some(User {
                username: username.into(),
            }),
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Shared handle to the authentication state. Clones observe and mutate
/// the same store.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    store: Arc<Store<AuthState>>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, username: &str) {
        info!(username = username; "login");
        self.store.set(AuthState::authenticated(username));
    }

    pub fn logout(&self) {
        info!("logout");
        self.store.set(AuthState::initial());
    }

    pub fn state(&self) -> AuthState {
        self.store.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_authenticated
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.store.subscribe()
    }
}
