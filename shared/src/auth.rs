//! Credential handling for the backend's Authorization header.
//!
//! The login form stores a credential string and every request echoes it
//! back. This module implements that contract as it stands.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ApiConfig;
use crate::error::ClientResult;
use crate::storage::KeyValueStore;

const BASIC_PREFIX: &str = "Basic ";
const BEARER_PREFIX: &str = "Bearer ";

/// `Basic base64(username:password)`
pub fn basic_credential(username: &str, password: &str) -> String {
    format!(
        "{}{}",
        BASIC_PREFIX,
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

fn has_scheme_prefix(credential: &str) -> bool {
    [BASIC_PREFIX, BEARER_PREFIX].iter().any(|prefix| {
        credential
            .get(..prefix.len())
            .map(|head| head.eq_ignore_ascii_case(prefix))
            .unwrap_or(false)
    })
}

/// Header value for a stored credential. A credential that already names
/// its scheme is sent as-is; a bare token is sent as a bearer token.
pub fn authorization_header(credential: &str) -> Option<String> {
    if credential.trim().is_empty() {
        return None;
    }
    if has_scheme_prefix(credential) {
        Some(credential.to_string())
    } else {
        Some(format!("{}{}", BEARER_PREFIX, credential))
    }
}

/// Credential persisted under a fixed key
pub struct CredentialStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S, config: &ApiConfig) -> Self {
        Self {
            store,
            key: config.credential_key.clone(),
        }
    }

    pub fn save(&self, credential: &str) -> ClientResult<()> {
        self.store.set_item(&self.key, credential)
    }

    /// Build and save a Basic credential from the login form
    pub fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        let credential = basic_credential(username, password);
        self.save(&credential)?;
        tracing::info!("Stored credential for {}", username);
        Ok(credential)
    }

    pub fn credential(&self) -> Option<String> {
        match self.store.get_item(&self.key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!("Credential read failed: {}", e);
                None
            }
        }
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.credential().as_deref().and_then(authorization_header)
    }

    /// Whether protected views may be shown
    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.store.remove_item(&self.key)
    }
}
