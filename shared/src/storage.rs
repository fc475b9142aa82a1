//! Key-value persistence seam
//!
//! The browser's `localStorage` is one implementation; [`MemoryStore`] backs
//! tests and headless use. Both are string-in, string-out, like the browser API.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, ClientResult};

/// Persistent string storage addressed by key
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;

    fn remove_item(&self, key: &str) -> ClientResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        (**self).remove_item(key)
    }
}

/// In-memory store, one instance per test or tab
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read a JSON value, treating a missing key, a storage failure or corrupt
/// data as `fallback`
pub fn read_json_or<S, T>(store: &S, key: &str, fallback: T) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match try_read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!("Cache read failed for {}: {}", key, e);
            fallback
        }
    }
}

fn try_read_json<S, T>(store: &S, key: &str) -> ClientResult<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get_item(key)? {
        Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
        _ => Ok(None),
    }
}

/// Write a JSON value; failures are logged and swallowed
pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> bool
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(ClientError::from)
        .and_then(|raw| store.set_item(key, &raw));
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Cache write failed for {}: {}", key, e);
            false
        }
    }
}
