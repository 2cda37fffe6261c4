//! Session Storage
//!
//! The only client-side persistence: the signed-in session and the payment
//! order waiting for checkout, each stored as a JSON blob under its own key.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{AuthSession, PaymentOrder};

pub const SESSION_KEY: &str = "studyswap.session";
pub const PAYMENT_ORDER_KEY: &str = "studyswap.payment_order";

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage(&self) -> AppResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("no window".into()))?
            .session_storage()
            .map_err(|e| AppError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AppError::Storage("session storage disabled".into()))
    }
}

impl KeyValueStore for BrowserSessionStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| AppError::Storage(format!("{:?}", e)))
    }
}

/// Process-local store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed access to the two session keys
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.store.get(key)? {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    // A blob we cannot read is as good as none; drop it
                    log::warn!("[session] discarding unreadable {}: {}", key, err);
                    self.store.remove(key)?;
                    Ok(None)
                }
            },
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    pub fn load_session(&self) -> AppResult<Option<AuthSession>> {
        self.load(SESSION_KEY)
    }

    pub fn save_session(&self, session: &AuthSession) -> AppResult<()> {
        self.save(SESSION_KEY, session)
    }

    /// Sign-out also drops any pending order
    pub fn clear_session(&self) -> AppResult<()> {
        self.store.remove(SESSION_KEY)?;
        self.store.remove(PAYMENT_ORDER_KEY)
    }

    pub fn load_order(&self) -> AppResult<Option<PaymentOrder>> {
        self.load(PAYMENT_ORDER_KEY)
    }

    pub fn save_order(&self, order: &PaymentOrder) -> AppResult<()> {
        self.save(PAYMENT_ORDER_KEY, order)
    }

    pub fn clear_order(&self) -> AppResult<()> {
        self.store.remove(PAYMENT_ORDER_KEY)
    }
}

pub type BrowserSession = SessionStore<BrowserSessionStorage>;

/// Session store over `window.sessionStorage`
pub fn browser_session() -> BrowserSession {
    SessionStore::new(BrowserSessionStorage)
}
