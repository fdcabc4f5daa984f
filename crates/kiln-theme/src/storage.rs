//! Key-value storage the theme preference is persisted in.
//!
//! [`MemoryStorage`] emulates browser `localStorage`: every tab opened from
//! the same storage shares one map, and a write from one tab is announced to
//! the others as a [`StorageEvent`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::Result;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

const EVENT_CAPACITY: usize = 64;

/// A change made to storage by another tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed.
    pub key: String,
    /// New value, `None` when the key was removed.
    pub new_value: Option<String>,
    source: u64,
}

impl StorageEvent {
    /// Creates an event not attributed to any tab.
    pub fn new(key: impl Into<String>, new_value: Option<String>) -> Self {
        Self {
            key: key.into(),
            new_value,
            source: 0,
        }
    }
}

/// Stream of storage changes made elsewhere.
#[derive(Debug)]
pub struct StorageSubscription {
    receiver: broadcast::Receiver<StorageEvent>,
    tab: u64,
}

impl StorageSubscription {
    /// Wraps a receiver; events originating from `tab` are skipped.
    pub fn new(receiver: broadcast::Receiver<StorageEvent>, tab: u64) -> Self {
        Self { receiver, tab }
    }

    /// Waits for the next foreign change. Returns `None` once the storage is
    /// gone.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.source == self.tab && event.source != 0 => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "storage subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// A string key-value store shared between tabs.
pub trait ThemeStorage: Send + Sync {
    /// Reads a key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a key.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Subscribes to changes made by other tabs.
    fn subscribe(&self) -> StorageSubscription;
}

static NEXT_TAB: AtomicU64 = AtomicU64::new(1);

/// In-memory storage shared by every tab opened from it.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    sender: broadcast::Sender<StorageEvent>,
    tab: u64,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Creates empty storage, seen from a first tab.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            sender,
            tab: NEXT_TAB.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Creates storage pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage
            .lock()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        storage
    }

    /// Opens another tab on the same storage.
    pub fn open_tab(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            sender: self.sender.clone(),
            tab: NEXT_TAB.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Removes a key, notifying other tabs.
    pub fn remove(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            self.notify(key, None);
        }
    }

    /// Writes a key without notifying anyone.
    pub fn set_silently(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, key: &str, new_value: Option<String>) {
        let event = StorageEvent {
            key: key.to_string(),
            new_value,
            source: self.tab,
        };
        // Err only means nobody is subscribed.
        let receivers = self.sender.send(event).unwrap_or(0);
        debug!(key, tab = self.tab, receivers, "storage changed");
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_silently(key, value);
        self.notify(key, Some(value.to_string()));
        Ok(())
    }

    fn subscribe(&self) -> StorageSubscription {
        StorageSubscription::new(self.sender.subscribe(), self.tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabs_share_entries() {
        let first = MemoryStorage::new();
        let second = first.open_tab();
        first.set(THEME_KEY, "dark").unwrap();
        assert_eq!(second.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        second.remove(THEME_KEY);
        assert_eq!(first.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_with_entries() {
        let storage = MemoryStorage::with_entries([(THEME_KEY, "light")]);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_subscription_skips_own_writes() {
        let first = MemoryStorage::new();
        let second = first.open_tab();
        let mut events = first.subscribe();

        first.set(THEME_KEY, "light").unwrap();
        second.set(THEME_KEY, "dark").unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.key, THEME_KEY);
        assert_eq!(event.new_value.as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_subscription_ends_with_storage() {
        let storage = MemoryStorage::new();
        let mut events = storage.subscribe();
        drop(storage);
        assert!(events.recv().await.is_none());
    }
}
