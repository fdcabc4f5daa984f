//! The shared theme store.
//!
//! One [`ThemeStore`] is built at startup and cloned into whatever needs it.
//! Clones share state. [`ThemeStore::listen`] keeps the store in sync with
//! writes from other tabs until the returned guard is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::environment::{ColorSchemePreference, Presentation};
use crate::error::Result;
use crate::storage::{StorageEvent, ThemeStorage, THEME_KEY};
use crate::theme::{ResolvedTheme, Theme};

/// Snapshot of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    /// The preference.
    pub value: Theme,
    /// The theme actually applied.
    pub resolved: ResolvedTheme,
}

struct Inner {
    storage: Arc<dyn ThemeStorage>,
    preference: Arc<dyn ColorSchemePreference>,
    presentation: Arc<dyn Presentation>,
    state: Mutex<ThemeState>,
}

/// Shared handle to the current theme.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Loads the stored preference and applies it.
    ///
    /// A missing value means [`Theme::System`]. A value that is not a theme
    /// is an error.
    pub fn new(
        storage: Arc<dyn ThemeStorage>,
        preference: Arc<dyn ColorSchemePreference>,
        presentation: Arc<dyn Presentation>,
    ) -> Result<Self> {
        let value = read_theme(storage.as_ref())?;
        let resolved = value.resolve(preference.preferred());
        presentation.apply(resolved);
        debug!(%value, %resolved, "theme store initialized");

        Ok(Self {
            inner: Arc::new(Inner {
                storage,
                preference,
                presentation,
                state: Mutex::new(ThemeState { value, resolved }),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ThemeState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current state.
    pub fn state(&self) -> ThemeState {
        *self.lock()
    }

    /// Returns the preference.
    pub fn value(&self) -> Theme {
        self.lock().value
    }

    /// Returns the applied theme.
    pub fn resolved(&self) -> ResolvedTheme {
        self.lock().resolved
    }

    /// Sets the preference, persists it and applies the resolved theme.
    pub fn set(&self, theme: Theme) -> Result<ThemeState> {
        let mut state = self.lock();
        self.set_locked(&mut state, theme)
    }

    /// Switches to the opposite of the applied theme.
    ///
    /// The new preference is always explicit, never [`Theme::System`].
    pub fn toggle(&self) -> Result<ThemeState> {
        let mut state = self.lock();
        let target = state.resolved.toggled();
        self.set_locked(&mut state, target.into())
    }

    fn set_locked(&self, state: &mut ThemeState, theme: Theme) -> Result<ThemeState> {
        let resolved = theme.resolve(self.inner.preference.preferred());
        self.inner.storage.set(THEME_KEY, theme.as_str())?;
        *state = ThemeState {
            value: theme,
            resolved,
        };
        self.inner.presentation.apply(resolved);
        info!(%theme, %resolved, "theme set");
        Ok(*state)
    }

    /// Re-reads storage after another tab changed it and re-applies the
    /// theme without writing it back. Events for other keys are ignored.
    pub fn handle_storage_event(&self, event: &StorageEvent) -> Result<ThemeState> {
        if event.key != THEME_KEY {
            return Ok(self.state());
        }

        let mut state = self.lock();
        let value = read_theme(self.inner.storage.as_ref())?;
        let resolved = value.resolve(self.inner.preference.preferred());
        *state = ThemeState { value, resolved };
        self.inner.presentation.apply(resolved);
        debug!(%value, %resolved, "theme synced from storage");
        Ok(*state)
    }

    /// Starts following storage changes from other tabs.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn listen(&self) -> ListenerGuard {
        let mut events = self.inner.storage.subscribe();
        let store = self.clone();
        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if let Err(e) = store.handle_storage_event(&event) {
                    warn!(error = %e, "ignoring storage change");
                }
            }
            debug!("storage listener finished");
        });
        ListenerGuard { task }
    }
}

fn read_theme(storage: &dyn ThemeStorage) -> Result<Theme> {
    storage
        .get(THEME_KEY)?
        .map_or(Ok(Theme::System), |raw| raw.parse())
}

/// Detaches the storage listener when dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    task: JoinHandle<()>,
}

impl ListenerGuard {
    /// Returns whether the listener task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}
