//! # kiln-theme
//!
//! Theme preference store: `dark`, `light` or `system`, persisted in a
//! key-value storage, mirrored onto the document and kept in sync across
//! tabs.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use kiln_theme::{
//!     DocumentAttributes, MemoryStorage, ResolvedTheme, StaticPreference, Theme, ThemeStore,
//! };
//!
//! let document = Arc::new(DocumentAttributes::new());
//! let store = ThemeStore::new(
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(StaticPreference::new(ResolvedTheme::Dark)),
//!     document.clone(),
//! )
//! .unwrap();
//!
//! // Nothing stored yet: follow the OS.
//! assert_eq!(store.value(), Theme::System);
//! assert_eq!(store.resolved(), ResolvedTheme::Dark);
//!
//! store.toggle().unwrap();
//! assert_eq!(document.data_theme(), Some(ResolvedTheme::Light));
//! ```
//!
//! ## Cross-tab sync
//!
//! [`ThemeStore::listen`] spawns a tokio task that applies theme changes
//! written by other tabs. Drop the returned [`ListenerGuard`] to stop it.

mod environment;
mod error;
mod script;
mod storage;
mod store;
mod theme;

pub use environment::{ColorSchemePreference, DocumentAttributes, Presentation, StaticPreference};
pub use error::{Result, ThemeError};
pub use script::{bootstrap_script, BOOTSTRAP_JS};
pub use storage::{MemoryStorage, StorageEvent, StorageSubscription, ThemeStorage, THEME_KEY};
pub use store::{ListenerGuard, ThemeState, ThemeStore};
pub use theme::{ResolvedTheme, Theme};
