//! Transient user notifications (toasts).

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Kind of toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// An operation is in progress.
    Loading,
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Kind.
    pub kind: ToastKind,
    /// Headline.
    pub title: String,
    /// Secondary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Toast {
    fn new(kind: ToastKind, title: &str, description: Option<&str>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }
}

/// Shows toasts to the user.
pub trait Notifier: Send + Sync {
    /// Shows a loading toast.
    fn loading(&self, title: &str);

    /// Shows a success toast.
    fn success(&self, title: &str);

    /// Shows an error toast.
    fn error(&self, title: &str, description: Option<&str>);

    /// Dismisses every visible toast.
    fn dismiss(&self);
}

/// Something that happened to the toast list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    /// A toast was shown.
    Shown(Toast),
    /// All toasts were dismissed.
    Dismissed,
}

#[derive(Debug, Default)]
struct ToastLogState {
    events: Vec<ToastEvent>,
    visible: Vec<Toast>,
}

/// In-memory notifier keeping the full event history.
#[derive(Debug, Default)]
pub struct ToastLog {
    state: Mutex<ToastLogState>,
}

impl ToastLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, toast: Toast) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.visible.push(toast.clone());
        state.events.push(ToastEvent::Shown(toast));
    }

    /// Returns every event in order.
    pub fn events(&self) -> Vec<ToastEvent> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }

    /// Returns the toasts currently visible.
    pub fn visible(&self) -> Vec<Toast> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .visible
            .clone()
    }

    /// Returns the kinds of every toast shown, in order.
    pub fn shown_kinds(&self) -> Vec<ToastKind> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ToastEvent::Shown(toast) => Some(toast.kind),
                ToastEvent::Dismissed => None,
            })
            .collect()
    }
}

impl Notifier for ToastLog {
    fn loading(&self, title: &str) {
        self.push(Toast::new(ToastKind::Loading, title, None));
    }

    fn success(&self, title: &str) {
        self.push(Toast::new(ToastKind::Success, title, None));
    }

    fn error(&self, title: &str, description: Option<&str>) {
        self.push(Toast::new(ToastKind::Error, title, description));
    }

    fn dismiss(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.visible.clear();
        state.events.push(ToastEvent::Dismissed);
    }
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn loading(&self, title: &str) {
        info!(kind = "loading", "{title}");
    }

    fn success(&self, title: &str) {
        info!(kind = "success", "{title}");
    }

    fn error(&self, title: &str, description: Option<&str>) {
        error!(kind = "error", description = description.unwrap_or_default(), "{title}");
    }

    fn dismiss(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_log_records_history() {
        let log = ToastLog::new();
        log.loading("Signing in...");
        log.dismiss();
        log.error("Sign in failed", Some("Invalid password"));

        assert_eq!(log.shown_kinds(), [ToastKind::Loading, ToastKind::Error]);
        assert_eq!(log.events()[1], ToastEvent::Dismissed);
        assert_eq!(
            log.visible(),
            [Toast {
                kind: ToastKind::Error,
                title: "Sign in failed".to_string(),
                description: Some("Invalid password".to_string()),
            }]
        );
    }
}
