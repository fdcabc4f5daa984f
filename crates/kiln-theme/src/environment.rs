//! OS color-scheme signal and document presentation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::theme::ResolvedTheme;

/// The OS `prefers-color-scheme` signal.
pub trait ColorSchemePreference: Send + Sync {
    /// Returns whether the OS prefers dark colors.
    fn prefers_dark(&self) -> bool;

    /// Returns the preferred theme.
    fn preferred(&self) -> ResolvedTheme {
        if self.prefers_dark() {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }
}

/// A fixed, but adjustable, OS preference.
#[derive(Debug)]
pub struct StaticPreference {
    dark: AtomicBool,
}

impl StaticPreference {
    /// Creates a preference for `theme`.
    pub fn new(theme: ResolvedTheme) -> Self {
        Self {
            dark: AtomicBool::new(theme == ResolvedTheme::Dark),
        }
    }

    /// Changes the preference, as when the user switches OS appearance.
    pub fn set(&self, theme: ResolvedTheme) {
        self.dark.store(theme == ResolvedTheme::Dark, Ordering::Relaxed);
    }
}

impl Default for StaticPreference {
    /// Without an OS signal dark is assumed.
    fn default() -> Self {
        Self::new(ResolvedTheme::Dark)
    }
}

impl ColorSchemePreference for StaticPreference {
    fn prefers_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }
}

/// Where the resolved theme is mirrored for the styling layer.
pub trait Presentation: Send + Sync {
    /// Applies the resolved theme.
    fn apply(&self, theme: ResolvedTheme);
}

/// Records the document-level `data-theme` attribute and `color-scheme`
/// style.
#[derive(Debug, Default)]
pub struct DocumentAttributes {
    applied: Mutex<Option<ResolvedTheme>>,
}

impl DocumentAttributes {
    /// Creates attributes with nothing applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `data-theme`.
    pub fn data_theme(&self) -> Option<ResolvedTheme> {
        *self.applied.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the value of the `color-scheme` style property.
    pub fn color_scheme(&self) -> Option<&'static str> {
        self.data_theme().map(ResolvedTheme::as_str)
    }

    /// Renders the attributes for the `<html>` element.
    pub fn html_attrs(&self) -> String {
        self.data_theme()
            .map(|theme| format!(r#"data-theme="{theme}" style="color-scheme: {theme}""#))
            .unwrap_or_default()
    }
}

impl Presentation for DocumentAttributes {
    fn apply(&self, theme: ResolvedTheme) {
        *self.applied.lock().unwrap_or_else(PoisonError::into_inner) = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_preference() {
        let preference = StaticPreference::new(ResolvedTheme::Light);
        assert_eq!(preference.preferred(), ResolvedTheme::Light);
        preference.set(ResolvedTheme::Dark);
        assert!(preference.prefers_dark());
        assert_eq!(StaticPreference::default().preferred(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_document_attributes() {
        let document = DocumentAttributes::new();
        assert_eq!(document.html_attrs(), "");

        document.apply(ResolvedTheme::Light);
        assert_eq!(document.data_theme(), Some(ResolvedTheme::Light));
        assert_eq!(document.color_scheme(), Some("light"));
        assert_eq!(
            document.html_attrs(),
            r#"data-theme="light" style="color-scheme: light""#
        );
    }
}
