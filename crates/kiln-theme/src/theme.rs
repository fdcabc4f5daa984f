//! Theme preference and resolved theme values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The user's theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always dark.
    Dark,
    /// Always light.
    Light,
    /// Follow the OS color-scheme preference.
    #[default]
    System,
}

impl Theme {
    /// Returns the storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        }
    }

    /// Resolves the preference, using `os` for [`Theme::System`].
    pub fn resolve(self, os: ResolvedTheme) -> ResolvedTheme {
        match self {
            Self::Dark => ResolvedTheme::Dark,
            Self::Light => ResolvedTheme::Light,
            Self::System => os,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "system" => Ok(Self::System),
            other => Err(ThemeError::InvalidTheme(other.to_string())),
        }
    }
}

impl From<ResolvedTheme> for Theme {
    fn from(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Dark => Self::Dark,
            ResolvedTheme::Light => Self::Light,
        }
    }
}

/// The concrete theme applied to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    /// Dark colors.
    Dark,
    /// Light colors.
    Light,
}

impl ResolvedTheme {
    /// Returns the attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Returns the opposite theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for theme in [Theme::Dark, Theme::Light, Theme::System] {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
            assert_eq!(theme.to_string(), theme.as_str());
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "Dark".parse::<Theme>(),
            Err(ThemeError::InvalidTheme("Dark".to_string()))
        );
        assert!("".parse::<Theme>().is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Theme::System.resolve(ResolvedTheme::Dark), ResolvedTheme::Dark);
        assert_eq!(Theme::System.resolve(ResolvedTheme::Light), ResolvedTheme::Light);
        assert_eq!(Theme::Light.resolve(ResolvedTheme::Dark), ResolvedTheme::Light);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ResolvedTheme::Dark.toggled(), ResolvedTheme::Light);
        assert_eq!(ResolvedTheme::Light.toggled(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), r#""system""#);
        let theme: Theme = serde_json::from_str(r#""dark""#).unwrap();
        assert_eq!(theme, Theme::Dark);
    }
}
