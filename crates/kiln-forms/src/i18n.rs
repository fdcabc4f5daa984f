//! Localization seam.
//!
//! Everything user-facing in this crate goes through a [`Translator`]. The
//! translation engine itself lives outside the crate; [`Catalog`] is a flat
//! key/message map good enough for the CLI and for tests.

use std::collections::HashMap;

use crate::error::{FormError, Result};

/// Translates a message key into user-facing text.
pub trait Translator: Send + Sync {
    /// Translates `key`, substituting `{name}` placeholders from `args`.
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String;

    /// Translates a key without interpolation.
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Translator that returns the key itself.
///
/// Useful when messages are resolved later, or in tests asserting on keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str, _args: &[(&str, &str)]) -> String {
        key.to_string()
    }
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, &str)]) -> String + Send + Sync,
{
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        self(key, args)
    }
}

/// A flat message catalog keyed by dotted message keys.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog. Every lookup falls back to the key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `(key, message)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses a catalog from a JSON object of strings.
    ///
    /// Nested objects are flattened with `.` separators, so
    /// `{"auth": {"sign-in": "Sign in"}}` defines `auth.sign-in`.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        let mut messages = HashMap::new();
        flatten_into(&mut messages, String::new(), &root)?;
        Ok(Self { messages })
    }

    /// Adds or replaces a message.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.messages.get(key).map_or_else(
            || key.to_string(),
            |template| interpolate(template, args),
        )
    }
}

fn flatten_into(
    out: &mut HashMap<String, String>,
    prefix: String,
    value: &serde_json::Value,
) -> Result<()> {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, path, child)?;
            }
            Ok(())
        }
        serde_json::Value::String(message) => {
            out.insert(prefix, message.clone());
            Ok(())
        }
        other => Err(FormError::Catalog(format!(
            "expected string message at `{prefix}`, found {other}"
        ))),
    }
}

/// Replaces `{name}` placeholders in `template` with values from `args`.
///
/// Unknown placeholders are left untouched.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
