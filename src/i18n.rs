//! Message catalog: resolves feedback message keys to display text.
//!
//! Feedback carries keys rather than final text. The container resolves the
//! key through its catalog when rendering; unknown keys are shown verbatim so
//! plain text can be used as a key.

use std::collections::HashMap;

use crate::feedback::ERROR_DEFAULT_KEY;

/// Text shown for [`ERROR_DEFAULT_KEY`] by the default catalog.
pub const ERROR_DEFAULT_TEXT: &str = "Something went wrong";

/// Key -> display text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// A catalog with no entries at all, not even the fallback error text.
    pub fn empty() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Add or replace an entry (builder).
    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    /// Display text for `key`, or the key itself when it has no entry.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageCatalog {
    /// Contains the generic error text only.
    fn default() -> Self {
        Self::empty().with_message(ERROR_DEFAULT_KEY, ERROR_DEFAULT_TEXT)
    }
}
