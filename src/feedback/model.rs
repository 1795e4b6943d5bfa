//! Feedback values: a localizable message key plus its kind.

use std::fmt;

/// Message key used for errors that carry no description of their own.
pub const ERROR_DEFAULT_KEY: &str = "error_default";

// ---------------------------------------------------------------------------
// FeedbackKind
// ---------------------------------------------------------------------------

/// Whether a feedback reports a success or a failure.
///
/// Only affects how the banner is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Success,
    Error,
}

impl FeedbackKind {
    /// Lowercase name, as used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// A transient user-facing message.
///
/// Feedback has no identity beyond its value: a newer feedback replaces the
/// displayed one wholesale. `message` is a key resolved through a
/// [`MessageCatalog`](crate::i18n::MessageCatalog) at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback {
    message: String,
    kind: FeedbackKind,
}

impl Feedback {
    /// Create a feedback of the given kind.
    pub fn new(message: impl Into<String>, kind: FeedbackKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// A success feedback.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, FeedbackKind::Success)
    }

    /// An error feedback.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, FeedbackKind::Error)
    }

    /// The message key.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

// ===========================================================================
// Tests
// ===========================================================================
