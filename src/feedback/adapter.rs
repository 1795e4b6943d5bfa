//! Adapters from producer output to feedback.
//!
//! One function per producer shape: plain values, optional values, error
//! streams and `Result`s. Each returns `None` when the emission should not
//! produce feedback; that is a normal outcome, not a failure, and nothing is
//! published for it.

use super::model::{Feedback, ERROR_DEFAULT_KEY};

// ---------------------------------------------------------------------------
// LocalizedError
// ---------------------------------------------------------------------------

/// An error that may carry a user-facing description.
///
/// Errors returning `None` (the default) are shown with the generic
/// [`ERROR_DEFAULT_KEY`] message.
///
/// ```ignore
/// #[derive(Debug, thiserror::Error)]
/// enum SaveError {
///     #[error("quota exceeded")]
///     Quota,
///     #[error("io: {0}")]
///     Io(#[from] std::io::Error),
/// }
///
/// impl LocalizedError for SaveError {
///     fn localized_description(&self) -> Option<String> {
///         match self {
///             SaveError::Quota => Some("save_quota_exceeded".into()),
///             SaveError::Io(_) => None,
///         }
///     }
/// }
/// ```
pub trait LocalizedError: std::error::Error {
    /// The message key (or display text) for this error, if it has one.
    fn localized_description(&self) -> Option<String> {
        None
    }
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Success feedback for a fixed message.
pub fn from_value(message: impl Into<String>) -> Feedback {
    Feedback::success(message)
}

/// Success feedback for an optional output.
///
/// Produces nothing when `output` is `None` or `to_message` declines.
pub fn from_optional<T: ?Sized>(
    output: Option<&T>,
    to_message: impl FnOnce(&T) -> Option<String>,
) -> Option<Feedback> {
    output.and_then(to_message).map(Feedback::success)
}

/// Error feedback for an optional error.
///
/// Produces nothing for `None`; otherwise always an error feedback.
pub fn from_error<E: LocalizedError + ?Sized>(err: Option<&E>) -> Option<Feedback> {
    let err = err?;
    let message = err
        .localized_description()
        .unwrap_or_else(|| ERROR_DEFAULT_KEY.to_owned());
    Some(Feedback::error(message))
}

/// Feedback for a `Result`.
///
/// `Ok` follows [`from_optional`] and may be suppressed; `Err` follows
/// [`from_error`] and never is.
pub fn from_result<T, E: LocalizedError>(
    result: &Result<T, E>,
    to_message: impl FnOnce(&T) -> Option<String>,
) -> Option<Feedback> {
    match result {
        Ok(value) => from_optional(Some(value), to_message),
        Err(err) => from_error(Some(err)),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
