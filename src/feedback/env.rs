//! Environment: context handed down from a container to its content.
//!
//! The environment is how senders find "their" channel without global state.
//! A container derives a child environment carrying its own channel and
//! passes it to the code that builds its content; nested containers shadow
//! the outer channel for everything built inside them.

use super::channel::FeedbackChannel;
use crate::error::FeedbackError;

/// Values made available to everything built inside a container.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    feedback: Option<FeedbackChannel>,
}

impl Environment {
    /// An empty environment: no container in scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a child environment whose feedback channel is `channel`.
    pub fn with_feedback(&self, channel: FeedbackChannel) -> Self {
        Self {
            feedback: Some(channel),
        }
    }

    /// The ambient feedback channel.
    ///
    /// Fails when no container established one.
    pub fn feedback(&self) -> Result<&FeedbackChannel, FeedbackError> {
        self.feedback.as_ref().ok_or(FeedbackError::MissingContainer)
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback.is_some()
    }
}
