//! Error type for feedback wiring.

use thiserror::Error;

/// Errors raised while wiring senders to containers.
///
/// Delivery itself never fails; these only report integration mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// A sender was bound with an environment that no container provided.
    #[error("feedback sender used outside of a feedback container")]
    MissingContainer,

    /// A remote publisher outlived the container it feeds.
    #[error("feedback container has been torn down")]
    ContainerGone,
}
