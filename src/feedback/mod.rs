//! Feedback notifications: channel, adapters, timer, container, senders.
//!
//! - [`FeedbackChannel`]: single-slot relay a container listens on.
//! - [`adapter`]: turns producer output into [`Feedback`].
//! - [`DismissTimer`]: one cancellable dismissal at a time.
//! - [`FeedbackContainer`]: shows the latest feedback over its content.
//! - [`FeedbackSender`]: binds a producer to the ambient channel.

pub mod adapter;
pub mod channel;
pub mod container;
pub mod env;
pub mod model;
pub mod sender;
pub mod timer;

pub use adapter::{from_error, from_optional, from_result, from_value, LocalizedError};
pub use channel::{FeedbackChannel, WeakFeedbackChannel};
pub use container::{ContainerConfig, DisplayState, FeedbackContainer, RemotePublisher};
pub use env::Environment;
pub use model::{Feedback, FeedbackKind, ERROR_DEFAULT_KEY};
pub use sender::FeedbackSender;
pub use timer::{DismissTimer, TimerHandle, DEFAULT_DISMISS_AFTER};
