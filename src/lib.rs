//! # feedback-overlay
//!
//! Transient feedback banners for terminal UIs.
//!
//! Any code built inside a [`FeedbackContainer`] can report a short success
//! or error message; the container shows the most recent one as a banner
//! over its content and dismisses it after a fixed delay.
//!
//! ## Core Systems
//!
//! - **[`feedback`]**: channel, adapters, dismiss timer, container, senders
//! - **[`reactive`]**: `Subject` publish/subscribe with RAII subscriptions
//! - **[`i18n`]**: message keys to display text
//! - **[`widget`]** / **[`widgets`]**: the `Widget` trait and the banner
//! - **[`render`]** / **[`geometry`]**: strips, styled cells, regions
//! - **[`testing`]**: plain-text rendering for assertions
//!
//! ## Example
//!
//! ```ignore
//! let local = tokio::task::LocalSet::new();
//! local.run_until(async {
//!     let ratings: Subject<Result<u8, RatingError>> = Subject::new();
//!     let container =
//!         FeedbackContainer::mount(&Environment::new(), ContainerConfig::new(), |env| {
//!             RatingScreen::new(env, &ratings)
//!         });
//!     ratings.publish(Ok(5));
//!     assert!(container.is_showing());
//! }).await;
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Reactivity
pub mod reactive;

// Feedback
pub mod feedback;
pub mod i18n;

// Rendering
pub mod render;
pub mod widget;
pub mod widgets;

// Test helpers
pub mod testing;

pub use error::FeedbackError;
pub use feedback::{
    ContainerConfig, DisplayState, Environment, Feedback, FeedbackChannel, FeedbackContainer,
    FeedbackKind, FeedbackSender, LocalizedError, RemotePublisher,
};
pub use i18n::MessageCatalog;
pub use reactive::{Subject, Subscription};
pub use widget::Widget;
pub use widgets::FeedbackBanner;
