//! Reactive plumbing: subjects and subscriptions.
//!
//! - [`Subject`]: single-threaded publish/subscribe relay (no replay).
//! - [`Subscription`]: RAII handle; dropping it unsubscribes.

pub mod subject;

pub use subject::{Subject, SubscriberId, Subscription};
