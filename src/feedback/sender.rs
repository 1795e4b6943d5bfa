//! FeedbackSender: attaches a producer to the ambient feedback channel.
//!
//! A sender subscribes to a producer [`Subject`], runs every emission through
//! an adapter and publishes the resulting feedback, if any, to the channel
//! found in the [`Environment`] it was bound with.

use std::fmt;

use tracing::{trace, warn};

use super::adapter::{self, LocalizedError};
use super::channel::WeakFeedbackChannel;
use super::env::Environment;
use super::model::Feedback;
use crate::error::FeedbackError;
use crate::reactive::{Subject, Subscription};

/// A live binding from one producer to one feedback channel.
///
/// Dropping the sender unsubscribes it from its producer. The channel is
/// held weakly, so a sender that outlives its container publishes nothing.
pub struct FeedbackSender {
    channel: WeakFeedbackChannel,
    subscription: Subscription,
}

impl FeedbackSender {
    /// Bind `producer` through a custom `adapter`.
    ///
    /// Fails with [`FeedbackError::MissingContainer`] when `env` carries no
    /// feedback channel.
    pub fn bind<T: 'static>(
        env: &Environment,
        producer: &Subject<T>,
        adapter: impl Fn(&T) -> Option<Feedback> + 'static,
    ) -> Result<Self, FeedbackError> {
        let channel = match env.feedback() {
            Ok(channel) => channel.downgrade(),
            Err(err) => {
                warn!(error = %err, "feedback sender bound without a container");
                return Err(err);
            }
        };

        let target = channel.clone();
        let subscription = producer.subscribe(move |value| {
            let Some(feedback) = adapter(value) else {
                trace!("emission produced no feedback");
                return;
            };
            match target.upgrade() {
                Some(channel) => channel.publish(feedback),
                None => trace!("feedback channel gone, emission dropped"),
            }
        });

        Ok(Self {
            channel,
            subscription,
        })
    }

    /// Every emission becomes success feedback with `to_message(value)`.
    pub fn values<T: 'static>(
        env: &Environment,
        producer: &Subject<T>,
        to_message: impl Fn(&T) -> String + 'static,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, move |value| {
            Some(adapter::from_value(to_message(value)))
        })
    }

    /// Every emission becomes success feedback unless `to_message` declines.
    pub fn filtered<T: 'static>(
        env: &Environment,
        producer: &Subject<T>,
        to_message: impl Fn(&T) -> Option<String> + 'static,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, move |value| {
            adapter::from_optional(Some(value), &to_message)
        })
    }

    /// `Some` emissions become success feedback unless `to_message` declines.
    pub fn optionals<T: 'static>(
        env: &Environment,
        producer: &Subject<Option<T>>,
        to_message: impl Fn(&T) -> Option<String> + 'static,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, move |output| {
            adapter::from_optional(output.as_ref(), &to_message)
        })
    }

    /// `Some(err)` emissions become error feedback.
    pub fn errors<E: LocalizedError + 'static>(
        env: &Environment,
        producer: &Subject<Option<E>>,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, |err| adapter::from_error(err.as_ref()))
    }

    /// Every emission of a stream carrying only errors becomes error feedback.
    pub fn error_stream<E: LocalizedError + 'static>(
        env: &Environment,
        producer: &Subject<E>,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, |err| adapter::from_error(Some(err)))
    }

    /// `Ok` emissions follow [`optionals`](Self::optionals), `Err` emissions
    /// follow [`errors`](Self::errors).
    pub fn results<T: 'static, E: LocalizedError + 'static>(
        env: &Environment,
        producer: &Subject<Result<T, E>>,
        to_message: impl Fn(&T) -> Option<String> + 'static,
    ) -> Result<Self, FeedbackError> {
        Self::bind(env, producer, move |result| {
            adapter::from_result(result, &to_message)
        })
    }

    /// Whether the channel this sender publishes to still exists.
    pub fn is_connected(&self) -> bool {
        self.channel.upgrade().is_some()
    }

    /// Stop observing the producer. Equivalent to dropping the sender.
    pub fn detach(self) {
        self.subscription.unsubscribe();
    }
}

impl fmt::Debug for FeedbackSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackSender")
            .field("connected", &self.is_connected())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
