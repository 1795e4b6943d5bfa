//! FeedbackChannel: the single-slot relay between senders and a container.
//!
//! A channel remembers the most recent feedback (the slot) and forwards every
//! publish to its subscribers through a [`Subject`]. Each container creates
//! its own channel and hands it down through an
//! [`Environment`](super::Environment); senders keep only a
//! [`WeakFeedbackChannel`] so they cannot keep a torn-down container's
//! channel alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::model::Feedback;
use crate::reactive::{Subject, Subscription};

struct ChannelInner {
    slot: RefCell<Option<Feedback>>,
    subject: Subject<Feedback>,
}

// ---------------------------------------------------------------------------
// FeedbackChannel
// ---------------------------------------------------------------------------

/// Broadcast slot holding the current feedback for one container.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone)]
pub struct FeedbackChannel {
    inner: Rc<ChannelInner>,
}

impl FeedbackChannel {
    /// Create an empty channel with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ChannelInner {
                slot: RefCell::new(None),
                subject: Subject::new(),
            }),
        }
    }

    /// Overwrite the slot and notify every subscriber, in publish order.
    pub fn publish(&self, feedback: Feedback) {
        tracing::debug!(
            kind = %feedback.kind(),
            message = feedback.message(),
            "feedback published"
        );
        *self.inner.slot.borrow_mut() = Some(feedback.clone());
        self.inner.subject.publish(feedback);
    }

    /// Register `handler` for every later publish. The current slot value is
    /// not replayed.
    pub fn subscribe(&self, handler: impl FnMut(&Feedback) + 'static) -> Subscription {
        self.inner.subject.subscribe(handler)
    }

    /// The most recently published feedback, unless it was cleared.
    pub fn current(&self) -> Option<Feedback> {
        self.inner.slot.borrow().clone()
    }

    /// Empty the slot without notifying anyone.
    pub fn clear(&self) {
        self.inner.slot.borrow_mut().take();
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subject.subscriber_count()
    }

    /// A non-owning handle for writers.
    pub fn downgrade(&self) -> WeakFeedbackChannel {
        WeakFeedbackChannel {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles point at the same channel.
    pub fn same_channel(&self, other: &FeedbackChannel) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for FeedbackChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FeedbackChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackChannel")
            .field("current", &*self.inner.slot.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// WeakFeedbackChannel
// ---------------------------------------------------------------------------

/// Non-owning handle to a [`FeedbackChannel`].
#[derive(Clone, Debug)]
pub struct WeakFeedbackChannel {
    inner: Weak<ChannelInner>,
}

impl WeakFeedbackChannel {
    /// Upgrade to a full handle if the channel still exists.
    pub fn upgrade(&self) -> Option<FeedbackChannel> {
        self.inner.upgrade().map(|inner| FeedbackChannel { inner })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn new_channel_is_empty() {
        let channel = FeedbackChannel::new();
        assert_eq!(channel.current(), None);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn publish_sets_slot() {
        let channel = FeedbackChannel::new();
        channel.publish(Feedback::success("saved"));
        assert_eq!(channel.current(), Some(Feedback::success("saved")));
    }

    #[test]
    fn publish_overwrites_slot() {
        let channel = FeedbackChannel::new();
        channel.publish(Feedback::success("first"));
        channel.publish(Feedback::error("second"));
        assert_eq!(channel.current(), Some(Feedback::error("second")));
    }

    #[test]
    fn each_publish_notifies_in_order() {
        let channel = FeedbackChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        let _sub = channel.subscribe(move |f| seen_c.borrow_mut().push(f.message().to_owned()));

        channel.publish(Feedback::success("a"));
        channel.publish(Feedback::success("a"));
        channel.publish(Feedback::success("b"));

        assert_eq!(*seen.borrow(), vec!["a", "a", "b"]);
    }

    #[test]
    fn no_replay_for_late_subscriber() {
        let channel = FeedbackChannel::new();
        channel.publish(Feedback::success("early"));
        let seen = Rc::new(RefCell::new(Vec::<Feedback>::new()));
        let seen_c = seen.clone();
        let _sub = channel.subscribe(move |f| seen_c.borrow_mut().push(f.clone()));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clear_empties_slot_silently() {
        let channel = FeedbackChannel::new();
        let calls = Rc::new(RefCell::new(0));
        let calls_c = calls.clone();
        let _sub = channel.subscribe(move |_| *calls_c.borrow_mut() += 1);

        channel.publish(Feedback::success("x"));
        channel.clear();

        assert_eq!(channel.current(), None);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn weak_handle_upgrades_while_alive() {
        let channel = FeedbackChannel::new();
        let weak = channel.downgrade();
        let upgraded = weak.upgrade().expect("channel alive");
        assert!(upgraded.same_channel(&channel));
    }

    #[test]
    fn weak_handle_dies_with_channel() {
        let channel = FeedbackChannel::new();
        let weak = channel.downgrade();
        drop(channel);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn clones_share_slot() {
        let a = FeedbackChannel::new();
        let b = a.clone();
        b.publish(Feedback::success("shared"));
        assert_eq!(a.current(), Some(Feedback::success("shared")));
        assert!(a.same_channel(&b));
        assert!(!a.same_channel(&FeedbackChannel::new()));
    }
}
