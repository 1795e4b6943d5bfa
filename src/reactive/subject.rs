//! Subject<T>: a single-threaded publish/subscribe relay.
//!
//! A subject has no current value; it only forwards each published value to
//! the handlers registered at publish time ("fire on change", no replay).
//! Handlers are boxed `FnMut(&T)` closures stored in a slotmap, and every
//! registration returns a [`Subscription`] that removes the handler when it
//! is dropped.
//!
//! Delivery is synchronous and ordered. A `publish` issued from inside a
//! handler is queued and delivered after the current value has reached every
//! handler, so no handler is ever re-entered and publish order is preserved.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a handler slot inside a [`Subject`].
    pub struct SubscriberId;
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct HandlerState<T> {
    /// Wrapped in `Option` so the callback can be taken out while it runs
    /// (avoids holding a `RefMut` on the subject across the user callback).
    callback: Option<Box<dyn FnMut(&T)>>,
}

struct SubjectState<T> {
    handlers: SlotMap<SubscriberId, HandlerState<T>>,
    /// Values published but not yet delivered.
    pending: VecDeque<T>,
    /// True while the delivery loop is running.
    dispatching: bool,
}

impl<T> SubjectState<T> {
    fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
            pending: VecDeque::new(),
            dispatching: false,
        }
    }
}

/// Ends a delivery loop, even when a handler panics. Values still queued by
/// an unwinding loop are discarded.
struct DispatchGuard<'a, T> {
    state: &'a RefCell<SubjectState<T>>,
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.dispatching = false;
            if std::thread::panicking() {
                state.pending.clear();
            }
        }
    }
}

/// Puts a running callback back into its slot once it returns or unwinds,
/// unless the handler unsubscribed itself meanwhile.
struct RunningHandler<'a, T> {
    state: &'a RefCell<SubjectState<T>>,
    id: SubscriberId,
    callback: Option<Box<dyn FnMut(&T)>>,
}

impl<T> Drop for RunningHandler<'_, T> {
    fn drop(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if let Some(handler) = state.handlers.get_mut(self.id) {
                handler.callback = Some(callback);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// Publish/subscribe relay for values of type `T`.
///
/// Cloning a `Subject` yields another handle to the same relay.
pub struct Subject<T: 'static> {
    state: Rc<RefCell<SubjectState<T>>>,
}

impl<T: 'static> Subject<T> {
    /// Create a subject with no subscribers.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SubjectState::new())),
        }
    }

    /// Register `handler` for every value published from now on.
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// dropped or [`unsubscribe`](Subscription::unsubscribe)d.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.state.borrow_mut().handlers.insert(HandlerState {
            callback: Some(Box::new(handler)),
        });

        let weak: Weak<RefCell<SubjectState<T>>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().handlers.remove(id);
            }
        })
    }

    /// Deliver `value` to every current subscriber.
    ///
    /// Called from inside a handler, the value is queued behind the one
    /// being delivered.
    pub fn publish(&self, value: T) {
        {
            let mut state = self.state.borrow_mut();
            state.pending.push_back(value);
            if state.dispatching {
                return;
            }
            state.dispatching = true;
        }
        let _dispatch = DispatchGuard { state: &self.state };

        loop {
            let next = self.state.borrow_mut().pending.pop_front();
            let Some(value) = next else {
                break;
            };

            let ids: Vec<SubscriberId> = self.state.borrow().handlers.keys().collect();
            for id in ids {
                let callback = self
                    .state
                    .borrow_mut()
                    .handlers
                    .get_mut(id)
                    .and_then(|h| h.callback.take());
                let Some(callback) = callback else {
                    continue;
                };

                let mut running = RunningHandler {
                    state: &self.state,
                    id,
                    callback: Some(callback),
                };
                if let Some(callback) = running.callback.as_mut() {
                    callback(&value);
                }
            }
        }
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    /// Whether no handler is registered.
    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}

impl<T: 'static> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Keeps a handler registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the handler now.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
