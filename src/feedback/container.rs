//! FeedbackContainer: shows the latest feedback over its content.
//!
//! A container creates its own [`FeedbackChannel`], hands it to its content
//! through a child [`Environment`], and subscribes to it. Every notification
//! replaces the displayed feedback and restarts the [`DismissTimer`]; when the
//! timer elapses the feedback is cleared.
//!
//! ```text
//!            publish(F)                      elapse(g == current)
//!   Idle ──────────────────▶ Showing(F) ───────────────────────────▶ Idle
//!                              │    ▲
//!                              └────┘ publish(F'): cancel, show F', restart
//! ```
//!
//! A container owns local tokio tasks (its forwarding task and dismiss
//! timers), so it must be mounted and fed from inside a
//! [`tokio::task::LocalSet`]. Mounting anywhere else panics immediately.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

use super::channel::{FeedbackChannel, WeakFeedbackChannel};
use super::env::Environment;
use super::model::Feedback;
use super::timer::{DismissTimer, DEFAULT_DISMISS_AFTER};
use crate::error::FeedbackError;
use crate::geometry::Region;
use crate::i18n::MessageCatalog;
use crate::reactive::{Subject, Subscription};
use crate::render::strip::Strip;
use crate::widget::traits::Widget;
use crate::widgets::banner::FeedbackBanner;

// ---------------------------------------------------------------------------
// ContainerConfig
// ---------------------------------------------------------------------------

/// Configuration for a feedback container.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// How long each feedback stays displayed.
    pub dismiss_after: Duration,
    /// Resolves message keys to display text.
    pub catalog: MessageCatalog,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            dismiss_after: DEFAULT_DISMISS_AFTER,
            catalog: MessageCatalog::default(),
        }
    }
}

impl ContainerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dismiss duration (builder).
    pub fn with_dismiss_after(mut self, duration: Duration) -> Self {
        self.dismiss_after = duration;
        self
    }

    /// Set the dismiss duration in milliseconds (builder).
    pub fn with_dismiss_after_ms(self, millis: u64) -> Self {
        self.with_dismiss_after(Duration::from_millis(millis))
    }

    /// Set the message catalog (builder).
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

// ---------------------------------------------------------------------------
// DisplayState
// ---------------------------------------------------------------------------

/// What the container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing shown, no dismissal pending.
    Idle,
    /// A feedback is shown and its dismissal is pending.
    Showing(Feedback),
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

struct DisplaySlot {
    displayed: Option<Feedback>,
    timer: DismissTimer,
}

/// State reachable from the channel subscription and the timer task. Both
/// hold it weakly; only the container owns it.
struct Shared {
    channel: FeedbackChannel,
    slot: RefCell<DisplaySlot>,
    changes: Subject<Option<Feedback>>,
}

fn show(shared: &Rc<Shared>, feedback: Feedback) {
    let weak = Rc::downgrade(shared);
    {
        let mut slot = shared.slot.borrow_mut();
        slot.displayed = Some(feedback.clone());
        let generation = slot.timer.start(move |generation| {
            if let Some(shared) = weak.upgrade() {
                dismiss(&shared, generation);
            }
        });
        debug!(
            generation,
            kind = %feedback.kind(),
            message = feedback.message(),
            "feedback shown"
        );
    }
    // The slot borrow is released before observers run.
    shared.changes.publish(Some(feedback));
}

fn dismiss(shared: &Shared, generation: u64) {
    {
        let mut slot = shared.slot.borrow_mut();
        if !slot.timer.complete(generation) {
            trace!(generation, "stale dismissal ignored");
            return;
        }
        slot.displayed = None;
    }
    shared.channel.clear();
    debug!(generation, "feedback dismissed");
    shared.changes.publish(None);
}

// ---------------------------------------------------------------------------
// RemotePublisher
// ---------------------------------------------------------------------------

/// `Send` handle for publishing into a container from other threads.
///
/// Feedback is queued and forwarded by a task on the container's `LocalSet`,
/// in send order.
#[derive(Debug, Clone)]
pub struct RemotePublisher {
    tx: mpsc::UnboundedSender<Feedback>,
}

impl RemotePublisher {
    /// Queue `feedback` for the container.
    pub fn publish(&self, feedback: Feedback) -> Result<(), FeedbackError> {
        self.tx
            .send(feedback)
            .map_err(|_| FeedbackError::ContainerGone)
    }

    /// Whether the container side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

struct RemoteLink {
    tx: mpsc::UnboundedSender<Feedback>,
    pump: AbortHandle,
}

impl RemoteLink {
    fn spawn(channel: WeakFeedbackChannel) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Feedback>();
        let pump = tokio::task::spawn_local(async move {
            while let Some(feedback) = rx.recv().await {
                let Some(channel) = channel.upgrade() else {
                    break;
                };
                channel.publish(feedback);
            }
        });
        Self {
            tx,
            pump: pump.abort_handle(),
        }
    }
}

impl Drop for RemoteLink {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

// ---------------------------------------------------------------------------
// FeedbackContainer
// ---------------------------------------------------------------------------

/// Wraps content and overlays the most recent feedback as a banner.
///
/// # Examples
///
/// ```ignore
/// let container = FeedbackContainer::mount(&Environment::new(), ContainerConfig::new(), |env| {
///     RatingScreen::new(env)
/// });
/// ```
pub struct FeedbackContainer {
    shared: Rc<Shared>,
    subscription: Option<Subscription>,
    content: Box<dyn Widget>,
    catalog: MessageCatalog,
    remote: RemoteLink,
}

impl FeedbackContainer {
    /// Create a container and build its content.
    ///
    /// `build` receives a child of `parent` carrying the new channel; senders
    /// bound with it publish to this container.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn mount<W, F>(parent: &Environment, config: ContainerConfig, build: F) -> Self
    where
        W: Widget + 'static,
        F: FnOnce(&Environment) -> W,
    {
        let channel = FeedbackChannel::new();
        let remote = RemoteLink::spawn(channel.downgrade());
        let shared = Rc::new(Shared {
            channel: channel.clone(),
            slot: RefCell::new(DisplaySlot {
                displayed: None,
                timer: DismissTimer::new(config.dismiss_after),
            }),
            changes: Subject::new(),
        });

        let weak = Rc::downgrade(&shared);
        let subscription = channel.subscribe(move |feedback| {
            if let Some(shared) = weak.upgrade() {
                show(&shared, feedback.clone());
            }
        });

        let env = parent.with_feedback(channel);
        let content = build(&env);
        debug!(
            dismiss_after = ?config.dismiss_after,
            content = content.widget_type(),
            "feedback container mounted"
        );

        Self {
            shared,
            subscription: Some(subscription),
            content: Box::new(content),
            catalog: config.catalog,
            remote,
        }
    }

    /// Tear the container down now. Equivalent to dropping it.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        subscription.unsubscribe();
        let cancelled = self.shared.slot.borrow_mut().timer.cancel();
        self.remote.pump.abort();
        debug!(cancelled, "feedback container unmounted");
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The feedback currently displayed.
    pub fn displayed(&self) -> Option<Feedback> {
        self.shared.slot.borrow().displayed.clone()
    }

    pub fn state(&self) -> DisplayState {
        match self.displayed() {
            Some(feedback) => DisplayState::Showing(feedback),
            None => DisplayState::Idle,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.shared.slot.borrow().displayed.is_some()
    }

    /// Time left before the displayed feedback is dismissed.
    pub fn remaining(&self) -> Option<Duration> {
        self.shared
            .slot
            .borrow()
            .timer
            .pending()
            .map(|handle| handle.remaining())
    }

    pub fn dismiss_after(&self) -> Duration {
        self.shared.slot.borrow().timer.duration()
    }

    /// This container's channel.
    pub fn channel(&self) -> &FeedbackChannel {
        &self.shared.channel
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The banner for the displayed feedback, with its message resolved.
    pub fn banner(&self) -> Option<FeedbackBanner> {
        self.shared
            .slot
            .borrow()
            .displayed
            .as_ref()
            .map(|f| FeedbackBanner::new(self.catalog.resolve(f.message()), f.kind()))
    }

    pub fn content(&self) -> &dyn Widget {
        self.content.as_ref()
    }

    /// The content, downcast to its concrete type.
    pub fn content_as<W: Widget + 'static>(&self) -> Option<&W> {
        self.content.as_any().downcast_ref::<W>()
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Display changes: `Some(f)` when `f` is shown, `None` when it is
    /// dismissed.
    pub fn changes(&self) -> &Subject<Option<Feedback>> {
        &self.shared.changes
    }

    /// Shorthand for `changes().subscribe(handler)`.
    pub fn subscribe_changes(
        &self,
        handler: impl FnMut(&Option<Feedback>) + 'static,
    ) -> Subscription {
        self.shared.changes.subscribe(handler)
    }

    /// A `Send` publisher for producers on other threads.
    ///
    /// Feedback sent through it is forwarded until teardown.
    pub fn remote_publisher(&self) -> RemotePublisher {
        RemotePublisher {
            tx: self.remote.tx.clone(),
        }
    }
}

impl Widget for FeedbackContainer {
    fn widget_type(&self) -> &str {
        "FeedbackContainer"
    }

    fn render(&self, region: Region) -> Vec<Strip> {
        let mut strips = self.content.render(region);
        if let Some(banner) = self.banner() {
            strips.extend(banner.render(region));
        }
        strips
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for FeedbackContainer {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for FeedbackContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackContainer")
            .field("state", &self.state())
            .field("dismiss_after", &self.dismiss_after())
            .field("content", &self.content.widget_type())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::ERROR_DEFAULT_KEY;
    use crate::testing::render_to_string;
    use pretty_assertions::assert_eq;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    struct Blank;

    impl Widget for Blank {
        fn widget_type(&self) -> &str {
            "Blank"
        }

        fn render(&self, _region: Region) -> Vec<Strip> {
            Vec::new()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn mount(config: ContainerConfig) -> FeedbackContainer {
        FeedbackContainer::mount(&Environment::new(), config, |_| Blank)
    }

    type ChangeLog = Rc<RefCell<Vec<Option<Feedback>>>>;

    fn record_changes(container: &FeedbackContainer) -> (ChangeLog, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_c = log.clone();
        let sub = container.subscribe_changes(move |c| log_c.borrow_mut().push(c.clone()));
        (log, sub)
    }

    // ── Config ───────────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = ContainerConfig::new();
        assert_eq!(config.dismiss_after, Duration::from_secs(4));
        assert_eq!(config.catalog, MessageCatalog::default());
    }

    #[test]
    fn config_builder() {
        let config = ContainerConfig::new()
            .with_dismiss_after_ms(1500)
            .with_catalog(MessageCatalog::empty().with_message("k", "v"));
        assert_eq!(config.dismiss_after, ms(1500));
        assert_eq!(config.catalog.resolve("k"), "v");
    }

    // ── Mounting ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn mount_starts_idle() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                assert_eq!(container.state(), DisplayState::Idle);
                assert!(!container.is_showing());
                assert_eq!(container.remaining(), None);
                assert!(container.banner().is_none());
                assert_eq!(container.channel().subscriber_count(), 1);
            })
            .await;
    }

    #[test]
    #[should_panic(expected = "LocalSet")]
    fn mount_outside_local_set_fails_fast() {
        let _container = mount(ContainerConfig::new());
    }

    #[tokio::test]
    async fn build_receives_container_channel() {
        LocalSet::new()
            .run_until(async {
                let mut seen = None;
                let container =
                    FeedbackContainer::mount(&Environment::new(), ContainerConfig::new(), |env| {
                        seen = env.feedback().ok().cloned();
                        Blank
                    });
                assert!(seen.expect("channel in scope").same_channel(container.channel()));
            })
            .await;
    }

    #[tokio::test]
    async fn content_downcast() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                assert!(container.content_as::<Blank>().is_some());
                assert_eq!(container.content().widget_type(), "Blank");
            })
            .await;
    }

    // ── State machine ────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn publish_shows_until_duration_elapses() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                container.channel().publish(Feedback::success("saved"));

                assert_eq!(container.state(), DisplayState::Showing(Feedback::success("saved")));

                sleep(ms(3999)).await;
                assert!(container.is_showing());
                assert_eq!(container.remaining(), Some(ms(1)));

                sleep(ms(2)).await;
                assert_eq!(container.state(), DisplayState::Idle);
                assert_eq!(container.channel().current(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn new_publish_replaces_and_restarts_clock() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                let (log, _sub) = record_changes(&container);

                container.channel().publish(Feedback::success("first"));
                sleep(ms(1000)).await;
                container.channel().publish(Feedback::error("second"));

                // The first timer would have fired at t=4000.
                sleep(ms(3500)).await;
                assert_eq!(container.displayed(), Some(Feedback::error("second")));

                sleep(ms(501)).await;
                assert_eq!(container.displayed(), None);

                assert_eq!(
                    *log.borrow(),
                    vec![
                        Some(Feedback::success("first")),
                        Some(Feedback::error("second")),
                        None,
                    ]
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn publish_same_feedback_twice_restarts() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new().with_dismiss_after_ms(100));
                container.channel().publish(Feedback::success("same"));
                sleep(ms(80)).await;
                container.channel().publish(Feedback::success("same"));
                sleep(ms(80)).await;
                assert!(container.is_showing());
                sleep(ms(21)).await;
                assert!(!container.is_showing());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_dismisses_on_next_turn() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new().with_dismiss_after(Duration::ZERO));
                container.channel().publish(Feedback::success("blink"));
                assert!(container.is_showing());
                sleep(ms(1)).await;
                assert!(!container.is_showing());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_duration_keeps_feedback_until_replaced() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new().with_dismiss_after(Duration::MAX));
                container.channel().publish(Feedback::success("sticky"));
                assert!(container.is_showing());

                sleep(Duration::from_secs(86_400 * 30)).await;
                assert_eq!(container.displayed(), Some(Feedback::success("sticky")));

                container.channel().publish(Feedback::error("next"));
                assert_eq!(container.displayed(), Some(Feedback::error("next")));
            })
            .await;
    }

    // ── Teardown ─────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_pending_dismissal() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                let channel = container.channel().clone();
                let (log, _sub) = record_changes(&container);

                channel.publish(Feedback::success("bye"));
                container.unmount();
                assert_eq!(channel.subscriber_count(), 0);

                sleep(ms(10_000)).await;
                // Shown once, never dismissed after teardown.
                assert_eq!(*log.borrow(), vec![Some(Feedback::success("bye"))]);

                // Publishing into the orphaned channel reaches nobody.
                channel.publish(Feedback::success("late"));
                assert_eq!(log.borrow().len(), 1);
            })
            .await;
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn banner_resolves_message_key() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                container.channel().publish(Feedback::error(ERROR_DEFAULT_KEY));

                let banner = container.banner().expect("banner");
                assert_eq!(banner.message(), "Something went wrong");
                assert!(render_to_string(&container, 30, 2).contains("Something went wrong"));
            })
            .await;
    }

    #[tokio::test]
    async fn idle_container_renders_only_content() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                assert_eq!(render_to_string(&container, 10, 2), "\n");
            })
            .await;
    }

    // ── Remote publishing ────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn remote_publisher_forwards_in_order() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                let (log, _sub) = record_changes(&container);
                let remote = container.remote_publisher();

                let worker = remote.clone();
                std::thread::spawn(move || {
                    worker.publish(Feedback::success("one")).unwrap();
                    worker.publish(Feedback::success("two")).unwrap();
                })
                .join()
                .unwrap();

                sleep(ms(1)).await;
                assert_eq!(
                    *log.borrow(),
                    vec![Some(Feedback::success("one")), Some(Feedback::success("two"))]
                );
                assert_eq!(container.displayed(), Some(Feedback::success("two")));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn remote_publisher_fails_after_teardown() {
        LocalSet::new()
            .run_until(async {
                let container = mount(ContainerConfig::new());
                let remote = container.remote_publisher();
                drop(container);
                sleep(ms(1)).await;

                assert!(remote.is_closed());
                assert_eq!(
                    remote.publish(Feedback::success("late")),
                    Err(FeedbackError::ContainerGone)
                );
            })
            .await;
    }
}
