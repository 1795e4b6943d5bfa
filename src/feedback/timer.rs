//! DismissTimer: a restartable single-shot timer.
//!
//! Each [`start`](DismissTimer::start) spawns a local tokio task that sleeps
//! until the deadline and then calls the elapse callback with the timer's
//! generation. Starting again aborts the previous task first, so at most one
//! dismissal is ever pending. The generation lets the callback's owner reject
//! an elapse that raced with a restart.
//!
//! Timers spawn with [`tokio::task::spawn_local`] and must therefore be
//! started from inside a [`tokio::task::LocalSet`].

use std::fmt;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::Instant;

/// How long feedback stays on screen unless configured otherwise.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(4);

/// Stand-in delay when `now + duration` does not fit in an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn deadline_after(duration: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(duration)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

// ---------------------------------------------------------------------------
// TimerHandle
// ---------------------------------------------------------------------------

/// One scheduled dismissal. Dropping the handle cancels it.
pub struct TimerHandle {
    generation: u64,
    deadline: Instant,
    task: AbortHandle,
}

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the dismissal fires.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the dismissal fires (zero once overdue).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("generation", &self.generation)
            .field("deadline", &self.deadline)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DismissTimer
// ---------------------------------------------------------------------------

/// Restartable single-shot timer with a fixed duration.
#[derive(Debug)]
pub struct DismissTimer {
    duration: Duration,
    generation: u64,
    pending: Option<TimerHandle>,
}

impl DismissTimer {
    /// Create an idle timer.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            pending: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Cancel any pending dismissal and schedule a new one.
    ///
    /// `on_elapse` receives the generation returned here. Durations too large
    /// to schedule (such as `Duration::MAX`) are treated as never elapsing.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn start(&mut self, on_elapse: impl FnOnce(u64) + 'static) -> u64 {
        self.cancel();

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let deadline = deadline_after(self.duration);

        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            on_elapse(generation);
        });

        tracing::trace!(generation, ?deadline, "dismiss timer started");
        self.pending = Some(TimerHandle {
            generation,
            deadline,
            task: task.abort_handle(),
        });
        generation
    }

    /// Cancel the pending dismissal. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                tracing::trace!(generation = handle.generation, "dismiss timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Mark `generation` as elapsed. Returns `false` when it was superseded
    /// or cancelled, in which case nothing changes.
    pub fn complete(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `generation` is the dismissal still pending.
    pub fn is_current(&self, generation: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|h| h.generation == generation)
    }

    pub fn pending(&self) -> Option<&TimerHandle> {
        self.pending.as_ref()
    }
}

impl Default for DismissTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
