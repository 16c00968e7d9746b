//! Timer-driven auto-play
//!
//! Playback runs as a local task on a current-thread tokio runtime, so it
//! must be started from inside a [`tokio::task::LocalSet`].

use super::controller::Controller;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest accepted tick period; tokio intervals reject zero
pub const MIN_TICK_DELAY: Duration = Duration::from_millis(1);

/// Handle to a running auto-play loop; the loop stops when it is dropped
#[derive(Debug)]
pub struct Playback {
    task: JoinHandle<()>,
    delay: Duration,
}

impl Playback {
    /// Spawn a loop that advances `controller` once every `delay`.
    ///
    /// The first tick fires one full delay after the start. A delay below
    /// [`MIN_TICK_DELAY`] is raised to it.
    ///
    /// # Panics
    ///
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn start(controller: Rc<RefCell<Controller>>, delay: Duration) -> Self {
        let delay = delay.max(MIN_TICK_DELAY);
        let task = tokio::task::spawn_local(async move {
            let mut ticker = time::interval_at(Instant::now() + delay, delay);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                controller.borrow_mut().on_advance_requested();
            }
        });

        Self { task, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel the loop. The task is never mid-tick here because it shares
    /// this thread, so no advance happens after this returns.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.task.abort();
    }
}
