//! Elapsed-time ticking for a quiz round.
//!
//! [`TickTimer`] owns at most one background task forwarding clock ticks into
//! a channel. Each start bumps a generation number carried by every tick, so
//! the consumer can drop ticks that were already queued when the timer was
//! stopped or restarted.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::traits::Clock;

/// One tick from a specific run of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// A [`Clock`] backed by `tokio::time::interval`.
#[derive(Debug, Clone, Copy)]
pub struct IntervalClock {
    period: Duration,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Clock for IntervalClock {
    fn ticks(&self) -> BoxStream<'static, ()> {
        let period = self.period;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // A stalled consumer must not receive a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        stream::unfold(interval, |mut interval| async move {
            interval.tick().await;
            Some(((), interval))
        })
        .boxed()
    }
}

/// Starts and stops the background tick task.
pub struct TickTimer {
    clock: Arc<dyn Clock>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl TickTimer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            task: None,
            generation: 0,
        }
    }

    /// Generation of the current (or most recent) run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Whether `tick` came from the current run and should be counted.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }

    /// Start a new run, tearing down any run already in progress.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, sender: UnboundedSender<Tick>) {
        self.stop();
        self.generation += 1;
        let generation = self.generation;
        let mut ticks = self.clock.ticks();

        self.task = Some(tokio::spawn(async move {
            while ticks.next().await.is_some() {
                if sender.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(generation, "tick timer started");
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::trace!(generation = self.generation, "tick timer stopped");
        }
    }

    /// Start or stop so that the timer runs exactly when `should_run` is set.
    /// A timer that is already running is left alone.
    pub fn sync(&mut self, should_run: bool, sender: &UnboundedSender<Tick>) {
        match (should_run, self.is_running()) {
            (true, false) => self.start(sender.clone()),
            (false, true) => self.stop(),
            _ => {}
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
