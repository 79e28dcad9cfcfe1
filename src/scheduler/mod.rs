//! Countdown scheduling
//!
//! The engine registers one countdown: a tick callback fired once per interval
//! with the milliseconds left, and a finish callback fired once when the
//! duration has elapsed. The registration can be cancelled at any time through
//! the returned [`CancelHandle`]; callbacks stop once the cancellation is
//! observed.

pub mod countdown;
#[cfg(test)]
pub mod manual;

pub use countdown::TokioScheduler;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use thiserror::Error;
use tokio::task::AbortHandle;

/// Called with the milliseconds remaining until the countdown finishes
pub type TickCallback = Box<dyn FnMut(u64) + Send + 'static>;
/// Called once when the countdown has elapsed
pub type FinishCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("no tokio runtime available to drive the countdown")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Total duration and tick interval of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub duration: Duration,
    pub interval: Duration,
}

impl Countdown {
    pub fn from_millis(duration_ms: u64, interval_ms: u64) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            interval: Duration::from_millis(interval_ms),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

pub trait Scheduler {
    /// Start a countdown.
    ///
    /// No callback starts once the countdown has observed the cancellation. A
    /// callback already running on another thread when `cancel` is called may
    /// still complete, so callers that need a hard cutoff must guard their own
    /// state as well.
    fn schedule(
        &self,
        countdown: Countdown,
        on_tick: TickCallback,
        on_finish: FinishCallback,
    ) -> Result<CancelHandle, SchedulerError>;
}

/// Cancels a scheduled countdown. Cancelling more than once is a no-op.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    task: Option<AbortHandle>,
}

impl CancelHandle {
    /// Handle not tied to a task; the scheduler polls [`CancelHandle::is_cancelled`]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    /// Handle that also aborts the task driving the countdown
    pub fn with_task(self, task: AbortHandle) -> Self {
        Self {
            cancelled: self.cancelled,
            task: Some(task),
        }
    }

    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}
