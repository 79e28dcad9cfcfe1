use tokio::{
    runtime::Handle,
    time::{self, Instant},
};

use super::{CancelHandle, Countdown, FinishCallback, Scheduler, SchedulerError, TickCallback};

/// Runs countdowns as tasks on the current tokio runtime.
///
/// The first tick fires immediately with the full duration left, then one tick
/// per interval. When the deadline is reached `on_finish` fires instead of a
/// tick, so a 10s / 1s countdown ticks at 10000, 9000, ..., 1000 ms.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(
        &self,
        countdown: Countdown,
        on_tick: TickCallback,
        on_finish: FinishCallback,
    ) -> Result<CancelHandle, SchedulerError> {
        let runtime = Handle::try_current()?;
        let handle = CancelHandle::new();
        let task_handle = handle.clone();

        let task = runtime.spawn(async move {
            run_countdown(countdown, on_tick, on_finish, task_handle).await;
        });

        tracing::debug!(
            "Countdown scheduled: {}ms in {}ms steps",
            countdown.duration_ms(),
            countdown.interval.as_millis()
        );

        Ok(handle.with_task(task.abort_handle()))
    }
}

async fn run_countdown(
    countdown: Countdown,
    mut on_tick: TickCallback,
    on_finish: FinishCallback,
    handle: CancelHandle,
) {
    let start = Instant::now();
    let deadline = start + countdown.duration;
    let mut next = start;

    loop {
        time::sleep_until(next).await;
        if handle.is_cancelled() {
            return;
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }

        let remaining = deadline - now;
        on_tick(u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX));

        // A zero interval would spin; treat it as "finish at the deadline"
        next = if countdown.interval.is_zero() {
            deadline
        } else {
            (next + countdown.interval).min(deadline)
        };
    }

    if !handle.is_cancelled() {
        on_finish();
    }
}
