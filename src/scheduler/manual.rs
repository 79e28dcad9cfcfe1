use std::sync::{Arc, Mutex};

use super::{CancelHandle, Countdown, FinishCallback, Scheduler, SchedulerError, TickCallback};

struct Registration {
    countdown: Countdown,
    on_tick: TickCallback,
    on_finish: Option<FinishCallback>,
    handle: CancelHandle,
}

/// Scheduler whose callbacks fire only when a test says so
#[derive(Clone, Default)]
pub struct ManualScheduler {
    registration: Arc<Mutex<Option<Registration>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.registration
            .lock()
            .unwrap()
            .as_ref()
            .map(|r| r.countdown)
    }

    /// Fire a tick; returns false if nothing is registered or it was cancelled
    pub fn tick(&self, remaining_ms: u64) -> bool {
        let mut guard = self.registration.lock().unwrap();
        match guard.as_mut() {
            Some(r) if !r.handle.is_cancelled() && r.on_finish.is_some() => {
                (r.on_tick)(remaining_ms);
                true
            }
            _ => false,
        }
    }

    /// Fire the finish callback; only the first call after registration fires
    pub fn finish(&self) -> bool {
        let on_finish = {
            let mut guard = self.registration.lock().unwrap();
            match guard.as_mut() {
                Some(r) if !r.handle.is_cancelled() => r.on_finish.take(),
                _ => None,
            }
        };
        match on_finish {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.registration
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|r| r.handle.is_cancelled())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(
        &self,
        countdown: Countdown,
        on_tick: TickCallback,
        on_finish: FinishCallback,
    ) -> Result<CancelHandle, SchedulerError> {
        let handle = CancelHandle::new();
        *self.registration.lock().unwrap() = Some(Registration {
            countdown,
            on_tick,
            on_finish: Some(on_finish),
            handle: handle.clone(),
        });
        Ok(handle)
    }
}
