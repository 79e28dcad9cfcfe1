use tokio::sync::watch;

/// A value that notifies its subscribers every time it is set.
///
/// Setting an equal value still counts as a change, so an observer sees every
/// write the engine makes.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify subscribers, even when nobody is listening yet
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Receiver that starts at the current value and wakes on every later `set`
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
