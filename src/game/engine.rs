use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    config::GameConfig,
    game::{observable::Observable, words::WordQueue},
    models::{CountdownState, GameSnapshot},
    scheduler::{CancelHandle, Scheduler, SchedulerError},
    utils::time::{format_elapsed_time, millis_to_seconds},
};

/// Receivers for every state channel the presentation layer renders
#[derive(Debug, Clone)]
pub struct GameObservers {
    pub word: watch::Receiver<String>,
    pub score: watch::Receiver<i32>,
    pub time_left: watch::Receiver<u32>,
    pub time_left_text: watch::Receiver<String>,
    pub game_finished: watch::Receiver<bool>,
}

/// Everything the engine mutates. Only ever touched through the engine's mutex,
/// so intents and countdown callbacks are applied one at a time.
#[derive(Debug)]
struct EngineState {
    session_id: Uuid,
    words: WordQueue,
    word: Observable<String>,
    score: Observable<i32>,
    time_left: Observable<u32>,
    time_left_text: Observable<String>,
    game_finished: Observable<bool>,
    countdown: CountdownState,
}

impl EngineState {
    fn new(session_id: Uuid, words: WordQueue, countdown_ms: u64) -> Self {
        let seconds = millis_to_seconds(countdown_ms);
        Self {
            session_id,
            words,
            word: Observable::new(String::new()),
            score: Observable::new(0),
            time_left: Observable::new(seconds),
            time_left_text: Observable::new(format_elapsed_time(seconds.into())),
            game_finished: Observable::new(false),
            countdown: CountdownState::Running,
        }
    }

    fn is_disposed(&self, operation: &str) -> bool {
        if self.countdown == CountdownState::Disposed {
            tracing::debug!(
                session = %self.session_id,
                "Ignoring {} on disposed game",
                operation
            );
            return true;
        }
        false
    }

    fn set_time_left(&self, seconds: u32) {
        self.time_left.set(seconds);
        self.time_left_text.set(format_elapsed_time(seconds.into()));
    }

    fn advance_word(&mut self) {
        let next = self.words.next_word();
        self.word.set(next.to_string());
    }

    fn change_score(&mut self, delta: i32, operation: &str) {
        if self.is_disposed(operation) {
            return;
        }
        let score = self.score.get().saturating_add(delta);
        self.score.set(score);
        self.advance_word();
    }

    fn tick(&mut self, remaining_ms: u64) {
        if self.is_disposed("tick") {
            return;
        }
        if self.countdown == CountdownState::Finished {
            tracing::debug!(session = %self.session_id, "Ignoring tick after finish");
            return;
        }
        let seconds = millis_to_seconds(remaining_ms);
        self.set_time_left(seconds);
        tracing::debug!(session = %self.session_id, "Tick: {}s left", seconds);
    }

    fn finish(&mut self) {
        if self.is_disposed("finish") {
            return;
        }
        if self.countdown == CountdownState::Finished {
            tracing::debug!(session = %self.session_id, "Ignoring repeated finish");
            return;
        }
        self.countdown = CountdownState::Finished;
        self.set_time_left(0);
        self.game_finished.set(true);
        tracing::info!(
            session = %self.session_id,
            "Game finished with score {}",
            self.score.get()
        );
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            session_id: self.session_id,
            word: self.word.get(),
            score: self.score.get(),
            time_left: self.time_left.get(),
            time_left_text: self.time_left_text.get(),
            game_finished: self.game_finished.get(),
            countdown: self.countdown,
        }
    }
}

fn lock(state: &Mutex<EngineState>) -> MutexGuard<'_, EngineState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timed word-guessing game.
///
/// Owns the word queue, score and countdown. State is published through
/// [`GameObservers`]; the presentation layer forwards skip/correct intents,
/// acknowledges the end of the game, and disposes the engine when done.
/// Dropping the engine disposes it too.
pub struct GameEngine {
    state: Arc<Mutex<EngineState>>,
    timer: Mutex<Option<CancelHandle>>,
}

impl GameEngine {
    pub fn new(config: &GameConfig, scheduler: &dyn Scheduler) -> Result<Self, SchedulerError> {
        let words = match config.word_shuffle_seed {
            Some(seed) => WordQueue::with_seed(seed),
            None => WordQueue::new(),
        };
        Self::with_words(config, words, scheduler)
    }

    /// Start a game drawing from `words`, which its constructor has already shuffled
    pub fn with_words(
        config: &GameConfig,
        words: WordQueue,
        scheduler: &dyn Scheduler,
    ) -> Result<Self, SchedulerError> {
        let session_id = Uuid::new_v4();
        let mut state = EngineState::new(session_id, words, config.countdown_time_ms);
        state.advance_word();

        let state = Arc::new(Mutex::new(state));

        // Callbacks hold a weak reference so a running timer never keeps a
        // dropped engine alive
        let tick_state = Arc::downgrade(&state);
        let finish_state = Arc::downgrade(&state);
        let handle = scheduler.schedule(
            config.countdown(),
            Box::new(move |remaining_ms| with_state(&tick_state, |s| s.tick(remaining_ms))),
            Box::new(move || with_state(&finish_state, EngineState::finish)),
        )?;

        tracing::info!(
            session = %session_id,
            "Game started: {}ms countdown",
            config.countdown_time_ms
        );

        Ok(Self {
            state,
            timer: Mutex::new(Some(handle)),
        })
    }

    /// Player skipped the word: one point off, next word
    pub fn on_skip(&self) {
        lock(&self.state).change_score(-1, "skip");
    }

    /// Player guessed the word: one point on, next word
    pub fn on_correct(&self) {
        lock(&self.state).change_score(1, "correct");
    }

    pub fn on_tick(&self, remaining_ms: u64) {
        lock(&self.state).tick(remaining_ms);
    }

    pub fn on_finish(&self) {
        lock(&self.state).finish();
    }

    /// Clear the finished flag once the consumer has reacted to it
    pub fn acknowledge_finish(&self) {
        let state = lock(&self.state);
        if state.is_disposed("acknowledge_finish") {
            return;
        }
        state.game_finished.set(false);
    }

    /// Cancel the countdown. Every later call on the engine is ignored.
    pub fn dispose(&self) {
        let mut state = lock(&self.state);
        if state.countdown == CountdownState::Disposed {
            return;
        }
        state.countdown = CountdownState::Disposed;

        let handle = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.cancel();
        }

        tracing::info!(session = %state.session_id, "Game disposed");
    }

    pub fn session_id(&self) -> Uuid {
        lock(&self.state).session_id
    }

    pub fn word(&self) -> String {
        lock(&self.state).word.get()
    }

    pub fn score(&self) -> i32 {
        lock(&self.state).score.get()
    }

    pub fn time_left(&self) -> u32 {
        lock(&self.state).time_left.get()
    }

    /// Time left as `MM:SS`
    pub fn time_left_text(&self) -> String {
        lock(&self.state).time_left_text.get()
    }

    pub fn is_game_finished(&self) -> bool {
        lock(&self.state).game_finished.get()
    }

    pub fn countdown_state(&self) -> CountdownState {
        lock(&self.state).countdown
    }

    pub fn snapshot(&self) -> GameSnapshot {
        lock(&self.state).snapshot()
    }

    pub fn subscribe(&self) -> GameObservers {
        let state = lock(&self.state);
        GameObservers {
            word: state.word.subscribe(),
            score: state.score.subscribe(),
            time_left: state.time_left.subscribe(),
            time_left_text: state.time_left_text.subscribe(),
            game_finished: state.game_finished.subscribe(),
        }
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn with_state(state: &Weak<Mutex<EngineState>>, f: impl FnOnce(&mut EngineState)) {
    if let Some(state) = state.upgrade() {
        let mut guard = lock(&state);
        f(&mut *guard);
    }
}
