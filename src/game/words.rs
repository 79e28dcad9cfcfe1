use std::collections::VecDeque;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Fixed vocabulary every shuffled pass is drawn from
pub const VOCABULARY: [&str; 21] = [
    "queen",
    "hospital",
    "basketball",
    "cat",
    "change",
    "snail",
    "soup",
    "calendar",
    "sad",
    "desk",
    "guitar",
    "home",
    "railway",
    "zebra",
    "jelly",
    "car",
    "crow",
    "trade",
    "bag",
    "roll",
    "bubble",
];

/// Check whether a word belongs to the fixed vocabulary
pub fn is_vocabulary_word(word: &str) -> bool {
    VOCABULARY.contains(&word)
}

/// Shuffled queue of words. The front is the next word to guess.
///
/// Draws until the current pass is exhausted, then refills from the full
/// vocabulary and reshuffles, so every word appears exactly once per pass.
#[derive(Debug)]
pub struct WordQueue {
    words: VecDeque<&'static str>,
    rng: StdRng,
}

impl WordQueue {
    /// Create a queue shuffled from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a queue with a fixed shuffle seed (reproducible word order)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut queue = Self {
            words: VecDeque::with_capacity(VOCABULARY.len()),
            rng,
        };
        queue.reset();
        queue
    }

    /// Replace the queue with the full vocabulary in a new random order
    pub fn reset(&mut self) {
        let mut words = VOCABULARY.to_vec();
        words.shuffle(&mut self.rng);
        self.words = words.into();
    }

    /// Remove and return the front word, refilling first if the pass is exhausted
    pub fn next_word(&mut self) -> &'static str {
        if self.words.is_empty() {
            tracing::debug!("Word queue exhausted, reshuffling vocabulary");
            self.reset();
        }

        // reset() always leaves VOCABULARY.len() words behind
        self.words.pop_front().unwrap_or(VOCABULARY[0])
    }

    /// Words left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

impl Default for WordQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabulary_has_21_unique_words() {
        let unique: HashSet<_> = VOCABULARY.iter().collect();
        assert_eq!(VOCABULARY.len(), 21);
        assert_eq!(unique.len(), 21);
    }

    #[test]
    fn test_new_queue_is_full() {
        let queue = WordQueue::with_seed(7);
        assert_eq!(queue.remaining(), VOCABULARY.len());
    }

    #[test]
    fn test_every_word_once_per_pass() {
        let mut queue = WordQueue::with_seed(42);

        for pass in 0..3 {
            let drawn: HashSet<_> = (0..VOCABULARY.len()).map(|_| queue.next_word()).collect();
            assert_eq!(
                drawn.len(),
                VOCABULARY.len(),
                "Pass {} should serve every vocabulary word exactly once",
                pass
            );
            assert_eq!(queue.remaining(), 0);
        }
    }

    #[test]
    fn test_exhausted_queue_refills_on_draw() {
        let mut queue = WordQueue::with_seed(1);
        for _ in 0..VOCABULARY.len() {
            queue.next_word();
        }
        assert_eq!(queue.remaining(), 0);

        let word = queue.next_word();
        assert!(is_vocabulary_word(word));
        assert_eq!(queue.remaining(), VOCABULARY.len() - 1);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = WordQueue::with_seed(99);
        let mut b = WordQueue::with_seed(99);
        for _ in 0..VOCABULARY.len() * 2 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_reset_restores_full_vocabulary() {
        let mut queue = WordQueue::with_seed(3);
        queue.next_word();
        queue.next_word();
        queue.reset();
        assert_eq!(queue.remaining(), VOCABULARY.len());
    }
}
