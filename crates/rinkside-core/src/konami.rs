//! Konami-code easter egg detector.

use std::collections::VecDeque;

/// The key sequence, as DOM `KeyboardEvent.key` names.
pub const KONAMI_SEQUENCE: [&str; 8] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
];

/// Rolling buffer of the most recent key names.
#[derive(Debug, Clone, Default)]
pub struct KonamiListener {
    recent: VecDeque<String>,
}

impl KonamiListener {
    #[must_use]
    pub fn new() -> Self {
        Self {
            recent: VecDeque::with_capacity(KONAMI_SEQUENCE.len()),
        }
    }

    /// Record a key. Returns `true` when the buffer completes the sequence,
    /// in which case the buffer is cleared.
    pub fn push(&mut self, key: &str) -> bool {
        self.recent.push_back(key.to_string());
        if self.recent.len() > KONAMI_SEQUENCE.len() {
            self.recent.pop_front();
        }

        let matched = self.recent.len() == KONAMI_SEQUENCE.len()
            && self.recent.iter().zip(KONAMI_SEQUENCE).all(|(a, b)| a == b);
        if matched {
            self.recent.clear();
        }
        matched
    }

    /// Number of buffered keys.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.recent.len()
    }
}
