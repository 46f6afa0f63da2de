//! Practice session state: queue, counters, mode.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{self, Card};

/// Which card field is the prompt and which is the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeMode {
    SymbolToReading,
    ReadingToSymbol,
}

impl PracticeMode {
    pub fn prompt<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::SymbolToReading => card.symbol,
            Self::ReadingToSymbol => card.reading,
        }
    }

    pub fn expected<'a>(&self, card: &'a Card) -> &'a str {
        match self {
            Self::SymbolToReading => card.reading,
            Self::ReadingToSymbol => card.symbol,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SymbolToReading => "Hiragana → Romaji",
            Self::ReadingToSymbol => "Romaji → Hiragana",
        }
    }

    /// Label for the free-answer input field.
    pub fn answer_label(&self) -> &'static str {
        match self {
            Self::SymbolToReading => "Romaji",
            Self::ReadingToSymbol => "Hiragana",
        }
    }
}

/// One full pass over the shuffled catalog in a chosen mode.
///
/// Cards are consumed front-to-back; an empty queue means the session is
/// finished. Counters only track this session; lifetime statistics live in
/// [`crate::stats::StatsStore`].
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: PracticeMode,
    queue: Vec<Card>,
    pub correct: u32,
    pub total: u32,
}

impl Session {
    /// Start a session over the full catalog, uniformly shuffled.
    pub fn start(mode: PracticeMode, rng: &mut impl Rng) -> Self {
        let mut queue: Vec<Card> = catalog::all_cards().to_vec();
        queue.shuffle(rng);
        // Consumed from the back; reverse so iteration order matches the shuffle.
        queue.reverse();
        Self {
            mode,
            queue,
            correct: 0,
            total: 0,
        }
    }

    /// Draw the next card, or `None` when the queue is drained.
    pub fn next_card(&mut self) -> Option<Card> {
        self.queue.pop()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cards still waiting in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Record the outcome of one answered card.
    pub fn record_result(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    /// Session accuracy in [0, 1]; 0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.total)
        }
    }

    /// Re-enter the session with a fresh shuffle and zeroed counters.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        *self = Self::start(self.mode, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn start_queues_every_card_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::start(PracticeMode::SymbolToReading, &mut rng);

        let mut seen = HashSet::new();
        while let Some(card) = session.next_card() {
            assert!(seen.insert(card.symbol), "duplicate card {}", card.symbol);
        }
        assert_eq!(seen.len(), catalog::all_cards().len());
        assert!(session.is_finished());
        assert!(session.next_card().is_none());
    }

    #[test]
    fn shuffle_is_deterministic_under_a_seed() {
        let order = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Session::start(PracticeMode::ReadingToSymbol, &mut rng);
            let mut v = Vec::new();
            while let Some(c) = s.next_card() {
                v.push(c.symbol);
            }
            v
        };
        assert_eq!(order(42), order(42));
        assert_ne!(order(42), order(43));
    }

    #[test]
    fn record_result_tracks_counters() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = Session::start(PracticeMode::SymbolToReading, &mut rng);
        session.record_result(true);
        session.record_result(false);
        session.record_result(true);
        assert_eq!(session.correct, 2);
        assert_eq!(session.total, 3);
        assert!((session.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn accuracy_is_zero_with_no_answers() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = Session::start(PracticeMode::SymbolToReading, &mut rng);
        assert_eq!(session.accuracy(), 0.0);
    }

    #[test]
    fn restart_reshuffles_and_resets() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::start(PracticeMode::SymbolToReading, &mut rng);
        session.next_card();
        session.record_result(true);

        session.restart(&mut rng);
        assert_eq!(session.total, 0);
        assert_eq!(session.correct, 0);
        assert_eq!(session.remaining(), catalog::all_cards().len());
        assert_eq!(session.mode, PracticeMode::SymbolToReading);
    }

    #[test]
    fn mode_selects_prompt_and_expected_fields() {
        let card = catalog::all_cards()[0];
        assert_eq!(PracticeMode::SymbolToReading.prompt(&card), "あ");
        assert_eq!(PracticeMode::SymbolToReading.expected(&card), "a");
        assert_eq!(PracticeMode::ReadingToSymbol.prompt(&card), "a");
        assert_eq!(PracticeMode::ReadingToSymbol.expected(&card), "あ");
    }
}
