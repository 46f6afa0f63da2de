//! Answer checking and multiple-choice option generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Card;
use crate::session::PracticeMode;

/// Check a submitted answer against the card's expected field.
///
/// The submitted side is trimmed; both sides are lowercased. No fuzzy
/// matching — empty or malformed input is simply incorrect.
pub fn evaluate(card: &Card, mode: PracticeMode, submitted: &str) -> bool {
    let expected = mode.expected(card);
    submitted.trim().to_lowercase() == expected.to_lowercase()
}

/// Maximum number of distractors offered alongside the correct answer.
const MAX_DISTRACTORS: usize = 3;

/// Build the option list for a multiple-choice round.
///
/// Distractors come from the answer field of every other catalog entry whose
/// text differs from the correct answer, drawn uniformly without replacement;
/// the correct answer is mixed in and the whole list shuffled.
pub fn choice_options(
    card: &Card,
    mode: PracticeMode,
    catalog: &[Card],
    rng: &mut impl Rng,
) -> Vec<String> {
    let correct = mode.expected(card);
    let pool: Vec<&str> = catalog
        .iter()
        .map(|c| mode.expected(c))
        .filter(|text| *text != correct)
        .collect();

    let mut options: Vec<String> = pool
        .choose_multiple(rng, MAX_DISTRACTORS)
        .map(|s| s.to_string())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn shi() -> Card {
        *catalog::all_cards().iter().find(|c| c.reading == "shi").unwrap()
    }

    #[test]
    fn accepts_the_exact_reading() {
        assert!(evaluate(&shi(), PracticeMode::SymbolToReading, "shi"));
        assert!(!evaluate(&shi(), PracticeMode::SymbolToReading, "chi"));
    }

    #[test]
    fn trims_and_ignores_case_on_the_submitted_side() {
        assert!(evaluate(&shi(), PracticeMode::SymbolToReading, "  SHI "));
        assert!(evaluate(&shi(), PracticeMode::SymbolToReading, "Shi"));
        assert_eq!(
            evaluate(&shi(), PracticeMode::SymbolToReading, " A "),
            evaluate(&shi(), PracticeMode::SymbolToReading, "a"),
        );
    }

    #[test]
    fn empty_input_is_just_incorrect() {
        assert!(!evaluate(&shi(), PracticeMode::SymbolToReading, ""));
        assert!(!evaluate(&shi(), PracticeMode::SymbolToReading, "   "));
    }

    #[test]
    fn reverse_mode_expects_the_symbol() {
        assert!(evaluate(&shi(), PracticeMode::ReadingToSymbol, "し"));
        assert!(!evaluate(&shi(), PracticeMode::ReadingToSymbol, "shi"));
    }

    #[test]
    fn options_contain_the_correct_answer_exactly_once() {
        let mut rng = StdRng::seed_from_u64(1);
        for card in catalog::all_cards() {
            let options =
                choice_options(card, PracticeMode::SymbolToReading, catalog::all_cards(), &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| *o == card.reading).count(), 1);

            let distinct: HashSet<&String> = options.iter().collect();
            assert_eq!(distinct.len(), options.len());
        }
    }

    #[test]
    fn options_are_deterministic_under_a_seed() {
        let card = shi();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            choice_options(&card, PracticeMode::ReadingToSymbol, catalog::all_cards(), &mut rng)
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn small_catalog_uses_all_available_distractors() {
        let tiny = &catalog::all_cards()[..3];
        let mut rng = StdRng::seed_from_u64(2);
        let options = choice_options(&tiny[0], PracticeMode::SymbolToReading, tiny, &mut rng);
        assert_eq!(options.len(), 3);
        assert!(options.contains(&tiny[0].reading.to_string()));
    }
}
