//! The fixed hiragana catalog.

/// One symbol/reading pair from the basic gojūon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub symbol: &'static str,
    pub reading: &'static str,
}

const fn card(symbol: &'static str, reading: &'static str) -> Card {
    Card { symbol, reading }
}

/// The 46 basic hiragana in canonical teaching order.
const CARDS: [Card; 46] = [
    card("あ", "a"),
    card("い", "i"),
    card("う", "u"),
    card("え", "e"),
    card("お", "o"),
    card("か", "ka"),
    card("き", "ki"),
    card("く", "ku"),
    card("け", "ke"),
    card("こ", "ko"),
    card("さ", "sa"),
    card("し", "shi"),
    card("す", "su"),
    card("せ", "se"),
    card("そ", "so"),
    card("た", "ta"),
    card("ち", "chi"),
    card("つ", "tsu"),
    card("て", "te"),
    card("と", "to"),
    card("な", "na"),
    card("に", "ni"),
    card("ぬ", "nu"),
    card("ね", "ne"),
    card("の", "no"),
    card("は", "ha"),
    card("ひ", "hi"),
    card("ふ", "fu"),
    card("へ", "he"),
    card("ほ", "ho"),
    card("ま", "ma"),
    card("み", "mi"),
    card("む", "mu"),
    card("め", "me"),
    card("も", "mo"),
    card("や", "ya"),
    card("ゆ", "yu"),
    card("よ", "yo"),
    card("ら", "ra"),
    card("り", "ri"),
    card("る", "ru"),
    card("れ", "re"),
    card("ろ", "ro"),
    card("わ", "wa"),
    card("を", "wo"),
    card("ん", "n"),
];

/// The full catalog in canonical order. Same slice every call.
pub fn all_cards() -> &'static [Card] {
    &CARDS
}

/// Gojūon rows for the reference chart. Labels follow the row's lead
/// consonant; the final row holds wa, wo, and the standalone n.
pub fn rows() -> impl Iterator<Item = (&'static str, &'static [Card])> {
    const ROWS: [(&str, std::ops::Range<usize>); 10] = [
        ("a-row", 0..5),
        ("ka-row", 5..10),
        ("sa-row", 10..15),
        ("ta-row", 15..20),
        ("na-row", 20..25),
        ("ha-row", 25..30),
        ("ma-row", 30..35),
        ("ya-row", 35..38),
        ("ra-row", 38..43),
        ("wa-row", 43..46),
    ];
    ROWS.into_iter().map(|(label, range)| (label, &CARDS[range]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_46_cards() {
        assert_eq!(all_cards().len(), 46);
    }

    #[test]
    fn symbols_and_readings_are_unique() {
        let symbols: HashSet<_> = all_cards().iter().map(|c| c.symbol).collect();
        let readings: HashSet<_> = all_cards().iter().map(|c| c.reading).collect();
        assert_eq!(symbols.len(), all_cards().len());
        assert_eq!(readings.len(), all_cards().len());
    }

    #[test]
    fn all_cards_is_stable() {
        assert_eq!(all_cards(), all_cards());
        assert_eq!(all_cards()[0], card("あ", "a"));
        assert_eq!(all_cards()[45], card("ん", "n"));
    }

    #[test]
    fn rows_cover_the_catalog_in_order() {
        let flattened: Vec<Card> = rows().flat_map(|(_, cards)| cards.iter().copied()).collect();
        assert_eq!(flattened, all_cards());
        assert_eq!(rows().count(), 10);
    }
}
