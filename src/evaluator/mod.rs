pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{showdown_cards, CommunityCards, HoleCards};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strength of the best five cards within a card set.
///
/// Ordering compares the category first and only then the tiebreak
/// sequence, lexicographically. Each category has a fixed tiebreak shape,
/// so sequences are only ever compared within one category:
///
/// | category | tiebreak |
/// |---|---|
/// | HighCard | five highest ranks |
/// | Pair | pair, three kickers |
/// | TwoPair | high pair, low pair, kicker |
/// | ThreeOfAKind | trips, two kickers |
/// | Straight, StraightFlush, RoyalFlush | the five run values (wheel ends in 1) |
/// | Flush | five highest suited ranks |
/// | FullHouse | trips, pair |
/// | FourOfAKind | quad, kicker |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandRank {
    pub category: Category,
    tiebreak: Vec<u8>,
}

impl HandRank {
    pub(crate) fn new(category: Category, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    /// Rank values breaking ties within the category, most significant first.
    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category.cmp(&other.category).then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<String> = self
            .tiebreak
            .iter()
            .map(|&v| Rank::from_value(v).map_or_else(|| v.to_string(), |r| r.to_string()))
            .collect();
        write!(f, "{} ({})", self.category, ranks.join(" "))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("at least 5 cards are needed to evaluate a hand, got {0}")]
    InsufficientCards(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Evaluate the best five-card hand within `cards` (five or more, unordered).
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{evaluate, Category};
///
/// let cards = parse_cards("9c Tc Jc Qc Kc 2d 2h").unwrap();
/// let rank = evaluate(&cards).unwrap();
/// assert_eq!(rank.category, Category::StraightFlush);
/// assert_eq!(rank.tiebreak(), &[13, 12, 11, 10, 9]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EvalError> {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    if cards.len() < 5 {
        return Err(EvalError::InsufficientCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(&dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::DuplicateCard(dup));
    }

    let analysis = HandAnalysis::new(cards);

    // First detector to match wins; HighCard always matches.
    let rank = DETECTORS
        .iter()
        .find_map(|d| d.tiebreak(&analysis).map(|tb| HandRank::new(d.category(), tb)))
        .unwrap_or_else(|| HandRank::new(Category::HighCard, analysis.top_values(&[], 5)));
    Ok(rank)
}

/// Evaluate a player's hole cards together with the board.
pub fn evaluate_holdem(hole: &HoleCards, board: &CommunityCards) -> Result<HandRank, EvalError> {
    evaluate(&showdown_cards(hole, board))
}

/// Compare two card sets by their best five-card hands.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::compare;
/// use std::cmp::Ordering;
///
/// let wheel = parse_cards("As 2d 3c 4h 5s").unwrap();
/// let six_high = parse_cards("2d 3c 4h 5s 6s").unwrap();
/// assert_eq!(compare(&wheel, &six_high).unwrap(), Ordering::Less);
/// ```
pub fn compare(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(evaluate(a)?.cmp(&evaluate(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank_of(s: &str) -> HandRank {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn fewer_than_five_cards_errors() {
        let cards = parse_cards("As Kd Qc 2h").unwrap();
        assert_eq!(evaluate(&cards), Err(EvalError::InsufficientCards(4)));
    }

    #[test]
    fn duplicate_cards_error() {
        let cards = parse_cards("As As Qc 2h 5d").unwrap();
        assert!(matches!(evaluate(&cards), Err(EvalError::DuplicateCard(_))));
    }

    #[test]
    fn every_category_with_its_tiebreak() {
        let cases: [(&str, Category, &[u8]); 10] = [
            ("Ah Kh Qh Jh Th", Category::RoyalFlush, &[14, 13, 12, 11, 10]),
            ("9s 8s 7s 6s 5s", Category::StraightFlush, &[9, 8, 7, 6, 5]),
            ("Kc Kd Kh Ks 2s", Category::FourOfAKind, &[13, 2]),
            ("Tc Td Th 2s 2h", Category::FullHouse, &[10, 2]),
            ("Ah 9h 7h 3h 2h", Category::Flush, &[14, 9, 7, 3, 2]),
            ("Ac 2d 3h 4s 5c", Category::Straight, &[5, 4, 3, 2, 1]),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind, &[12, 9, 2]),
            ("Jc Jd 9c 9h 2s", Category::TwoPair, &[11, 9, 2]),
            ("Ah Ad Ts 9c 2d", Category::Pair, &[14, 10, 9, 2]),
            ("Ah Kd 7s 5c 2d", Category::HighCard, &[14, 13, 7, 5, 2]),
        ];
        for (cards, category, tiebreak) in cases {
            let r = rank_of(cards);
            assert_eq!(r.category, category, "{cards}");
            assert_eq!(r.tiebreak(), tiebreak, "{cards}");
        }
    }

    #[test]
    fn categories_never_consult_tiebreaks() {
        // a weak two pair still beats the strongest pair
        assert!(rank_of("3c 3d 2h 2s 4c") > rank_of("Ac Ad Kh Qs Jc"));
    }

    #[test]
    fn kicker_breaks_pair_tie() {
        assert!(rank_of("Ac Ad Kh 7s 2c") > rank_of("Ah As Qh Js Tc"));
        assert_eq!(rank_of("Ac Ad Kh 7s 2c"), rank_of("Ah As Kd 7c 2d"));
    }

    #[test]
    fn display_shows_category_and_ranks() {
        assert_eq!(rank_of("Ac 2d 3h 4s 5c").to_string(), "Straight (5 4 3 2 A)");
        assert_eq!(rank_of("Jc Jd 9c 9h 2s").to_string(), "Two Pair (J 9 2)");
    }
}
