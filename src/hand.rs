use crate::cards::{format_cards, parse_cards, Card};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("community cards already hold {have}; cannot deal {dealing} more")]
    StreetOutOfOrder { have: usize, dealing: usize },
    #[error("duplicate community card {0}")]
    DuplicateCommunityCard(Card),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_rs::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Shared board cards for one hand: three on the flop, then one each on the
/// turn and river. Append-only until cleared at hand end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityCards {
    cards: Vec<Card>,
}

impl CommunityCards {
    pub const MAX: usize = 5;

    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(Self::MAX) }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Deal the flop; only valid on an empty board.
    pub fn deal_flop(&mut self, cards: &[Card]) -> Result<(), HandError> {
        self.append(0, cards, 3)
    }

    /// Deal the turn; only valid right after the flop.
    pub fn deal_turn(&mut self, card: Card) -> Result<(), HandError> {
        self.append(3, &[card], 1)
    }

    /// Deal the river; only valid right after the turn.
    pub fn deal_river(&mut self, card: Card) -> Result<(), HandError> {
        self.append(4, &[card], 1)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    fn append(
        &mut self,
        expect_have: usize,
        cards: &[Card],
        expect_len: usize,
    ) -> Result<(), HandError> {
        if self.cards.len() != expect_have || cards.len() != expect_len {
            return Err(HandError::StreetOutOfOrder {
                have: self.cards.len(),
                dealing: cards.len(),
            });
        }
        let mut seen: HashSet<Card> = self.cards.iter().copied().collect();
        for &c in cards {
            if !seen.insert(c) {
                return Err(HandError::DuplicateCommunityCard(c));
            }
        }
        self.cards.extend_from_slice(cards);
        Ok(())
    }
}

impl fmt::Display for CommunityCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cards(&self.cards))
    }
}

/// Hole cards followed by the community cards: the set evaluated at showdown.
pub fn showdown_cards(hole: &HoleCards, board: &CommunityCards) -> Vec<Card> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    cards
}
