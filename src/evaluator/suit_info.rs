use crate::cards::{Card, Suit};

/// Flush detection over any number of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitInfo {
    /// The suit whose top five ranks make the best flush.
    pub flush_suit: Option<Suit>,
    /// Rank values of every card in `flush_suit`, highest first.
    pub flush_ranks: Vec<u8>,
    /// Rank values, highest first, of every suit holding five or more cards.
    /// Only large sets reach two entries.
    pub suited: Vec<(Suit, Vec<u8>)>,
}

impl SuitInfo {
    /// A suit holding five or more of the cards makes a flush.
    pub fn detect(cards: &[Card]) -> Self {
        let suited: Vec<(Suit, Vec<u8>)> = Suit::ALL
            .iter()
            .map(|&suit| {
                let mut ranks: Vec<u8> =
                    cards.iter().filter(|c| c.suit() == suit).map(|c| c.rank().value()).collect();
                ranks.sort_unstable_by(|a, b| b.cmp(a));
                (suit, ranks)
            })
            .filter(|(_, ranks)| ranks.len() >= 5)
            .collect();

        let best = suited.iter().max_by(|a, b| a.1[..5].cmp(&b.1[..5]));
        let (flush_suit, flush_ranks) = match best {
            Some((suit, ranks)) => (Some(*suit), ranks.clone()),
            None => (None, Vec::new()),
        };

        Self { flush_suit, flush_ranks, suited }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }
}
