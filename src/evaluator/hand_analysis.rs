use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Pre-computed facts about a card set of any size.
/// Built once and shared by all category detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    /// Straight over every rank in the set.
    pub straight_info: StraightInfo,
    /// Best straight within any single flush suit; the same five cards make both.
    pub straight_flush_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut rank_counts = [0u8; 15];
        for c in cards {
            rank_counts[c.rank().value() as usize] += 1;
        }
        let values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();

        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(cards);
        let straight_info = StraightInfo::detect(&values);
        let run = suit_info
            .suited
            .iter()
            .filter_map(|(_, ranks)| StraightInfo::detect(ranks).run)
            .max();
        let straight_flush_info = StraightInfo { run };

        Self { rank_groups, suit_info, straight_info, straight_flush_info }
    }

    /// The `n` highest distinct ranks, as values.
    pub fn top_values(&self, used: &[Rank], n: usize) -> Vec<u8> {
        self.rank_groups.kickers(used, n).into_iter().map(Rank::value).collect()
    }
}
