use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::Category;

/// Strategy pattern: each detector recognises one category and builds its
/// tiebreak sequence, or declines with `None`.
pub trait CategoryDetector {
    fn category(&self) -> Category;
    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten through Ace in one suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let run = analysis.straight_flush_info.run?;
        (run[0] == Rank::Ace.value()).then(|| run.to_vec())
    }
}

/// Straight Flush: five consecutive ranks, all the same suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        analysis.straight_flush_info.run.map(|run| run.to_vec())
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let quad = analysis.rank_groups.quad()?;
        let mut tb = vec![quad.value()];
        tb.extend(analysis.top_values(&[quad], 1));
        Some(tb)
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let (trips, pair) = analysis.rank_groups.full_house()?;
        Some(vec![trips.value(), pair.value()])
    }
}

/// Flush: the five highest cards of the flush suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        analysis
            .suit_info
            .is_flush()
            .then(|| analysis.suit_info.flush_ranks.iter().copied().take(5).collect())
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        analysis.straight_info.run.map(|run| run.to_vec())
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let trips = analysis.rank_groups.trips()?;
        let mut tb = vec![trips.value()];
        tb.extend(analysis.top_values(&[trips], 2));
        Some(tb)
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let pairs = analysis.rank_groups.pairs();
        let &[high, low, ..] = pairs.as_slice() else {
            return None;
        };
        let mut tb = vec![high.value(), low.value()];
        tb.extend(analysis.top_values(&[high, low], 1));
        Some(tb)
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        let pair = analysis.rank_groups.pairs().first().copied()?;
        let mut tb = vec![pair.value()];
        tb.extend(analysis.top_values(&[pair], 3));
        Some(tb)
    }
}

/// High Card: always matches as the fallback
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<u8>> {
        Some(analysis.top_values(&[], 5))
    }
}

// ============================================================================
// Static detector list (in priority order)
// ============================================================================

pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
