use crate::cards::Rank;

/// Ranks grouped by how often they appear, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Build from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .map(|rank| (rank, rank_counts[rank.value() as usize]))
            .filter(|&(_, count)| count > 0)
            .collect();

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    /// Highest rank appearing four times.
    pub fn quad(&self) -> Option<Rank> {
        self.first_with(|count| count >= 4)
    }

    /// Highest rank appearing exactly three times.
    pub fn trips(&self) -> Option<Rank> {
        self.first_with(|count| count == 3)
    }

    /// Ranks appearing exactly twice, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank).collect()
    }

    /// Trips plus the best remaining rank that can fill the pair slot.
    /// With seven cards a second set of trips counts as the pair.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let trips = self.trips()?;
        let pair = self
            .groups
            .iter()
            .filter(|&&(rank, count)| rank != trips && count >= 2)
            .map(|&(rank, _)| rank)
            .max()?;
        Some((trips, pair))
    }

    /// The `n` highest ranks not in `used`, regardless of their count.
    pub fn kickers(&self, used: &[Rank], n: usize) -> Vec<Rank> {
        let mut rest: Vec<Rank> =
            self.groups.iter().map(|&(rank, _)| rank).filter(|r| !used.contains(r)).collect();
        rest.sort_by(|a, b| b.cmp(a));
        rest.truncate(n);
        rest
    }

    fn first_with(&self, pred: impl Fn(u8) -> bool) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| pred(*count)).map(|(rank, _)| *rank)
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}
