/// The highest five-card run among a set of rank values, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    /// Run values, highest first. The wheel is `[5, 4, 3, 2, 1]`.
    pub run: Option<[u8; 5]>,
}

impl StraightInfo {
    /// Detect a straight from rank values in any order, duplicates allowed.
    /// Handles the wheel (A-2-3-4-5) by letting the Ace play as 1.
    pub fn detect(values: &[u8]) -> Self {
        let mut distinct: Vec<u8> = values.to_vec();
        distinct.sort_unstable_by(|a, b| b.cmp(a));
        distinct.dedup();

        // distinct values strictly decrease, so a span of 4 over 5 entries is a run
        let run = distinct
            .windows(5)
            .find(|w| w[0] - w[4] == 4)
            .map(|w| [w[0], w[1], w[2], w[3], w[4]])
            .or_else(|| {
                let wheel = [14u8, 5, 4, 3, 2];
                wheel.iter().all(|v| distinct.contains(v)).then_some([5, 4, 3, 2, 1])
            });

        Self { run }
    }

    pub fn is_straight(&self) -> bool {
        self.run.is_some()
    }

    pub fn top(&self) -> Option<u8> {
        self.run.map(|r| r[0])
    }
}
