use crate::agents::Action;
use crate::hand::HoleCards;
use std::fmt;

/// Table-unique player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Hands out monotonically increasing ids, starting at 1. Each table owns one.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> PlayerId {
        let id = PlayerId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
}

/// Positional marker, shown next to the player in hand output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dealer,
    SmallBlind,
    BigBlind,
}

impl Role {
    pub fn tag(self) -> &'static str {
        match self {
            Role::Dealer => "DEALER",
            Role::SmallBlind => "SMALL BLIND",
            Role::BigBlind => "BIG BLIND",
        }
    }
}

/// The last ledger operation a player performed, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerAction {
    Check,
    Call,
    Raise,
    Fold,
    AllIn,
    SmallBlind,
    BigBlind,
}

impl LedgerAction {
    pub fn label(self) -> &'static str {
        match self {
            LedgerAction::Check => "CHECK",
            LedgerAction::Call => "CALL",
            LedgerAction::Raise => "RAISE",
            LedgerAction::Fold => "FOLD",
            LedgerAction::AllIn => "ALL IN",
            LedgerAction::SmallBlind => "SB",
            LedgerAction::BigBlind => "BB",
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-player betting state for one hand.
///
/// Every ledger operation returns the chips it moved from the stack into the
/// pot; the caller adds that amount to the pot. Debits are capped by the stack,
/// so a short call or raise turns into an all-in instead of going negative.
#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) chips: u64,
    pub(crate) bet: u64,
    pub(crate) stake_owed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) last_action: Option<LedgerAction>,
    pub(crate) role: Option<Role>,
}

impl Player {
    pub fn new(id: PlayerId, chips: u64) -> Self {
        Self {
            id,
            chips,
            bet: 0,
            stake_owed: 0,
            status: PlayerStatus::Active,
            hole: None,
            last_action: None,
            role: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Chips still behind, not yet in the pot.
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips put in during the current street.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Amount needed to match the stake when the player was last prompted.
    pub fn stake_owed(&self) -> u64 {
        self.stake_owed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn last_action(&self) -> Option<LedgerAction> {
        self.last_action
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        !matches!(self.status, PlayerStatus::Folded)
    }

    /// Able to take further betting actions this hand.
    pub fn can_act(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    pub(crate) fn set_hole(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    /// Record what the player owes against `stake` before asking for a decision.
    pub fn prompt(&mut self, stake: u64) -> u64 {
        self.stake_owed = stake.saturating_sub(self.bet);
        self.stake_owed
    }

    /// Stay in without adding chips. Only valid when the bet already matches the stake.
    pub fn check(&mut self) -> u64 {
        debug_assert_eq!(self.stake_owed, 0, "check while owing chips");
        self.last_action = Some(LedgerAction::Check);
        0
    }

    /// Match `stake`. A stack that cannot cover the difference goes all-in.
    pub fn call(&mut self, stake: u64) -> u64 {
        let owed = stake.saturating_sub(self.bet);
        if owed >= self.chips {
            return self.all_in();
        }
        self.chips -= owed;
        self.bet = stake;
        self.stake_owed = 0;
        self.last_action = Some(LedgerAction::Call);
        owed
    }

    /// Match `stake` and put `extra` on top; the new stake is the resulting bet.
    /// A stack that cannot cover both goes all-in.
    pub fn raise(&mut self, stake: u64, extra: u64) -> u64 {
        if extra == 0 {
            return self.call(stake);
        }
        let owed = stake.saturating_sub(self.bet);
        let total = owed.saturating_add(extra);
        if total >= self.chips {
            return self.all_in();
        }
        self.chips -= total;
        self.bet += total;
        self.stake_owed = 0;
        self.last_action = Some(LedgerAction::Raise);
        total
    }

    pub fn fold(&mut self) -> u64 {
        self.status = PlayerStatus::Folded;
        self.last_action = Some(LedgerAction::Fold);
        0
    }

    /// Push the whole stack. Returns the stack it held, which may be less than
    /// the amount owed.
    pub fn all_in(&mut self) -> u64 {
        let amount = self.chips;
        self.bet += amount;
        self.chips = 0;
        self.stake_owed = 0;
        self.status = PlayerStatus::AllIn;
        self.last_action = Some(LedgerAction::AllIn);
        amount
    }

    /// Post a forced blind of up to `amount`; a short stack goes all-in for
    /// whatever it has.
    pub fn post_blind(&mut self, amount: u64, role: Role) -> u64 {
        let paid = self.chips.min(amount);
        self.chips -= paid;
        self.bet += paid;
        if self.chips == 0 {
            self.status = PlayerStatus::AllIn;
        }
        self.last_action = Some(match role {
            Role::BigBlind => LedgerAction::BigBlind,
            _ => LedgerAction::SmallBlind,
        });
        self.role = Some(role);
        paid
    }

    /// Dispatch a decision against `stake`. A check while owing chips is taken
    /// as a call, and a call with nothing owed as a check.
    pub fn apply(&mut self, action: Action, stake: u64) -> u64 {
        let owed = stake.saturating_sub(self.bet);
        match action {
            Action::Check | Action::Call if owed == 0 => self.check_matched(),
            Action::Check | Action::Call => self.call(stake),
            Action::Raise(extra) => self.raise(stake, extra),
            Action::Fold => self.fold(),
            Action::AllIn => self.all_in(),
        }
    }

    fn check_matched(&mut self) -> u64 {
        self.stake_owed = 0;
        self.check()
    }

    /// Start a new street: bets are already in the pot.
    pub fn clear_bet(&mut self) {
        self.bet = 0;
        self.stake_owed = 0;
    }

    /// Back to a clean state for the next hand; only called for players with chips.
    pub fn reset_for_hand(&mut self) {
        self.clear_bet();
        self.status = PlayerStatus::Active;
        self.hole = None;
        self.last_action = None;
        self.role = None;
    }

    pub(crate) fn award(&mut self, amount: u64) {
        self.chips += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(chips: u64) -> Player {
        Player::new(PlayerId(1), chips)
    }

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), PlayerId(1));
        assert_eq!(ids.allocate(), PlayerId(2));
    }

    #[test]
    fn call_debits_the_difference() {
        let mut p = player(200);
        p.post_blind(20, Role::SmallBlind);
        assert_eq!(p.prompt(40), 20);
        assert_eq!(p.call(40), 20);
        assert_eq!((p.chips(), p.bet()), (160, 40));
        assert_eq!(p.last_action(), Some(LedgerAction::Call));
    }

    #[test]
    fn short_call_goes_all_in() {
        let mut p = player(30);
        assert_eq!(p.call(100), 30);
        assert_eq!(p.status(), PlayerStatus::AllIn);
        assert_eq!((p.chips(), p.bet()), (0, 30));
    }

    #[test]
    fn raise_pays_owed_plus_extra() {
        let mut p = player(500);
        p.prompt(40);
        assert_eq!(p.raise(40, 60), 100);
        assert_eq!((p.chips(), p.bet()), (400, 100));
        assert_eq!(p.last_action(), Some(LedgerAction::Raise));
    }

    #[test]
    fn raise_beyond_stack_is_all_in() {
        let mut p = player(80);
        assert_eq!(p.raise(40, 100), 80);
        assert_eq!(p.status(), PlayerStatus::AllIn);
    }

    #[test]
    fn all_in_returns_prior_stack() {
        let mut p = player(75);
        assert_eq!(p.all_in(), 75);
        assert_eq!(p.chips(), 0);
        assert_eq!(p.bet(), 75);
    }

    #[test]
    fn short_blind_forces_all_in() {
        let mut p = player(15);
        assert_eq!(p.post_blind(40, Role::BigBlind), 15);
        assert_eq!(p.status(), PlayerStatus::AllIn);
        assert_eq!(p.last_action(), Some(LedgerAction::BigBlind));
        assert_eq!(p.role(), Some(Role::BigBlind));
    }

    #[test]
    fn apply_coerces_check_and_call() {
        let mut p = player(100);
        assert_eq!(p.apply(Action::Check, 20), 20);
        assert_eq!(p.last_action(), Some(LedgerAction::Call));
        assert_eq!(p.apply(Action::Call, 20), 0);
        assert_eq!(p.last_action(), Some(LedgerAction::Check));
    }

    #[test]
    fn fold_and_reset() {
        let mut p = player(100);
        p.fold();
        assert!(!p.in_hand());
        p.reset_for_hand();
        assert!(p.can_act());
        assert_eq!(p.last_action(), None);
    }

    #[test]
    fn labels() {
        assert_eq!(LedgerAction::AllIn.to_string(), "ALL IN");
        assert_eq!(LedgerAction::SmallBlind.label(), "SB");
    }
}
