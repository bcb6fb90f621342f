//! Agents: pluggable decision sources for seats.
//!
//! The betting engine never knows whether a bot or a person is in a seat; it
//! asks the seat's [`Decision`] for an [`Action`] and applies it to the
//! player's ledger. Bots are pure logic over the [`TurnView`]; the human
//! agent reads a key from the terminal with a bounded wait.

use crate::cards::Card;
use crate::hand::HoleCards;
use crate::player::{Player, PlayerId};
use core::fmt;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// What a decision source may choose on its turn.
///
/// `Raise(extra)` is the amount put in on top of matching the stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Check,
    Call,
    Raise(u64),
    Fold,
    AllIn,
}

/// Read-only context handed to a decision source when it is asked to act.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub player: PlayerId,
    pub chips: u64,
    pub bet: u64,
    pub stake: u64,
    pub pot: u64,
    pub community: &'a [Card],
    pub hole: Option<HoleCards>,
}

impl<'a> TurnView<'a> {
    pub fn for_player(player: &Player, stake: u64, pot: u64, community: &'a [Card]) -> Self {
        Self {
            player: player.id(),
            chips: player.chips(),
            bet: player.bet(),
            stake,
            pot,
            community,
            hole: player.hole(),
        }
    }

    /// Chips needed to match the stake.
    pub fn to_call(&self) -> u64 {
        self.stake.saturating_sub(self.bet)
    }
}

/// A seat controller that picks an action when it is the player's turn.
pub trait Decision {
    fn get_action(&mut self, view: &TurnView<'_>) -> Action;

    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}

mod bots;
mod human;

pub use bots::BotDecision;
pub use human::{key_to_action, HumanDecision};

/// A player's ledger paired with whoever decides for them.
pub struct Seat {
    pub player: Player,
    pub decision: Box<dyn Decision>,
}

impl Seat {
    pub fn new(player: Player, decision: Box<dyn Decision>) -> Self {
        Self { player, decision }
    }

    pub fn kind(&self) -> AgentKind {
        self.decision.kind()
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seat")
            .field("player", &self.player)
            .field("kind", &self.decision.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_reports_amount_to_call() {
        let mut p = Player::new(PlayerId(3), 100);
        p.call(20);
        let view = TurnView::for_player(&p, 50, 70, &[]);
        assert_eq!(view.to_call(), 30);
        assert_eq!(view.player, PlayerId(3));
        assert_eq!(view.chips, 80);
    }

    #[test]
    fn seat_reports_decision_kind() {
        let seat = Seat::new(Player::new(PlayerId(1), 10), Box::new(BotDecision::new()));
        assert_eq!(seat.kind(), AgentKind::Bot);
        assert!(format!("{seat:?}").contains("Bot"));
    }
}
