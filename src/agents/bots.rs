use super::{Action, AgentKind, Decision, TurnView};

/// The house bot: checks when its bet already matches the stake and calls
/// otherwise. It never raises or folds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotDecision;

impl BotDecision {
    pub fn new() -> Self {
        Self
    }

    fn decide(bet: u64, stake: u64) -> Action {
        if bet >= stake {
            Action::Check
        } else {
            Action::Call
        }
    }
}

impl Decision for BotDecision {
    fn get_action(&mut self, view: &TurnView<'_>) -> Action {
        Self::decide(view.bet, view.stake)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }
}
