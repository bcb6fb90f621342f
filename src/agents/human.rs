use super::{Action, AgentKind, Decision, TurnView};
use crate::cards::format_cards;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// A person at the terminal. Each turn prints the situation and waits for a
/// single key; no answer before the deadline folds the hand.
///
/// Keys: `c` check or call, `r` raise by the configured amount, `a` all-in,
/// `f` fold. Anything else is ignored until the deadline.
#[derive(Debug, Clone)]
pub struct HumanDecision {
    timeout: Duration,
    raise_by: u64,
}

impl HumanDecision {
    pub fn new(timeout: Duration, raise_by: u64) -> Self {
        Self { timeout, raise_by }
    }

    fn prompt(&self, view: &TurnView<'_>) -> io::Result<()> {
        let mut out = io::stdout();
        let hole = view.hole.map(|h| h.to_string()).unwrap_or_else(|| "--".into());
        writeln!(out, "\nYOU HOLD {hole}   BOARD [{}]", format_cards(view.community))?;
        writeln!(
            out,
            "chips {}  bet {}  stake {}  pot {}  to call {}",
            view.chips,
            view.bet,
            view.stake,
            view.pot,
            view.to_call()
        )?;
        write!(
            out,
            "[c] {}  [r] raise {}  [a] all in  [f] fold ({}s) > ",
            if view.to_call() == 0 { "check" } else { "call" },
            self.raise_by,
            self.timeout.as_secs()
        )?;
        out.flush()
    }

    /// Wait for a key that maps to an action, until the deadline.
    fn read_action(&self, view: &TurnView<'_>) -> io::Result<Option<Action>> {
        let deadline = Instant::now() + self.timeout;
        enable_raw_mode()?;
        let result = wait_for_action(deadline, view, self.raise_by);
        disable_raw_mode()?;
        result
    }
}

fn wait_for_action(
    deadline: Instant,
    view: &TurnView<'_>,
    raise_by: u64,
) -> io::Result<Option<Action>> {
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() || !event::poll(left)? {
            return Ok(None);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = key_to_action(key.code, view, raise_by) {
                return Ok(Some(action));
            }
        }
    }
}

/// Map a key press to an action for the current turn.
///
/// ```
/// use crossterm::event::KeyCode;
/// use holdem_rs::agents::{key_to_action, Action, TurnView};
/// use holdem_rs::player::PlayerId;
///
/// let view = TurnView {
///     player: PlayerId(1),
///     chips: 100,
///     bet: 0,
///     stake: 40,
///     pot: 60,
///     community: &[],
///     hole: None,
/// };
/// assert_eq!(key_to_action(KeyCode::Char('c'), &view, 20), Some(Action::Call));
/// assert_eq!(key_to_action(KeyCode::Char('x'), &view, 20), None);
/// ```
pub fn key_to_action(code: KeyCode, view: &TurnView<'_>, raise_by: u64) -> Option<Action> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(if view.to_call() == 0 { Action::Check } else { Action::Call })
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Raise(raise_by)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::AllIn),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Action::Fold),
        _ => None,
    }
}

impl Decision for HumanDecision {
    fn get_action(&mut self, view: &TurnView<'_>) -> Action {
        if let Err(e) = self.prompt(view) {
            log::warn!("{}: cannot show prompt: {e}", view.player);
        }
        let action = match self.read_action(view) {
            Ok(Some(action)) => action,
            Ok(None) => {
                log::info!("{}: no decision within {:?}, folding", view.player, self.timeout);
                Action::Fold
            }
            Err(e) => {
                log::warn!("{}: input error ({e}), folding", view.player);
                Action::Fold
            }
        };
        println!();
        action
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}
