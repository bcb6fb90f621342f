//! Hand summaries and the sinks that receive them.

use crate::cards::{format_cards, Card};
use crate::evaluator::{evaluate_holdem, HandRank};
use crate::hand::{CommunityCards, HoleCards};
use crate::player::{LedgerAction, Player, PlayerId, PlayerStatus, Role};
use std::io::{self, Write};

/// A player's state at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub chips: u64,
    pub bet: u64,
    pub status: PlayerStatus,
    pub hole: Option<HoleCards>,
    pub last_action: Option<LedgerAction>,
    pub role: Option<Role>,
    /// Best hand with the final board; `None` before five cards are out.
    pub best: Option<HandRank>,
}

impl PlayerSnapshot {
    pub fn capture(player: &Player, board: &CommunityCards) -> Self {
        let best = match player.hole() {
            Some(hole) if board.len() == CommunityCards::MAX => evaluate_holdem(&hole, board).ok(),
            _ => None,
        };
        Self {
            id: player.id(),
            chips: player.chips(),
            bet: player.bet(),
            status: player.status(),
            hole: player.hole(),
            last_action: player.last_action(),
            role: player.role(),
            best,
        }
    }
}

/// Who took the pot and with what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownOutcome {
    /// Winning players in action order; more than one means a split pot.
    pub winners: Vec<PlayerId>,
    /// Winning hand; `None` when everyone else folded.
    pub rank: Option<HandRank>,
    pub pot: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_number: u32,
    pub small_blind: u64,
    pub community: Vec<Card>,
    pub players: Vec<PlayerSnapshot>,
    pub pot: u64,
    pub outcome: ShowdownOutcome,
    /// Players removed with an empty stack after this hand.
    pub eliminated: Vec<PlayerId>,
}

/// Receives every finished hand.
pub trait HandSink {
    fn hand_finished(&mut self, summary: &HandSummary) -> io::Result<()>;
}

/// Collects summaries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub hands: Vec<HandSummary>,
}

impl HandSink for MemorySink {
    fn hand_finished(&mut self, summary: &HandSummary) -> io::Result<()> {
        self.hands.push(summary.clone());
        Ok(())
    }
}

/// Writes a plain-text table after each hand.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
    buy_in: u64,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, buy_in: u64) -> Self {
        Self { out, buy_in }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HandSink for TextSink<W> {
    fn hand_finished(&mut self, s: &HandSummary) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "{:=^48}", format!(" HAND {} ", s.hand_number))?;
        writeln!(
            out,
            "{:<16}{:<16}{:<16}",
            format!("BUY IN: {}", self.buy_in),
            format!("SMALL BLIND: {}", s.small_blind),
            format!("POT: {}", s.pot)
        )?;
        writeln!(out, "COMMUNITY: [{}]", format_cards(&s.community))?;
        writeln!(out)?;
        for p in &s.players {
            let tag = p.role.map(|r| format!(" ({})", r.tag())).unwrap_or_default();
            writeln!(out, "{}{}", p.id, tag)?;
            let cards = p.hole.map(|h| h.to_string()).unwrap_or_else(|| "--".into());
            let action = p.last_action.map_or("", |a| a.label());
            writeln!(
                out,
                "  {:<10}{:<12}{:<10}{}",
                cards,
                format!("chips {}", p.chips),
                action,
                format!("bet {}", p.bet)
            )?;
            if let Some(best) = &p.best {
                writeln!(out, "  {best}")?;
            }
        }
        writeln!(out)?;
        let names: Vec<String> = s.outcome.winners.iter().map(PlayerId::to_string).collect();
        let verb = if s.outcome.winners.len() > 1 { "SPLIT" } else { "WINNER" };
        match &s.outcome.rank {
            Some(rank) => {
                writeln!(out, "{verb}: {} with {rank}, pot {}", names.join(", "), s.outcome.pot)?
            }
            None => {
                writeln!(out, "{verb}: {} (uncontested), pot {}", names.join(", "), s.outcome.pot)?
            }
        }
        for id in &s.eliminated {
            writeln!(out, "{id} is out")?;
        }
        writeln!(out)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::evaluate;

    fn summary() -> HandSummary {
        let community = parse_cards("Ah Kh Qh Jh 2c").unwrap();
        let rank = evaluate(&parse_cards("Th 3d Ah Kh Qh Jh 2c").unwrap()).unwrap();
        HandSummary {
            hand_number: 4,
            small_blind: 40,
            community,
            players: vec![PlayerSnapshot {
                id: PlayerId(2),
                chips: 480,
                bet: 0,
                status: PlayerStatus::Active,
                hole: Some("Th 3d".parse().unwrap()),
                last_action: Some(LedgerAction::Check),
                role: Some(Role::Dealer),
                best: Some(rank.clone()),
            }],
            pot: 240,
            outcome: ShowdownOutcome { winners: vec![PlayerId(2)], rank: Some(rank), pot: 240 },
            eliminated: vec![PlayerId(5)],
        }
    }

    #[test]
    fn text_sink_renders_table() {
        let mut sink = TextSink::new(Vec::new(), 200);
        sink.hand_finished(&summary()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("HAND 4"));
        assert!(text.contains("SMALL BLIND: 40"));
        assert!(text.contains("COMMUNITY: [Ah Kh Qh Jh 2c]"));
        assert!(text.contains("Player 2 (DEALER)"));
        assert!(text.contains("WINNER: Player 2 with Royal Flush (A K Q J T), pot 240"));
        assert!(text.contains("Player 5 is out"));
    }

    #[test]
    fn memory_sink_keeps_everything() {
        let mut sink = MemorySink::default();
        sink.hand_finished(&summary()).unwrap();
        sink.hand_finished(&summary()).unwrap();
        assert_eq!(sink.hands.len(), 2);
    }
}
