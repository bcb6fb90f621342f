use crate::agents::{BotDecision, Decision, HumanDecision, Seat};
use crate::betting::{run_betting_round, RoundOutcome};
use crate::config::{ConfigError, TableConfig};
use crate::deck::{CardSource, Deck, DeckError};
use crate::evaluator::{evaluate_holdem, EvalError, HandRank};
use crate::hand::{CommunityCards, HandError, HoleCards};
use crate::output::{HandSink, HandSummary, PlayerSnapshot, ShowdownOutcome};
use crate::player::{IdAllocator, Player, PlayerId, Role};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "PRE-FLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("a hand needs at least 2 players, {0} seated")]
    NotEnoughPlayers(usize),
    #[error("config seats {expected} players but {got} decision sources were given")]
    SeatMismatch { expected: usize, got: usize },
    #[error("hand output failed: {0}")]
    Output(#[from] io::Error),
}

/// Final standings once the table stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub hands_played: u32,
    /// The last player standing, if the game ran to the end.
    pub winner: Option<PlayerId>,
    /// Remaining players and their stacks, in seat order.
    pub standings: Vec<(PlayerId, u64)>,
}

/// A single table: seats, a card source, the pot, and the blind schedule.
pub struct Table {
    config: TableConfig,
    seats: Vec<Seat>,
    source: Box<dyn CardSource>,
    community: CommunityCards,
    pot: u64,
    small_blind: u64,
    hands_played: u32,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("seats", &self.seats)
            .field("pot", &self.pot)
            .field("small_blind", &self.small_blind)
            .field("hands_played", &self.hands_played)
            .finish()
    }
}

impl Table {
    /// Seat one player per decision source, shuffling with the configured seed.
    pub fn new(config: TableConfig, decisions: Vec<Box<dyn Decision>>) -> Result<Self, GameError> {
        let source: Box<dyn CardSource> = match config.seed {
            Some(seed) => Box::new(Deck::seeded(seed)),
            None => Box::new(Deck::fresh()),
        };
        Self::with_card_source(config, decisions, source)
    }

    /// Like [`Table::new`] with an explicit card source, e.g. a stacked deck.
    pub fn with_card_source(
        config: TableConfig,
        decisions: Vec<Box<dyn Decision>>,
        source: Box<dyn CardSource>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if decisions.len() != config.players {
            return Err(GameError::SeatMismatch { expected: config.players, got: decisions.len() });
        }
        let mut ids = IdAllocator::new();
        let seats = decisions
            .into_iter()
            .map(|decision| Seat::new(Player::new(ids.allocate(), config.buy_in), decision))
            .collect();
        Ok(Self {
            small_blind: config.small_blind,
            config,
            seats,
            source,
            community: CommunityCards::new(),
            pot: 0,
            hands_played: 0,
        })
    }

    /// Bots in every seat, except a terminal player at `human_seat` if set.
    pub fn from_config(config: TableConfig) -> Result<Self, GameError> {
        let timeout = Duration::from_millis(config.decision_timeout_ms);
        let decisions = (0..config.players)
            .map(|seat| -> Box<dyn Decision> {
                if config.human_seat == Some(seat) {
                    Box::new(HumanDecision::new(timeout, config.human_raise))
                } else {
                    Box::new(BotDecision::new())
                }
            })
            .collect();
        Self::new(config, decisions)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    pub fn community(&self) -> &CommunityCards {
        &self.community
    }

    /// Chips on the table, stacks plus pot. Constant across hands.
    pub fn total_chips(&self) -> u64 {
        self.seats.iter().map(|s| s.player.chips()).sum::<u64>() + self.pot
    }

    /// Play one hand from blinds to showdown, then remove busted players and
    /// advance the blind schedule.
    pub fn play_hand(&mut self) -> Result<HandSummary, GameError> {
        let n = self.seats.len();
        if n < 2 {
            return Err(GameError::NotEnoughPlayers(n));
        }
        let hand_number = self.hands_played + 1;
        let chips_before = self.total_chips();
        let small_blind = self.small_blind;
        let big_blind = small_blind.saturating_mul(2);

        self.source.reset();
        self.community.clear();
        for seat in &mut self.seats {
            seat.player.reset_for_hand();
        }

        let bb = self.post_blinds(small_blind, big_blind);
        // action starts after the big blind and wraps so the big blind closes
        let order: Vec<usize> = (1..=n).map(|k| (bb + k) % n).collect();
        self.deal_hole_cards()?;

        let mut outcome = self.betting(Street::Preflop, &order, big_blind);
        while outcome != RoundOutcome::HandOver && self.community.len() < CommunityCards::MAX {
            for seat in &mut self.seats {
                seat.player.clear_bet();
            }
            let street = self.deal_next_street()?;
            if !matches!(outcome, RoundOutcome::NoAction { .. }) {
                outcome = self.betting(street, &order, 0);
            }
        }

        let result = match outcome {
            RoundOutcome::HandOver => self.award_uncontested(&order),
            _ => self.showdown(&order)?,
        };

        let players = self
            .seats
            .iter()
            .map(|s| PlayerSnapshot::capture(&s.player, &self.community))
            .collect();
        let eliminated = self.remove_busted();
        self.hands_played += 1;
        self.escalate_blinds();
        debug_assert_eq!(self.total_chips(), chips_before, "chips leaked during hand");

        Ok(HandSummary {
            hand_number,
            small_blind,
            community: self.community.as_slice().to_vec(),
            players,
            pot: result.pot,
            outcome: result,
            eliminated,
        })
    }

    /// Play hands until one player is left or `max_hands` is reached,
    /// handing every summary to `sink`.
    pub fn run(&mut self, sink: &mut dyn HandSink) -> Result<GameResult, GameError> {
        while self.seats.len() > 1 {
            if self.config.max_hands.is_some_and(|max| self.hands_played >= max) {
                log::info!("stopping after {} hands", self.hands_played);
                break;
            }
            let summary = self.play_hand()?;
            sink.hand_finished(&summary)?;
        }
        let standings: Vec<(PlayerId, u64)> =
            self.seats.iter().map(|s| (s.player.id(), s.player.chips())).collect();
        let winner = match standings.as_slice() {
            [(id, _)] => Some(*id),
            _ => None,
        };
        if let Some(id) = winner {
            log::info!("{id} wins the table after {} hands", self.hands_played);
        }
        Ok(GameResult { hands_played: self.hands_played, winner, standings })
    }

    /// Mark positions and take the blinds. Returns the big blind's seat; the
    /// pre-flop stake is the full big blind even when it was posted short.
    ///
    /// The button moves one seat per hand. Heads-up the button posts the
    /// small blind and no dealer is marked.
    fn post_blinds(&mut self, small_blind: u64, big_blind: u64) -> usize {
        let n = self.seats.len();
        let button = self.hands_played as usize % n;
        let (sb, bb) = if n == 2 {
            (button, (button + 1) % n)
        } else {
            self.seats[button].player.set_role(Role::Dealer);
            ((button + 1) % n, (button + 2) % n)
        };
        let sb_paid = self.seats[sb].player.post_blind(small_blind, Role::SmallBlind);
        let bb_paid = self.seats[bb].player.post_blind(big_blind, Role::BigBlind);
        self.pot += sb_paid + bb_paid;
        log::info!(
            "hand {}: {} posts SB {sb_paid}, {} posts BB {bb_paid}",
            self.hands_played + 1,
            self.seats[sb].player.id(),
            self.seats[bb].player.id()
        );
        bb
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        for seat in &mut self.seats {
            let cards = self.source.shuffle_and_draw(2)?;
            seat.player.set_hole(HoleCards::from_slice(&cards)?);
        }
        Ok(())
    }

    /// Deal the next street onto the board: flop, then turn, then river.
    fn deal_next_street(&mut self) -> Result<Street, GameError> {
        let street = match self.community.len() {
            0 => {
                let cards = self.source.shuffle_and_draw(3)?;
                self.community.deal_flop(&cards)?;
                Street::Flop
            }
            3 => {
                let cards = self.source.shuffle_and_draw(1)?;
                self.community.deal_turn(cards[0])?;
                Street::Turn
            }
            _ => {
                let cards = self.source.shuffle_and_draw(1)?;
                self.community.deal_river(cards[0])?;
                Street::River
            }
        };
        log::debug!("{:<10}[{}]", street.label(), self.community);
        Ok(street)
    }

    fn betting(&mut self, street: Street, order: &[usize], stake: u64) -> RoundOutcome {
        let board = self.community.as_slice();
        let outcome = run_betting_round(&mut self.seats, order, stake, &mut self.pot, board);
        log::debug!("{:<10}{:?}, pot {}", street.label(), outcome, self.pot);
        outcome
    }

    /// Everyone else folded: the last player in the hand takes the pot.
    fn award_uncontested(&mut self, order: &[usize]) -> ShowdownOutcome {
        let pot = std::mem::take(&mut self.pot);
        let winner = order.iter().copied().find(|&i| self.seats[i].player.in_hand());
        let winners = match winner {
            Some(i) => {
                self.seats[i].player.award(pot);
                log::info!("{} takes {pot} uncontested", self.seats[i].player.id());
                vec![self.seats[i].player.id()]
            }
            None => Vec::new(),
        };
        ShowdownOutcome { winners, rank: None, pot }
    }

    /// Evaluate every player still in the hand; the best hand takes the whole
    /// pot. Exact ties split it, the odd chip going to the first tied player
    /// in action order. The split extends the sole-winner rule, which has no
    /// answer for ties.
    fn showdown(&mut self, order: &[usize]) -> Result<ShowdownOutcome, GameError> {
        let mut best: Option<HandRank> = None;
        let mut winners: Vec<usize> = Vec::new();
        for &i in order {
            let player = &self.seats[i].player;
            let Some(hole) = player.hole().filter(|_| player.in_hand()) else {
                continue;
            };
            let rank = evaluate_holdem(&hole, &self.community)?;
            log::debug!("{:<12}{} {}", player.id().to_string(), hole, rank);
            match best.as_ref().map(|b| rank.cmp(b)) {
                Some(std::cmp::Ordering::Less) => {}
                Some(std::cmp::Ordering::Equal) => winners.push(i),
                _ => {
                    best = Some(rank);
                    winners = vec![i];
                }
            }
        }

        let pot = std::mem::take(&mut self.pot);
        if winners.is_empty() {
            return Err(GameError::NotEnoughPlayers(0));
        }
        let share = pot / winners.len() as u64;
        let odd = pot % winners.len() as u64;
        for (k, &i) in winners.iter().enumerate() {
            let amount = if k == 0 { share + odd } else { share };
            self.seats[i].player.award(amount);
        }

        let ids: Vec<PlayerId> = winners.iter().map(|&i| self.seats[i].player.id()).collect();
        if let Some(rank) = &best {
            let names: Vec<String> = ids.iter().map(PlayerId::to_string).collect();
            log::info!("{} win {pot} with {rank}", names.join(", "));
        }
        Ok(ShowdownOutcome { winners: ids, rank: best, pot })
    }

    fn remove_busted(&mut self) -> Vec<PlayerId> {
        let busted: Vec<PlayerId> =
            self.seats.iter().filter(|s| s.player.chips() == 0).map(|s| s.player.id()).collect();
        for id in &busted {
            log::info!("{id} is out of chips");
        }
        self.seats.retain(|s| s.player.chips() > 0);
        busted
    }

    fn escalate_blinds(&mut self) {
        if self.hands_played % self.config.blind_double_every == 0 {
            self.small_blind = self.small_blind.saturating_mul(2);
            log::info!("small blind rises to {}", self.small_blind);
        }
    }
}
