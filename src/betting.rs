//! One street of betting.
//!
//! Players are prompted in a fixed order. Each pass visits every player who
//! can still act; a raise (or an all-in that lifts the stake) schedules one
//! more full pass so everyone else can answer it. The raiser sits out the
//! passes it opened until somebody raises over them.

use crate::agents::{Seat, TurnView};
use crate::cards::Card;

/// How a street of betting ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every pass finished; `stake` is the closing stake of the street.
    Completed { stake: u64 },
    /// Fewer than two players are still in the hand.
    HandOver,
    /// Nobody is left who could meaningfully act: the remaining board can be
    /// dealt without further betting.
    NoAction { stake: u64 },
}

fn in_hand_count(seats: &[Seat]) -> usize {
    seats.iter().filter(|s| s.player.in_hand()).count()
}

fn able_count(seats: &[Seat]) -> usize {
    seats.iter().filter(|s| s.player.can_act()).count()
}

/// True when no more than one player can act and nobody who can act owes chips.
fn nothing_to_decide(seats: &[Seat], stake: u64) -> bool {
    able_count(seats) < 2
        && seats.iter().filter(|s| s.player.can_act()).all(|s| s.player.bet() >= stake)
}

/// Run one street of betting over `seats`, prompting in `order` (indices into
/// `seats`, first to act first). Every chip a player puts in is added to `pot`.
///
/// `stake` is the opening target: the big blind pre-flop, 0 afterwards.
pub fn run_betting_round(
    seats: &mut [Seat],
    order: &[usize],
    stake: u64,
    pot: &mut u64,
    community: &[Card],
) -> RoundOutcome {
    let mut stake = stake;

    if in_hand_count(seats) < 2 {
        return RoundOutcome::HandOver;
    }
    if nothing_to_decide(seats, stake) {
        log::debug!("no betting possible, stake {stake}");
        return RoundOutcome::NoAction { stake };
    }

    for seat in seats.iter_mut().filter(|s| s.player.can_act()) {
        seat.player.last_action = None;
    }

    let mut action_rounds: u32 = 1;
    let mut last_raiser: Option<usize> = None;

    while action_rounds > 0 {
        for &i in order {
            if in_hand_count(seats) < 2 {
                log::debug!("everyone else folded");
                return RoundOutcome::HandOver;
            }
            if last_raiser == Some(i) || !seats[i].player.can_act() {
                continue;
            }
            if able_count(seats) < 2 && seats[i].player.bet() >= stake {
                continue;
            }

            let owed = seats[i].player.prompt(stake);
            let Seat { player, decision } = &mut seats[i];
            let view = TurnView::for_player(player, stake, *pot, community);
            let action = decision.get_action(&view);
            let delta = player.apply(action, stake);
            *pot += delta;

            let label = player.last_action().map_or("", |a| a.label());
            log::debug!(
                "{:<12}{:<8}{:>6}  owed {owed}  pot {}",
                player.id().to_string(),
                label,
                delta,
                *pot
            );

            if player.bet() > stake {
                stake = player.bet();
                last_raiser = Some(i);
                action_rounds += 1;
            }
        }
        action_rounds -= 1;
    }

    RoundOutcome::Completed { stake }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Action, BotDecision, Decision};
    use crate::player::{Player, PlayerId, PlayerStatus, Role};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Plays queued actions, then falls back to check/call. Records every prompt.
    struct Scripted {
        queue: VecDeque<Action>,
        prompts: Rc<RefCell<Vec<PlayerId>>>,
    }

    impl Decision for Scripted {
        fn get_action(&mut self, view: &TurnView<'_>) -> Action {
            self.prompts.borrow_mut().push(view.player);
            self.queue.pop_front().unwrap_or(if view.to_call() == 0 {
                Action::Check
            } else {
                Action::Call
            })
        }
    }

    fn table(
        chips: &[u64],
        scripts: Vec<Vec<Action>>,
    ) -> (Vec<Seat>, Rc<RefCell<Vec<PlayerId>>>) {
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let seats = chips
            .iter()
            .zip(scripts)
            .enumerate()
            .map(|(i, (&c, script))| {
                let decision = Scripted { queue: script.into(), prompts: Rc::clone(&prompts) };
                Seat::new(Player::new(PlayerId(i as u32 + 1), c), Box::new(decision))
            })
            .collect();
        (seats, prompts)
    }

    #[test]
    fn checked_around_is_one_pass() {
        let (mut seats, prompts) = table(&[100, 100, 100], vec![vec![], vec![], vec![]]);
        let mut pot = 0;
        let out = run_betting_round(&mut seats, &[0, 1, 2], 0, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::Completed { stake: 0 });
        assert_eq!(prompts.borrow().len(), 3);
        assert_eq!(pot, 0);
    }

    #[test]
    fn raise_reopens_for_everyone_but_the_raiser() {
        let (mut seats, prompts) =
            table(&[500, 500, 500, 500], vec![vec![], vec![Action::Raise(50)], vec![], vec![]]);
        let mut pot = 0;
        let out = run_betting_round(&mut seats, &[0, 1, 2, 3], 0, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::Completed { stake: 50 });
        let ids: Vec<u32> = prompts.borrow().iter().map(|p| p.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 1, 3, 4]);
        assert_eq!(pot, 200);
        assert!(seats.iter().all(|s| s.player.bet() == 50));
    }

    #[test]
    fn short_all_in_does_not_lift_the_stake() {
        let (mut seats, prompts) = table(&[30, 500, 500], vec![vec![], vec![], vec![]]);
        let mut pot = 0;
        let mut stake = 0;
        for s in seats.iter_mut().skip(1) {
            stake = s.player.post_blind(100, Role::BigBlind).max(stake);
            pot += 100;
        }
        let out = run_betting_round(&mut seats, &[0, 1, 2], stake, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::Completed { stake: 100 });
        assert_eq!(seats[0].player.status(), PlayerStatus::AllIn);
        assert_eq!(pot, 230);
        assert_eq!(prompts.borrow().len(), 3);
    }

    #[test]
    fn all_folding_ends_the_hand() {
        let (mut seats, prompts) =
            table(&[100, 100, 100], vec![
                vec![Action::Raise(20)],
                vec![Action::Fold],
                vec![Action::Fold],
            ]);
        let mut pot = 0;
        let out = run_betting_round(&mut seats, &[0, 1, 2], 0, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::HandOver);
        assert_eq!(prompts.borrow().len(), 3);
        assert_eq!(pot, 20);
    }

    #[test]
    fn lone_player_facing_bigger_all_in_is_still_prompted() {
        let (mut seats, prompts) = table(&[100, 300], vec![vec![], vec![]]);
        let mut pot = seats[0].player.all_in();
        let out = run_betting_round(&mut seats, &[0, 1], 100, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::Completed { stake: 100 });
        assert_eq!(prompts.borrow().len(), 1);
        assert_eq!(pot, 200);
    }

    #[test]
    fn no_action_when_everyone_else_is_all_in() {
        let mut seats: Vec<Seat> = (1..=2)
            .map(|i| Seat::new(Player::new(PlayerId(i), 100), Box::new(BotDecision::new())))
            .collect();
        let mut pot = seats[0].player.all_in();
        pot += seats[1].player.call(100);
        let out = run_betting_round(&mut seats, &[0, 1], 0, &mut pot, &[]);
        assert_eq!(out, RoundOutcome::NoAction { stake: 0 });
    }

    #[test]
    fn single_player_left_is_hand_over() {
        let (mut seats, _) = table(&[100, 100], vec![vec![], vec![]]);
        seats[1].player.fold();
        let mut pot = 0;
        assert_eq!(
            run_betting_round(&mut seats, &[0, 1], 0, &mut pot, &[]),
            RoundOutcome::HandOver
        );
    }
}
