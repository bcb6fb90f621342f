//! holdem-rs: a Texas Hold'em engine
//!
//! Goals:
//! - Deterministic, total-order hand evaluation over five to seven cards
//! - A chip ledger and betting-round state machine that never loses a chip
//! - Pluggable decision sources (bots, a terminal player) behind one trait
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_rs::cards::parse_cards;
//! use holdem_rs::evaluator::{evaluate_holdem, Category};
//! use holdem_rs::hand::{CommunityCards, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let mut board = CommunityCards::new();
//! board.deal_flop(&parse_cards("Kc Qd Jh").unwrap()).unwrap();
//! board.deal_turn("3s".parse().unwrap()).unwrap();
//! board.deal_river("2c".parse().unwrap()).unwrap();
//!
//! let rank = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(rank.category, Category::Pair);
//! assert_eq!(rank.tiebreak(), &[14, 13, 12, 11]);
//! ```
//!
//! ## Quick start: run a table of bots
//! ```
//! use holdem_rs::config::TableConfig;
//! use holdem_rs::game::Table;
//! use holdem_rs::output::MemorySink;
//!
//! let config =
//!     TableConfig { players: 4, seed: Some(42), max_hands: Some(5), ..TableConfig::default() };
//! let mut table = Table::from_config(config).unwrap();
//! let mut sink = MemorySink::default();
//! let result = table.run(&mut sink).unwrap();
//! assert_eq!(result.hands_played as usize, sink.hands.len());
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin holdem -- play --players 6 --seed 7
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod output;
pub mod player;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
