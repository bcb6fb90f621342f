use clap::{Args, Parser, Subcommand};
use holdem_rs::cards::{format_cards, parse_cards};
use holdem_rs::config::TableConfig;
use holdem_rs::deck::{CardSource, Deck};
use holdem_rs::evaluator::{evaluate, HandRank};
use holdem_rs::game::Table;
use holdem_rs::output::TextSink;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about = "Texas Hold'em engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Play a table of bots, optionally with you in one seat")]
    Play(PlayArgs),
    #[command(about = "Rank a set of five or more cards, e.g. `As Kd Qc Jh Ts 2c`")]
    Eval {
        #[arg(required = true, num_args = 5..)]
        cards: Vec<String>,
    },
    #[command(about = "Deal a board and several hands, then list them best to worst")]
    Deal {
        #[arg(long, default_value_t = 8)]
        players: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// TOML file with table settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    players: Option<usize>,
    #[arg(long)]
    buy_in: Option<u64>,
    #[arg(long)]
    small_blind: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_hands: Option<u32>,
    /// How long the human seat may think before folding.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Seat index (from 0) played from this terminal.
    #[arg(long)]
    human: Option<usize>,
}

impl PlayArgs {
    fn resolve(&self) -> Result<TableConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => TableConfig::load(path)?,
            None => TableConfig::default(),
        };
        if let Some(v) = self.players {
            cfg.players = v;
        }
        if let Some(v) = self.buy_in {
            cfg.buy_in = v;
        }
        if let Some(v) = self.small_blind {
            cfg.small_blind = v;
        }
        if let Some(v) = self.timeout_ms {
            cfg.decision_timeout_ms = v;
        }
        cfg.seed = self.seed.or(cfg.seed);
        cfg.max_hands = self.max_hands.or(cfg.max_hands);
        cfg.human_seat = self.human.or(cfg.human_seat);
        cfg.validate()?;
        Ok(cfg)
    }
}

fn play(args: &PlayArgs) -> Result<(), Box<dyn Error>> {
    let cfg = args.resolve()?;
    log::info!(
        "{} players, buy-in {}, small blind {}",
        cfg.players,
        cfg.buy_in,
        cfg.small_blind
    );
    let mut sink = TextSink::new(io::stdout(), cfg.buy_in);
    let mut table = Table::from_config(cfg)?;
    let result = table.run(&mut sink)?;
    match result.winner {
        Some(id) => println!("{id} wins after {} hands", result.hands_played),
        None => {
            println!("stopped after {} hands", result.hands_played);
            for (id, chips) in &result.standings {
                println!("{:<12}{chips}", id.to_string());
            }
        }
    }
    Ok(())
}

fn eval(cards: &[String]) -> Result<(), Box<dyn Error>> {
    let cards = parse_cards(&cards.join(" "))?;
    let rank = evaluate(&cards)?;
    println!("{:<24}{rank}", format_cards(&cards));
    Ok(())
}

fn deal(players: usize, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let mut deck = seed.map_or_else(Deck::fresh, Deck::seeded);
    let board = deck.shuffle_and_draw(5)?;
    println!("{:#^64}", " POKER HANDS ");
    println!("\n    [{}]\n", format_cards(&board));

    let mut hands: Vec<(usize, HandRank)> = Vec::with_capacity(players);
    for seat in 1..=players {
        let hole = deck.shuffle_and_draw(2)?;
        let mut cards = board.clone();
        cards.extend_from_slice(&hole);
        let rank = evaluate(&cards)?;
        println!("    PLAYER {seat:<3} {:<8} BEST HAND = {rank}", format_cards(&hole));
        hands.push((seat, rank));
    }

    hands.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some((seat, rank)) = hands.first() {
        println!("\n    WINNER is Player {seat} with {rank}\n");
    }
    for (seat, rank) in &hands {
        println!("Player {seat:<3}: {rank}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let res = match &cli.command {
        Command::Play(args) => play(args),
        Command::Eval { cards } => eval(cards),
        Command::Deal { players, seed } => deal(*players, *seed),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
