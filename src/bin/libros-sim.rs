//! Round simulator: plays rounds with random seats and reports the winners.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use libros::{
    AuctionHandler, DiscardAuction, Game, GameConfig, GameRng, PlayerId, PlayerMap, RandomPolicy, RotationAuction, ScoreBoard,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libros-sim")]
#[command(about = "Play rounds of libros between random seats")]
struct Args {
    /// Number of players (2-4)
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Number of rounds to play
    #[arg(short, long, default_value = "1")]
    rounds: u32,

    /// Seed of the first round; later rounds use seed + n. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Cards removed unseen after the shuffle (table default if omitted)
    #[arg(long)]
    cards_to_remove: Option<usize>,

    /// Gold cards removed per value (4 - players if omitted)
    #[arg(long)]
    gold_to_remove: Option<u32>,

    /// How the pile is distributed at round end
    #[arg(long, default_value = "rotation")]
    auction: AuctionKind,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print one JSON object per round
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AuctionKind {
    Discard,
    Rotation,
}

impl AuctionKind {
    fn handler(self) -> Box<dyn AuctionHandler> {
        match self {
            AuctionKind::Discard => Box::new(DiscardAuction),
            AuctionKind::Rotation => Box::new(RotationAuction),
        }
    }
}

#[derive(Serialize)]
struct RoundSummary {
    round: u32,
    seed: u64,
    winner: PlayerId,
    dice: libros::Dice,
    scores: ScoreBoard,
    actions: usize,
    duration_ms: f64,
}

fn play(args: &Args, round: u32, seed: u64) -> libros::Result<RoundSummary> {
    let started = Instant::now();
    let mut config = GameConfig::new(seed);
    config.cards_to_remove = args.cards_to_remove;
    config.gold_to_remove = args.gold_to_remove;

    let seats = GameRng::new(seed);
    let mut game = Game::with_config(config);
    for seat in PlayerId::all(args.players) {
        let rng = seats.for_context(&format!("seat-{}", seat.seat()));
        game.join(Box::new(RandomPolicy::from_rng(rng)))?;
    }
    game.start()?;

    let mut handler = args.auction.handler();
    let winner = game.play_round(handler.as_mut())?;

    Ok(RoundSummary {
        round,
        seed,
        winner,
        dice: *game.dice(),
        scores: game.scoreboard()?,
        actions: game.history().len(),
        duration_ms: started.elapsed().as_secs_f64() * 1000.0,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    libros::core::validate_player_count(args.players)?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(players = args.players, rounds = args.rounds, base_seed, "starting simulation");

    let mut wins: PlayerMap<u32> = PlayerMap::filled(args.players, 0);
    let mut errors = 0u32;

    for round in 1..=args.rounds {
        let seed = base_seed.wrapping_add(u64::from(round - 1));
        match play(&args, round, seed) {
            Ok(summary) => {
                wins[summary.winner] += 1;
                if args.json {
                    println!("{}", serde_json::to_string(&summary)?);
                } else {
                    let totals: Vec<String> = summary
                        .scores
                        .players
                        .iter()
                        .map(|s| format!("{}={} (gold {})", s.player.seat(), s.total, s.gold))
                        .collect();
                    println!(
                        "round {round} (seed {seed}): {} wins; scores {}",
                        summary.winner,
                        totals.join(", ")
                    );
                }
            }
            Err(e) => {
                warn!(round, seed, error = %e, "round failed");
                errors += 1;
            }
        }
    }

    if !args.json {
        println!();
        for (player, count) in wins.iter() {
            println!("{player}: {count} win(s)");
        }
        if errors > 0 {
            println!("{errors} round(s) failed");
        }
    }

    Ok(())
}
