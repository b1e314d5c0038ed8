//! euchre-solver - pick seat 0's card from its view of a euchre deal
//!
//! Describes the position with flags and prints the chosen card along with
//! the summed minimax value of every legal card.
//!
//! Usage: euchre-solver --hand "HJ HA SA CK D9" --trump H --dealer 1 --caller 2 --top S9
//!        [--kept | --discard C9] [--alone 2] [--trick "S9 ST SA D9"]... [--played "SK"]

use clap::Parser;
use euchre_solver::types::char_to_suit;
use euchre_solver::{
    choose_card, get_node_count, name_of, parse_card, parse_cards, EuchreError, Pickup, Result,
    Seat, Setup, SolverConfig, State, Suit, Trick,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "euchre-solver")]
#[command(about = "Choose a card to play from seat 0's view of a euchre deal")]
#[command(version)]
struct Args {
    /// Seat 0's remaining cards, e.g. "HJ HA SA CK D9"
    #[arg(long)]
    hand: String,

    /// Trump suit (S, H, D or C)
    #[arg(short = 't', long)]
    trump: String,

    /// Seat that dealt (0-3)
    #[arg(short = 'd', long)]
    dealer: Seat,

    /// Seat that named trump (0-3)
    #[arg(short = 'c', long)]
    caller: Seat,

    /// Card turned up on the kitty
    #[arg(long)]
    top: String,

    /// The dealer picked up the top card
    #[arg(long, conflicts_with = "discard")]
    kept: bool,

    /// Seat 0 dealt, picked up the top card and discarded this one
    #[arg(long)]
    discard: Option<String>,

    /// Seat playing alone
    #[arg(short = 'a', long)]
    alone: Option<Seat>,

    /// A completed trick, cards in play order (repeat for each trick)
    #[arg(long = "trick")]
    tricks: Vec<String>,

    /// Cards already played to the current trick
    #[arg(short = 'p', long, default_value = "")]
    played: String,

    /// Seed for sampling and random play
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Enumerate every deal at or below this many cards in hand
    #[arg(long, default_value_t = SolverConfig::default().exhaustive_limit)]
    exhaustive_limit: usize,

    /// Search sampled deals at or below this many cards in hand
    #[arg(long, default_value_t = SolverConfig::default().sample_limit)]
    sample_limit: usize,

    /// Deals to sample
    #[arg(short = 'n', long, default_value_t = SolverConfig::default().samples)]
    samples: usize,

    /// Verbose output - log search progress
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let state = build_state(args)?;
    let config = SolverConfig {
        exhaustive_limit: args.exhaustive_limit,
        sample_limit: args.sample_limit,
        samples: args.samples,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let decision = choose_card(&state, &config, &mut rng)?;

    println!(
        "Play {} (card {} of {})",
        name_of(decision.card),
        decision.index + 1,
        state.hands[0].len()
    );
    if !decision.values.is_empty() {
        for (card, value) in &decision.values {
            println!("  {}  {:+}", name_of(*card), value);
        }
        println!("{} deal(s), {} nodes", decision.worlds, get_node_count());
    }
    Ok(())
}

fn parse_suit(s: &str) -> Result<Suit> {
    let mut chars = s.trim().chars();
    match (chars.next().and_then(char_to_suit), chars.next()) {
        (Some(suit), None) => Ok(suit),
        _ => Err(EuchreError::InvalidSuit(s.to_string())),
    }
}

/// Rebuild the position: completed tricks are led in turn by the previous
/// winner, and the seat to play follows the cards of the current trick.
fn build_state(args: &Args) -> Result<State> {
    let trump = parse_suit(&args.trump)?;
    let top = parse_card(&args.top)?;
    let pickup = match (&args.discard, args.kept) {
        (Some(card), _) => Pickup::Discarded(parse_card(card)?),
        (None, true) => Pickup::Kept,
        (None, false) => Pickup::TurnedDown,
    };

    let mut setup = Setup::new(args.dealer, args.caller, top, trump, pickup);
    setup.alone = args.alone;
    setup.validate()?;

    let mut leader = setup.first_leader();
    let mut prior = Vec::with_capacity(args.tricks.len());
    for cards in &args.tricks {
        let trick = Trick::new(parse_cards(cards)?, leader, trump).with_alone(setup.alone);
        if trick.cards.len() != setup.trick_size() {
            return Err(EuchreError::InvalidState(format!(
                "trick '{}' needs {} cards",
                cards,
                setup.trick_size()
            )));
        }
        leader = trick.winner();
        prior.push(trick);
    }

    let played = parse_cards(&args.played)?;
    let mut player = leader;
    for _ in 0..played.len() {
        player = setup.next_active(player);
    }

    let state = State::from_parts(setup, player, parse_cards(&args.hand)?, played, prior);
    state.validate()?;
    Ok(state)
}
