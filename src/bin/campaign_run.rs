//! Headless campaign runner
//!
//! Steps a session for a fixed number of ticks, resolving every event with
//! its first choice and optionally pressing one lane each tick, then prints
//! a JSON summary.

use clap::Parser;
use serde::Serialize;

use warring_cities::core::error::Result;
use warring_cities::core::types::{Difficulty, Lane, Outcome, Owner};
use warring_cities::session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "campaign_run")]
#[command(about = "Run a campaign headless and print a JSON summary")]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "standard")]
    difficulty: Difficulty,

    /// Maximum ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Lane to press against the weakest faction city each tick
    #[arg(long)]
    lane: Option<Lane>,

    /// Include the final snapshot in the output
    #[arg(long)]
    snapshot: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    difficulty: Difficulty,
    home_city: String,
    ticks: u64,
    outcome: Outcome,
    annexed: usize,
    cv: i64,
    events_resolved: u32,
    actions_taken: u32,
    actions_rejected: u32,
    saves: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<serde_json::Value>,
}

/// Faction city closest to its annex threshold
fn weakest_target(session: &GameSession) -> Option<String> {
    session
        .state()
        .cities
        .iter()
        .filter(|c| c.owner != Owner::Player)
        .min_by_key(|c| c.isv - c.annex_threshold())
        .map(|c| c.name.clone())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warring_cities=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut session = GameSession::new(args.seed, args.difficulty)?;

    let mut events_resolved = 0;
    let mut actions_taken = 0;
    let mut actions_rejected = 0;

    for _ in 0..args.ticks {
        if session.outcome().is_terminal() {
            break;
        }

        let first_choice = session
            .state()
            .pending_event
            .as_ref()
            .and_then(|event| event.choices.first())
            .map(|choice| choice.id.clone());
        if let Some(choice) = first_choice {
            if session.resolve_event(&choice).is_ok() {
                events_resolved += 1;
            }
        }

        if let (Some(lane), Some(target)) = (args.lane, weakest_target(&session)) {
            match session.perform_annex_action(lane, &target) {
                Ok(_) => actions_taken += 1,
                Err(_) => actions_rejected += 1,
            }
        }

        if session.manual_advance_tick().is_err() && session.outcome().is_terminal() {
            break;
        }
    }

    let snapshot = if args.snapshot {
        Some(serde_json::to_value(session.snapshot())?)
    } else {
        None
    };

    let summary = RunSummary {
        seed: args.seed,
        difficulty: args.difficulty,
        home_city: session.home_city().to_string(),
        ticks: session.state().tick,
        outcome: session.outcome(),
        annexed: session.annexed_count(),
        cv: session.state().governance.cv,
        events_resolved,
        actions_taken,
        actions_rejected,
        saves: session.saves().count(),
        snapshot,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
