//! Warring Cities - Entry Point
//!
//! Interactive console for a single campaign. Time only moves when the
//! player steps it; use `live_session` for the real-time clock.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use warring_cities::core::config::SessionConfig;
use warring_cities::core::error::Result;
use warring_cities::core::types::Difficulty;
use warring_cities::session::console::{
    execute, parse_command, render_cities, render_json, render_log, render_status,
    ConsoleCommand, HELP,
};
use warring_cities::session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "warring_cities")]
#[command(about = "Conquer the twelve cities before the court collapses")]
struct Args {
    /// Random seed for the campaign setup
    #[arg(long)]
    seed: Option<u64>,

    /// newbie, easy, standard or hard
    #[arg(long, default_value = "standard")]
    difficulty: Difficulty,

    /// TOML file overriding the starting state
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warring_cities=info".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let mut session = GameSession::with_config(seed, args.difficulty, &config)?;

    println!("\n=== WARRING CITIES ===");
    println!("Seed {} | {} | Home: {}", seed, args.difficulty, session.home_city());
    println!();
    println!("{}", HELP);
    println!();

    loop {
        print!("{}", render_status(&session.snapshot()));
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Status => {}
            ConsoleCommand::Json => println!("{}", render_json(&session.snapshot())),
            ConsoleCommand::Cities => print!("{}", render_cities(&session.snapshot())),
            ConsoleCommand::Log => print!("{}", render_log(&session.snapshot(), 15)),
            other => match execute(&mut session, &other) {
                Some(Ok(message)) => println!("{}", message),
                Some(Err(err)) => println!("Rejected: {}", err),
                None => {}
            },
        }
        println!();
    }

    let snap = session.snapshot();
    println!(
        "\nFarewell. {} after {} ticks, {} cities annexed.",
        snap.session.outcome, snap.session.tick, snap.conquest.annexed_cities
    );
    Ok(())
}
