//! Real-time session host
//!
//! Drives the wall clock once per real second while reading commands from
//! stdin. Both feed the same session from one task, so they never race.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use warring_cities::core::config::SessionConfig;
use warring_cities::core::error::Result;
use warring_cities::core::types::Difficulty;
use warring_cities::session::console::{
    execute, parse_command, render_cities, render_json, render_log, render_status,
    ConsoleCommand, HELP,
};
use warring_cities::session::GameSession;

#[derive(Parser, Debug)]
#[command(name = "live_session")]
#[command(about = "Play a campaign against the running clock")]
struct Args {
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "standard")]
    difficulty: Difficulty,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Real milliseconds between clock pulses
    #[arg(long, default_value_t = 1000)]
    pulse_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
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

    tracing::info!(seed, home = session.home_city(), "Live session started");
    println!("{}", HELP);
    print!("{}", render_status(&session.snapshot()));

    let mut pulse = interval(Duration::from_millis(args.pulse_ms.max(1)));
    pulse.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_pulse = Instant::now();
    let mut last_tick = session.state().tick;

    loop {
        tokio::select! {
            _ = pulse.tick() => {
                let now = Instant::now();
                session.advance_wall_clock(now - last_pulse);
                last_pulse = now;

                let snap = session.snapshot();
                if snap.session.tick != last_tick {
                    last_tick = snap.session.tick;
                    print!("{}", render_status(&snap));
                }
                if snap.session.outcome.is_terminal() {
                    println!("Campaign over: {}", snap.session.outcome);
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match parse_command(&line) {
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
                    ConsoleCommand::Status => print!("{}", render_status(&session.snapshot())),
                    ConsoleCommand::Json => println!("{}", render_json(&session.snapshot())),
                    ConsoleCommand::Cities => print!("{}", render_cities(&session.snapshot())),
                    ConsoleCommand::Log => print!("{}", render_log(&session.snapshot(), 15)),
                    other => match execute(&mut session, &other) {
                        Some(Ok(message)) => println!("{}", message),
                        Some(Err(err)) => println!("Rejected: {}", err),
                        None => {}
                    },
                }
            }
        }
    }

    tracing::info!(
        tick = session.state().tick,
        outcome = %session.outcome(),
        "Live session ended"
    );
    Ok(())
}
