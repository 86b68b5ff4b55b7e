//! Text command surface shared by the interactive hosts

use std::fmt::Write;

use crate::core::error::CommandResult;
use crate::core::types::Lane;

use super::snapshot::SessionSnapshot;
use super::GameSession;

pub const HELP: &str = "\
Commands:
  tick / t                 - Advance one tick (60s of game time)
  run <n>                  - Advance n ticks
  pause / resume           - Stop or restart the clock
  speed <1-10>             - Set the time scale
  annex <lane> <city>      - Pressure a city (lane: economic, diplomatic, war)
  choose <choice-id>       - Resolve the pending event
  save / load              - Manual save, load latest save
  status / s               - Show resources and governance
  json                     - Dump the full snapshot as JSON
  cities / c               - Show the campaign map
  log                      - Show recent log entries
  help / h                 - Show this help
  quit / q                 - Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Tick,
    Run(u32),
    Pause,
    Resume,
    Speed(i64),
    Annex(Lane, String),
    Choose(String),
    Save,
    Load,
    Status,
    Json,
    Cities,
    Log,
    Help,
    Quit,
}

/// Parse one input line. City names may contain spaces.
pub fn parse_command(input: &str) -> Result<ConsoleCommand, String> {
    let input = input.trim();
    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "tick" | "t" => ConsoleCommand::Tick,
        "run" => {
            let n = rest
                .parse::<u32>()
                .map_err(|_| "Usage: run <number>".to_string())?;
            ConsoleCommand::Run(n)
        }
        "pause" | "p" => ConsoleCommand::Pause,
        "resume" | "r" => ConsoleCommand::Resume,
        "speed" => {
            let scale = rest
                .parse::<i64>()
                .map_err(|_| "Usage: speed <1-10>".to_string())?;
            ConsoleCommand::Speed(scale)
        }
        "annex" | "a" => {
            let (lane, city) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "Usage: annex <lane> <city>".to_string())?;
            let lane = lane.parse::<Lane>().map_err(|e| e.to_string())?;
            ConsoleCommand::Annex(lane, city.trim().to_string())
        }
        "choose" => {
            if rest.is_empty() {
                return Err("Usage: choose <choice-id>".to_string());
            }
            ConsoleCommand::Choose(rest.to_string())
        }
        "save" => ConsoleCommand::Save,
        "load" => ConsoleCommand::Load,
        "status" | "s" => ConsoleCommand::Status,
        "json" => ConsoleCommand::Json,
        "cities" | "c" => ConsoleCommand::Cities,
        "log" => ConsoleCommand::Log,
        "help" | "h" | "?" => ConsoleCommand::Help,
        "quit" | "q" | "exit" => ConsoleCommand::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("Unknown command: {} (try help)", other)),
    };
    Ok(command)
}

/// Run a state-changing command. Views and `Quit` return `None`.
pub fn execute(session: &mut GameSession, command: &ConsoleCommand) -> Option<CommandResult> {
    let result = match command {
        ConsoleCommand::Tick => session.manual_advance_tick(),
        ConsoleCommand::Run(n) => {
            let mut last = Ok(String::from("Nothing to run"));
            for _ in 0..*n {
                last = session.manual_advance_tick();
                if last.is_err() {
                    break;
                }
            }
            last
        }
        ConsoleCommand::Pause => session.set_paused(true),
        ConsoleCommand::Resume => session.set_paused(false),
        ConsoleCommand::Speed(scale) => session.set_time_scale(*scale),
        ConsoleCommand::Annex(lane, city) => session.perform_annex_action(*lane, city),
        ConsoleCommand::Choose(id) => session.resolve_event(id),
        ConsoleCommand::Save => session.manual_save(),
        ConsoleCommand::Load => session.load_latest_save(),
        ConsoleCommand::Status
        | ConsoleCommand::Json
        | ConsoleCommand::Cities
        | ConsoleCommand::Log
        | ConsoleCommand::Help
        | ConsoleCommand::Quit => return None,
    };
    Some(result)
}

pub fn render_status(snap: &SessionSnapshot) -> String {
    let mut out = String::new();
    let s = &snap.session;
    let r = &snap.resources;
    let g = &snap.governance;

    let _ = writeln!(
        out,
        "Tick {} | {}m{:02}s | x{}{} | {}",
        s.tick,
        s.elapsed_seconds / 60,
        s.elapsed_seconds % 60,
        s.time_scale,
        if s.paused { " (paused)" } else { "" },
        s.outcome
    );
    let _ = writeln!(
        out,
        "Grain {} | Gold {} | Population {} | Security {} | Armament {}",
        r.grain, r.gold, r.population, r.security, r.armament
    );
    let _ = writeln!(
        out,
        "Court security {} | Morale {} | Corruption {} | CV {}/{}",
        g.security, g.morale, g.corruption, g.cv, g.cv_max
    );
    let _ = writeln!(
        out,
        "Annexed {}/{} | Next event in {}s | Saves {}",
        snap.conquest.annexed_cities,
        snap.conquest.victory_target,
        snap.event.next_in_seconds,
        snap.save.count
    );
    if snap.protection.active {
        let _ = writeln!(
            out,
            "Opening protection: {} min left",
            snap.protection.remaining_minutes
        );
    }
    if snap.event.pending {
        let _ = writeln!(out, "EVENT: {}", snap.event.title.as_deref().unwrap_or(""));
        for choice in &snap.event.choices {
            let _ = writeln!(
                out,
                "  {:<22} {} (security {:+}, morale {:+}, corruption {:+})",
                choice.id,
                choice.label,
                choice.impact.security,
                choice.impact.morale,
                choice.impact.corruption
            );
        }
    }
    out
}

pub fn render_cities(snap: &SessionSnapshot) -> String {
    let mut out = String::new();
    for city in &snap.cities {
        let _ = writeln!(
            out,
            "  {:<10} {:<8} {:<7} ISV {:>5} / {:>5}{}",
            city.name,
            city.tier.to_string(),
            city.owner.to_string(),
            city.isv,
            city.annex_threshold,
            if city.is_annexed { "  annexed" } else { "" }
        );
    }
    out
}

pub fn render_json(snap: &SessionSnapshot) -> String {
    serde_json::to_string_pretty(snap)
        .unwrap_or_else(|err| format!("Could not serialize snapshot: {}", err))
}

pub fn render_log(snap: &SessionSnapshot, limit: usize) -> String {
    let mut out = String::new();
    for entry in snap.logs.iter().take(limit) {
        let _ = writeln!(out, "  [t{:>4}] {}", entry.tick, entry.message);
    }
    out
}
