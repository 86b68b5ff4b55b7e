pub mod config;
pub mod error;
pub mod types;

pub use config::SessionConfig;
pub use error::{CommandError, CommandResult, ConquestError, Result};
pub use types::{CityTier, Difficulty, Faction, Lane, Outcome, Owner, Tick};
