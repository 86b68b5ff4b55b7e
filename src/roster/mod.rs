//! City roster and new-game setup
//!
//! Static data consumed by a session at creation time.

pub mod cities;
pub mod setup;

pub use cities::{city_tier, CityConfig, CITIES};
pub use setup::{create_new_game, NewGame};
