//! Warring Cities - real-time territory conquest simulation

pub mod core;
pub mod roster;
pub mod rules;
pub mod save;
pub mod session;
pub mod sim;
