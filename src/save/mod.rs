//! Session snapshot storage (process lifetime only)

pub mod store;

pub use store::{SaveKind, SaveRecord, SaveStore};
