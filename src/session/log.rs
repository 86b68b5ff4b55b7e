use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// A line in the player-facing session log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: Tick,
    pub message: String,
}

/// Fixed-capacity log, most recent entry first.
///
/// Past capacity the oldest entry is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl SessionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, tick: Tick, message: impl Into<String>) {
        self.entries.push_front(LogEntry {
            tick,
            message: message.into(),
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries from newest to oldest
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new(crate::core::config::LOG_CAPACITY)
    }
}
