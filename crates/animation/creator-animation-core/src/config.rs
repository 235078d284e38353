//! Core configuration for creator-animation-core.

use serde::{Deserialize, Serialize};

/// Configuration for registry sizing and event backpressure.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the active player table.
    pub player_capacity: usize,
    /// Initial capacity hint for registered animation entries.
    pub entry_capacity: usize,

    /// Maximum events retained between two `drain_events` calls. Further events
    /// are dropped (and logged) until the host drains.
    pub max_pending_events: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_capacity: 16,
            entry_capacity: 32,
            max_pending_events: 1024,
        }
    }
}
