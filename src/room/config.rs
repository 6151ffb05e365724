//! Room engine configuration.

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// Resolution delays for a single room's engine.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoomConfig {
    /// Delay before a mismatch returns the revealed cards to their owners.
    pub mismatch_delay_ms: u64,

    /// Delay between the win being decided and the room tearing down.
    pub win_delay_ms: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: 4_000,
            win_delay_ms: 10_000,
        }
    }
}

impl RoomConfig {
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    #[must_use]
    pub fn win_delay(&self) -> Duration {
        Duration::from_millis(self.win_delay_ms)
    }
}
