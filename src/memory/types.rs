/*!
 * Memory Types
 * Registry state and statistics
 */

use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry lifecycle: `Uninitialized -> Active -> Drained`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryState {
    Uninitialized,
    Active,
    /// Terminal; only reached through shutdown
    Drained,
}

impl RegistryState {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, RegistryState::Active)
    }
}

impl fmt::Display for RegistryState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryState::Uninitialized => write!(f, "UNINITIALIZED"),
            RegistryState::Active => write!(f, "ACTIVE"),
            RegistryState::Drained => write!(f, "DRAINED"),
        }
    }
}

/// Registry statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub state: RegistryState,
    pub tracked_blocks: usize,
    pub tracked_bytes: Size,
    pub peak_tracked_blocks: usize,
    pub total_allocations: u64,
    pub total_releases: u64,
    pub index_height: u32,
}

/// What a drain released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutdownReport {
    pub released_blocks: usize,
    pub released_bytes: Size,
}
