/*!
 * Usage Tracking
 * Byte and operation counters kept alongside the index
 */

use crate::core::types::Size;

#[derive(Debug, Clone, Default)]
pub(super) struct UsageTracking {
    pub current_bytes: Size,
    pub peak_blocks: usize,
    pub allocation_count: u64,
    pub release_count: u64,
}

impl UsageTracking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_allocation(&mut self, size: Size, tracked_blocks: usize) {
        self.current_bytes += size;
        self.allocation_count += 1;
        if tracked_blocks > self.peak_blocks {
            self.peak_blocks = tracked_blocks;
        }
    }

    pub fn remove_allocation(&mut self, size: Size) {
        self.current_bytes = self.current_bytes.saturating_sub(size);
        self.release_count += 1;
    }
}
