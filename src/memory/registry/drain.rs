/*!
 * Registry Drain
 * Release everything still tracked
 */

use super::{free_block, Registry};
use crate::core::errors::HeapResult;
use crate::memory::traits::RawAllocator;
use crate::memory::types::{RegistryState, ShutdownReport};
use tracing::info;

impl<A: RawAllocator> Registry<A> {
    /// Release every tracked block and every index node, then move to `Drained`
    ///
    /// Valid once. Any later call, including another shutdown, fails with
    /// [`HeapError::InvalidState`](crate::HeapError::InvalidState).
    pub fn shutdown(&mut self) -> HeapResult<ShutdownReport> {
        self.ensure_active("shutdown")?;

        let index = std::mem::take(&mut self.index);
        let allocator = &self.allocator;
        let mut report = ShutdownReport::default();

        index.drain(|addr| {
            // SAFETY: the index was moved out of the registry, so each key is a
            // live block that nothing else can reach; drain visits it once.
            let size = unsafe { free_block(allocator, addr) };
            report.released_blocks += 1;
            report.released_bytes += size;
        });

        self.usage.current_bytes = 0;
        self.usage.release_count += report.released_blocks as u64;
        self.state = RegistryState::Drained;

        info!(
            released_blocks = report.released_blocks,
            released_bytes = report.released_bytes,
            "Registry drained"
        );
        Ok(report)
    }
}
