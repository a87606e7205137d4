/*!
 * Registry Allocation
 * Tracked allocate and release
 */

use super::{free_block, Registry};
use crate::core::errors::{HeapError, HeapResult};
use crate::core::types::{Address, Size};
use crate::memory::block;
use crate::memory::traits::RawAllocator;
use tracing::{debug, error, warn};

impl<A: RawAllocator> Registry<A> {
    /// Allocate a zero-filled `size`-byte block and start tracking it
    pub fn allocate(&mut self, size: Size) -> HeapResult<Address> {
        self.ensure_active("track_allocate")?;
        self.allocate_block(size)
    }

    /// Stop tracking `addr` and release its memory
    ///
    /// Null is a no-op. An address the registry does not hold is refused and
    /// nothing is freed, which turns a double release into an error.
    pub fn release(&mut self, addr: Address) -> HeapResult<()> {
        self.ensure_active("track_release")?;

        if addr.is_null() {
            return Ok(());
        }

        if !self.index.remove(addr) {
            warn!(%addr, "Attempted to release untracked or already released block");
            return Err(HeapError::UntrackedRelease(addr));
        }

        // SAFETY: addr was indexed, so it is a live block from this allocator,
        // and it has just been removed from the index.
        let size = unsafe { free_block(&self.allocator, addr) };
        self.usage.remove_allocation(size);

        debug!(%addr, size, tracked = self.index.len(), "Released block");
        Ok(())
    }

    pub(super) fn allocate_block(&mut self, size: Size) -> HeapResult<Address> {
        let layout = block::layout_for(size)?;

        let Some(base) = self.allocator.allocate(layout) else {
            error!(requested = size, tracked = self.index.len(), "OOM: allocator refused block");
            return Err(HeapError::OutOfMemory { requested: size });
        };

        // SAFETY: base was just allocated with `layout_for(size)`.
        let addr = unsafe { block::init(base, size) };
        self.index.insert(addr);
        self.usage.add_allocation(size, self.index.len());

        debug!(%addr, size, tracked = self.index.len(), "Allocated block");
        Ok(addr)
    }
}
