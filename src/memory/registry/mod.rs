/*!
 * Allocation Registry
 *
 * Owns every block allocated through it and indexes the blocks by address in
 * an [`AddressSet`]. Whatever is still tracked when the registry is shut down
 * (or dropped while active) is released in one post-order pass over the index.
 *
 * ## Operations
 *
 * - **allocate**: raw allocation + index insert
 * - **release**: index remove + raw release (untracked addresses are refused)
 * - **duplicate**: allocate + copy from a tracked source
 * - **resize**: duplicate + release of the source
 * - **shutdown**: drain the index, releasing every block (`Active -> Drained`)
 *
 * Sources for duplicate/resize are validated against the index before any
 * byte is read, and copies never read past the source's recorded size.
 */

mod allocator;
mod copy;
mod drain;
mod tracking;

use super::block;
use super::traits::{RawAllocator, SystemAllocator};
use super::tree::AddressSet;
use super::types::{RegistryState, RegistryStats};
use crate::core::config::HeapConfig;
use crate::core::errors::{HeapError, HeapResult};
use crate::core::limits::{BLOCK_ALIGN, BLOCK_HEADER};
use crate::core::types::{Address, Size};
use std::alloc::Layout;
use tracking::UsageTracking;

/// Registry of tracked heap blocks
#[derive(Debug)]
pub struct Registry<A: RawAllocator = SystemAllocator> {
    index: AddressSet,
    allocator: A,
    config: HeapConfig,
    state: RegistryState,
    usage: UsageTracking,
}

impl Registry<SystemAllocator> {
    pub fn new(config: HeapConfig) -> Self {
        Self::with_allocator(SystemAllocator, config)
    }
}

impl Default for Registry<SystemAllocator> {
    fn default() -> Self {
        Self::new(HeapConfig::default())
    }
}

impl<A: RawAllocator> Registry<A> {
    /// Create an active registry over a custom backend
    pub fn with_allocator(allocator: A, config: HeapConfig) -> Self {
        tracing::debug!(copy_mode = %config.copy_mode, "Registry created");
        Self {
            index: AddressSet::new(),
            allocator,
            config,
            state: RegistryState::Active,
            usage: UsageTracking::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> RegistryState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    pub fn tracked_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn tracked_bytes(&self) -> Size {
        self.usage.current_bytes
    }

    pub fn is_tracked(&self, addr: Address) -> bool {
        self.index.contains(addr)
    }

    /// Tracked addresses in increasing order
    pub fn tracked_addresses(&self) -> Vec<Address> {
        self.index.keys()
    }

    /// Size a tracked block was allocated with
    pub fn block_len(&self, addr: Address) -> Option<Size> {
        self.tracked_len(addr)
    }

    /// Read access to a tracked block
    pub fn block(&self, addr: Address) -> HeapResult<&[u8]> {
        self.ensure_active("block")?;
        let len = self.tracked_len(addr).ok_or(HeapError::InvalidSource(addr))?;
        // SAFETY: addr is a live tracked block of `len` initialized bytes, and
        // the registry cannot release it while this borrow is held.
        Ok(unsafe { std::slice::from_raw_parts(addr.as_ptr::<u8>(), len) })
    }

    /// Write access to a tracked block
    pub fn block_mut(&mut self, addr: Address) -> HeapResult<&mut [u8]> {
        self.ensure_active("block_mut")?;
        let len = self.tracked_len(addr).ok_or(HeapError::InvalidSource(addr))?;
        // SAFETY: as in `block`; the exclusive borrow of the registry makes
        // this the only safe view of the block.
        Ok(unsafe { std::slice::from_raw_parts_mut(addr.as_ptr::<u8>(), len) })
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            state: self.state,
            tracked_blocks: self.index.len(),
            tracked_bytes: self.usage.current_bytes,
            peak_tracked_blocks: self.usage.peak_blocks,
            total_allocations: self.usage.allocation_count,
            total_releases: self.usage.release_count,
            index_height: self.index.height(),
        }
    }

    pub(super) fn ensure_active(&self, operation: &'static str) -> HeapResult<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(HeapError::invalid_state(self.state, operation))
        }
    }

    /// Recorded size of `addr` if the index holds it
    fn tracked_len(&self, addr: Address) -> Option<Size> {
        if addr.is_null() || !self.index.contains(addr) {
            return None;
        }
        // SAFETY: every indexed address is a live block written by `block::init`.
        Some(unsafe { block::len_of(addr) })
    }
}

impl<A: RawAllocator> Drop for Registry<A> {
    fn drop(&mut self) {
        if self.state.is_active() && !self.index.is_empty() {
            if let Ok(report) = self.shutdown() {
                tracing::debug!(
                    released_blocks = report.released_blocks,
                    "Registry dropped while active, drained remaining blocks"
                );
            }
        }
    }
}

/// Hand a block back to `allocator`, returning the size it was tracked with
///
/// # Safety
///
/// `addr` must be a live block allocated through `allocator` and already
/// removed from the index.
unsafe fn free_block<A: RawAllocator>(allocator: &A, addr: Address) -> Size {
    // SAFETY: guaranteed by the caller.
    unsafe {
        let size = block::len_of(addr);
        // SAFETY: the same size/alignment pair passed `Layout` validation at allocation time.
        let layout = Layout::from_size_align_unchecked(size + BLOCK_HEADER, BLOCK_ALIGN);
        allocator.deallocate(block::base_of(addr), layout);
        size
    }
}
