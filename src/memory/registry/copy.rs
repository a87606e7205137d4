/*!
 * Registry Copies
 * Duplicate and resize of tracked blocks
 */

use super::Registry;
use crate::core::config::CopyMode;
use crate::core::errors::{HeapError, HeapResult};
use crate::core::types::{Address, Size};
use crate::memory::traits::RawAllocator;
use std::ptr;
use tracing::{debug, warn};

impl<A: RawAllocator> Registry<A> {
    /// Allocate a new tracked `size`-byte block holding a copy of `src`
    ///
    /// At most `min(size, len(src))` bytes are copied; the rest of the new
    /// block is zero. Both blocks stay tracked independently.
    ///
    /// Fails with [`HeapError::InvalidSource`] when `src` is null or not
    /// tracked. In [`CopyMode::Legacy`] a null source still makes the
    /// destination allocation, which stays tracked until shutdown.
    pub fn duplicate(&mut self, src: Address, size: Size) -> HeapResult<Address> {
        self.ensure_active("track_duplicate")?;
        self.duplicate_block(src, size)
    }

    /// Move `src` into a new tracked block of `new_size` bytes
    ///
    /// Always reallocates: duplicate into a fresh block, then release `src`.
    /// On failure `src` is left untouched.
    pub fn resize(&mut self, src: Address, new_size: Size) -> HeapResult<Address> {
        self.ensure_active("track_resize")?;
        let dst = self.duplicate_block(src, new_size)?;
        self.release(src)?;
        Ok(dst)
    }

    fn duplicate_block(&mut self, src: Address, size: Size) -> HeapResult<Address> {
        let Some(src_len) = self.tracked_len(src) else {
            if src.is_null() && self.config.copy_mode == CopyMode::Legacy {
                let discarded = self.allocate_block(size)?;
                warn!(
                    %discarded,
                    size,
                    "Null copy source: kept discarded allocation, refusing to read the sentinel"
                );
            } else {
                warn!(%src, size, "Refusing to copy from untracked block");
            }
            return Err(HeapError::InvalidSource(src));
        };

        let dst = self.allocate_block(size)?;
        let copied = size.min(src_len);

        if copied < size {
            match self.config.copy_mode {
                CopyMode::Legacy => warn!(
                    %src,
                    requested = size,
                    available = src_len,
                    "Copy runs past the source block, truncated to its extent"
                ),
                CopyMode::Strict => debug!(%src, requested = size, available = src_len, "Copy clamped to source extent"),
            }
        }

        // SAFETY: src is a live block of src_len >= copied bytes, dst a fresh
        // block of size >= copied bytes; they are distinct allocations.
        unsafe { ptr::copy_nonoverlapping(src.as_ptr::<u8>(), dst.as_ptr::<u8>(), copied) };

        debug!(%src, %dst, copied, "Duplicated block");
        Ok(dst)
    }
}
