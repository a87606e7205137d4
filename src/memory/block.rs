/*!
 * Block Layout
 *
 * Every tracked block is prefixed by a header recording its requested size:
 *
 * ```text
 * base                      base + BLOCK_HEADER (caller-visible address)
 * |  size: usize | padding  |  size bytes ...                            |
 * ```
 */

use crate::core::errors::{HeapError, HeapResult};
use crate::core::limits::{BLOCK_ALIGN, BLOCK_HEADER};
use crate::core::types::{Address, Size};
use std::alloc::Layout;
use std::ptr::NonNull;

/// Layout of the whole allocation (header included) for a `size`-byte block
pub(crate) fn layout_for(size: Size) -> HeapResult<Layout> {
    size.checked_add(BLOCK_HEADER)
        .and_then(|total| Layout::from_size_align(total, BLOCK_ALIGN).ok())
        .ok_or(HeapError::OutOfMemory { requested: size })
}

/// Write the header into a fresh allocation and return the caller-visible address
///
/// # Safety
///
/// `base` must point to an allocation of `layout_for(size)`.
pub(crate) unsafe fn init(base: NonNull<u8>, size: Size) -> Address {
    // SAFETY: base is aligned to BLOCK_ALIGN >= align_of::<usize>() and the
    // header fits in the allocation.
    unsafe {
        base.as_ptr().cast::<usize>().write(size);
        Address::from_ptr(base.as_ptr().add(BLOCK_HEADER))
    }
}

/// Start of the allocation behind a caller-visible address
///
/// # Safety
///
/// `addr` must be a live block returned by [`init`].
pub(crate) unsafe fn base_of(addr: Address) -> NonNull<u8> {
    // SAFETY: addr was produced by `init`, so it is BLOCK_HEADER bytes past a non-null base.
    unsafe { NonNull::new_unchecked(addr.as_ptr::<u8>().sub(BLOCK_HEADER)) }
}

/// Size recorded for a block
///
/// # Safety
///
/// `addr` must be a live block returned by [`init`].
pub(crate) unsafe fn len_of(addr: Address) -> Size {
    // SAFETY: the header is readable for as long as the block is live.
    unsafe { base_of(addr).as_ptr().cast::<usize>().read() }
}
