/*!
 * Memory Traits
 * Raw allocation backend used by the registry
 */

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Raw block allocator interface
///
/// The registry owns every block it gets from here and hands each one back
/// exactly once, with the layout it was allocated with.
pub trait RawAllocator: Send {
    /// Allocate a zero-filled block, or `None` if the request cannot be served
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Return a block to the allocator
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`RawAllocator::allocate`] on this allocator with
    /// the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// Backend over the process's global Rust allocator
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl RawAllocator for SystemAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return None;
        }
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees ptr was allocated by `allocate` with `layout`.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
