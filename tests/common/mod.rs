/*!
 * Shared test harness
 * Allocation backends that observe or refuse what the registry asks for
 */

#![allow(dead_code)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracked_heap::{RawAllocator, SystemAllocator};

/// Counts live blocks independently of the registry's own bookkeeping
#[derive(Debug, Clone, Default)]
pub struct CountingAllocator {
    live: Arc<AtomicUsize>,
    allocations: Arc<AtomicUsize>,
    deallocations: Arc<AtomicUsize>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn deallocations(&self) -> usize {
        self.deallocations.load(Ordering::SeqCst)
    }
}

impl RawAllocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let ptr = SystemAllocator.allocate(layout)?;
        self.live.fetch_add(1, Ordering::SeqCst);
        self.allocations.fetch_add(1, Ordering::SeqCst);
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.deallocations.fetch_add(1, Ordering::SeqCst);
        unsafe { SystemAllocator.deallocate(ptr, layout) }
    }
}

/// Serves `budget` allocations, then refuses every request
#[derive(Debug, Clone)]
pub struct FailingAllocator {
    inner: CountingAllocator,
    budget: Arc<AtomicUsize>,
}

impl FailingAllocator {
    pub fn after(budget: usize) -> Self {
        Self {
            inner: CountingAllocator::new(),
            budget: Arc::new(AtomicUsize::new(budget)),
        }
    }

    pub fn live(&self) -> usize {
        self.inner.live()
    }
}

impl RawAllocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        self.budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .ok()?;
        self.inner.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}

pub fn write_i32s(bytes: &mut [u8], values: impl IntoIterator<Item = i32>) {
    for (slot, value) in bytes.chunks_exact_mut(4).zip(values) {
        slot.copy_from_slice(&value.to_ne_bytes());
    }
}

pub fn read_i32s(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
