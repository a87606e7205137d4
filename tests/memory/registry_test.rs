/*!
 * Registry Tests
 * Tracked allocate/release, drain and state transitions
 */

use crate::common::{CountingAllocator, FailingAllocator};
use pretty_assertions::assert_eq;
use tracked_heap::core::limits::BLOCK_ALIGN;
use tracked_heap::{Address, CopyMode, HeapConfig, HeapError, Registry, RegistryState};

fn counting_registry() -> (Registry<CountingAllocator>, CountingAllocator) {
    let allocator = CountingAllocator::new();
    let registry = Registry::with_allocator(allocator.clone(), HeapConfig::embedded());
    (registry, allocator)
}

#[test]
fn test_new_registry_is_active_and_empty() {
    let registry = Registry::new(HeapConfig::embedded());
    assert_eq!(registry.state(), RegistryState::Active);
    assert_eq!(registry.tracked_count(), 0);
    assert_eq!(registry.tracked_bytes(), 0);
}

#[test]
fn test_registry_keeps_config_and_backend() {
    let allocator = CountingAllocator::new();
    let mut registry = Registry::with_allocator(allocator, HeapConfig::legacy());
    assert_eq!(*registry.config(), HeapConfig::legacy());
    assert_eq!(registry.config().copy_mode, CopyMode::Legacy);

    registry.allocate(16).unwrap();
    assert_eq!(registry.allocator().live(), 1);
    assert_eq!(HeapConfig::strict(), HeapConfig::default());
    assert_eq!(HeapConfig::strict().with_copy_mode(CopyMode::Legacy), HeapConfig::legacy());
}

#[test]
fn test_allocate_then_release_restores_tracked_count() {
    let (mut registry, allocator) = counting_registry();
    let keep = registry.allocate(32).unwrap();
    let before = registry.tracked_count();

    let addr = registry.allocate(128).unwrap();
    assert!(registry.is_tracked(addr));
    assert_eq!(registry.block_len(addr), Some(128));

    registry.release(addr).unwrap();
    assert_eq!(registry.tracked_count(), before);
    assert!(!registry.is_tracked(addr));
    assert!(registry.is_tracked(keep));
    assert_eq!(allocator.live(), 1);
}

#[test]
fn test_blocks_are_aligned_zeroed_and_distinct() {
    let (mut registry, _) = counting_registry();
    let addrs: Vec<Address> = (0..16).map(|i| registry.allocate(i * 3).unwrap()).collect();

    for addr in &addrs {
        assert_eq!(addr.value() % BLOCK_ALIGN, 0);
        assert!(registry.block(*addr).unwrap().iter().all(|b| *b == 0));
    }

    let mut sorted = addrs.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), addrs.len());
    assert_eq!(registry.tracked_addresses(), sorted);
}

#[test]
fn test_zero_size_allocation_is_tracked() {
    let (mut registry, allocator) = counting_registry();
    let addr = registry.allocate(0).unwrap();
    assert!(!addr.is_null());
    assert!(registry.block(addr).unwrap().is_empty());
    registry.release(addr).unwrap();
    assert_eq!(allocator.live(), 0);
}

#[test]
fn test_release_null_is_noop() {
    let (mut registry, allocator) = counting_registry();
    registry.allocate(8).unwrap();
    registry.release(Address::NULL).unwrap();
    assert_eq!(registry.tracked_count(), 1);
    assert_eq!(allocator.deallocations(), 0);
}

#[test]
fn test_double_release_is_refused() {
    let (mut registry, allocator) = counting_registry();
    let addr = registry.allocate(64).unwrap();
    registry.release(addr).unwrap();

    assert_eq!(registry.release(addr), Err(HeapError::UntrackedRelease(addr)));
    assert_eq!(allocator.deallocations(), 1);
}

#[test]
fn test_block_mut_round_trip() {
    let (mut registry, _) = counting_registry();
    let addr = registry.allocate(4).unwrap();
    registry.block_mut(addr).unwrap().copy_from_slice(&7i32.to_ne_bytes());
    assert_eq!(registry.block(addr).unwrap(), &7i32.to_ne_bytes());
}

#[test]
fn test_block_access_requires_tracked_address() {
    let (mut registry, _) = counting_registry();
    let addr = registry.allocate(4).unwrap();
    registry.release(addr).unwrap();
    assert_eq!(registry.block(addr), Err(HeapError::InvalidSource(addr)));
}

#[test]
fn test_out_of_memory_propagates() {
    let allocator = FailingAllocator::after(1);
    let mut registry = Registry::with_allocator(allocator.clone(), HeapConfig::embedded());

    registry.allocate(16).unwrap();
    let result = registry.allocate(32);

    assert_eq!(result, Err(HeapError::OutOfMemory { requested: 32 }));
    assert_eq!(registry.tracked_count(), 1);
    assert_eq!(allocator.live(), 1);
}

#[test]
fn test_unrepresentable_size_is_out_of_memory() {
    let (mut registry, allocator) = counting_registry();
    assert_eq!(
        registry.allocate(usize::MAX),
        Err(HeapError::OutOfMemory { requested: usize::MAX })
    );
    assert_eq!(allocator.allocations(), 0);
    assert_eq!(registry.tracked_count(), 0);
}

#[test]
fn test_stats_track_totals_and_peak() {
    let (mut registry, _) = counting_registry();
    let a = registry.allocate(10).unwrap();
    let b = registry.allocate(20).unwrap();
    registry.allocate(30).unwrap();
    registry.release(a).unwrap();
    registry.release(b).unwrap();

    let stats = registry.stats();
    assert_eq!(stats.state, RegistryState::Active);
    assert_eq!(stats.tracked_blocks, 1);
    assert_eq!(stats.tracked_bytes, 30);
    assert_eq!(stats.peak_tracked_blocks, 3);
    assert_eq!(stats.total_allocations, 3);
    assert_eq!(stats.total_releases, 2);
    assert_eq!(stats.index_height, 1);
}

#[test]
fn test_shutdown_releases_every_tracked_block() {
    let (mut registry, allocator) = counting_registry();
    for size in [1, 8, 64, 512, 4096] {
        registry.allocate(size).unwrap();
    }

    let report = registry.shutdown().unwrap();

    assert_eq!(report.released_blocks, 5);
    assert_eq!(report.released_bytes, 1 + 8 + 64 + 512 + 4096);
    assert_eq!(registry.tracked_count(), 0);
    assert_eq!(registry.state(), RegistryState::Drained);
    assert_eq!(allocator.live(), 0);
    assert_eq!(allocator.deallocations(), 5);
}

#[test]
fn test_operations_after_shutdown_fail_fast() {
    let (mut registry, _) = counting_registry();
    let addr = registry.allocate(8).unwrap();
    registry.shutdown().unwrap();

    let drained = |operation| HeapError::InvalidState {
        state: RegistryState::Drained,
        operation,
    };
    assert_eq!(registry.allocate(8), Err(drained("track_allocate")));
    assert_eq!(registry.release(addr), Err(drained("track_release")));
    assert_eq!(registry.duplicate(addr, 8), Err(drained("track_duplicate")));
    assert_eq!(registry.resize(addr, 8), Err(drained("track_resize")));
    assert_eq!(registry.shutdown(), Err(drained("shutdown")));
}

#[test]
fn test_drop_while_active_drains() {
    let allocator = CountingAllocator::new();
    {
        let mut registry = Registry::with_allocator(allocator.clone(), HeapConfig::embedded());
        for _ in 0..3 {
            registry.allocate(24).unwrap();
        }
        assert_eq!(allocator.live(), 3);
    }
    assert_eq!(allocator.live(), 0);
}
