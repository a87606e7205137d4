/*!
 * Copy Tests
 * Duplicate and resize, in strict and legacy modes
 */

use crate::common::{read_i32s, write_i32s, CountingAllocator, FailingAllocator};
use pretty_assertions::assert_eq;
use tracked_heap::{Address, CopyMode, HeapConfig, HeapError, Registry};

fn make_registry(mode: CopyMode) -> (Registry<CountingAllocator>, CountingAllocator) {
    let allocator = CountingAllocator::new();
    let config = HeapConfig::embedded().with_copy_mode(mode);
    (Registry::with_allocator(allocator.clone(), config), allocator)
}

#[test]
fn test_duplicate_copies_value_into_distinct_block() {
    let (mut registry, _) = make_registry(CopyMode::Strict);
    let x = registry.allocate(4).unwrap();
    write_i32s(registry.block_mut(x).unwrap(), [42]);

    let y = registry.duplicate(x, 4).unwrap();

    assert_ne!(x, y);
    assert_eq!(read_i32s(registry.block(y).unwrap()), vec![42]);
    assert!(registry.is_tracked(x));
    assert!(registry.is_tracked(y));

    registry.release(x).unwrap();
    assert_eq!(read_i32s(registry.block(y).unwrap()), vec![42]);
    assert_eq!(registry.tracked_count(), 1);
}

#[test]
fn test_resize_preserves_prefix() {
    let (mut registry, allocator) = make_registry(CopyMode::Strict);
    let arr = registry.allocate(4 * 8).unwrap();
    write_i32s(registry.block_mut(arr).unwrap(), 0..8);

    let grown = registry.resize(arr, 4 * 16).unwrap();

    let values = read_i32s(registry.block(grown).unwrap());
    assert_eq!(values.len(), 16);
    assert_eq!(&values[..8], &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(values[8..].iter().all(|v| *v == 0));
    assert!(!registry.is_tracked(arr));
    assert_eq!(registry.tracked_count(), 1);
    assert_eq!(allocator.live(), 1);
}

#[test]
fn test_resize_can_shrink() {
    let (mut registry, _) = make_registry(CopyMode::Strict);
    let arr = registry.allocate(4 * 16).unwrap();
    write_i32s(registry.block_mut(arr).unwrap(), 100..116);

    let shrunk = registry.resize(arr, 4 * 4).unwrap();

    assert_eq!(read_i32s(registry.block(shrunk).unwrap()), vec![100, 101, 102, 103]);
    assert_eq!(registry.block_len(shrunk), Some(16));
}

#[test]
fn test_strict_null_source_allocates_nothing() {
    let (mut registry, allocator) = make_registry(CopyMode::Strict);

    assert_eq!(
        registry.duplicate(Address::NULL, 4),
        Err(HeapError::InvalidSource(Address::NULL))
    );
    assert_eq!(allocator.allocations(), 0);
    assert_eq!(registry.tracked_count(), 0);
}

#[test]
fn test_released_source_is_invalid() {
    let (mut registry, allocator) = make_registry(CopyMode::Strict);
    let addr = registry.allocate(8).unwrap();
    registry.release(addr).unwrap();

    assert_eq!(registry.duplicate(addr, 8), Err(HeapError::InvalidSource(addr)));
    assert_eq!(registry.resize(addr, 16), Err(HeapError::InvalidSource(addr)));
    assert_eq!(allocator.allocations(), 1);
}

#[test]
fn test_legacy_null_source_keeps_discarded_allocation() {
    let (mut registry, allocator) = make_registry(CopyMode::Legacy);

    assert_eq!(
        registry.duplicate(Address::NULL, 4),
        Err(HeapError::InvalidSource(Address::NULL))
    );
    assert_eq!(allocator.allocations(), 1);
    assert_eq!(registry.tracked_count(), 1);

    let report = registry.shutdown().unwrap();
    assert_eq!(report.released_blocks, 1);
    assert_eq!(allocator.live(), 0);
}

#[test]
fn test_legacy_untracked_source_allocates_nothing() {
    let (mut registry, allocator) = make_registry(CopyMode::Legacy);
    let bogus = Address::new(0x1000);

    assert_eq!(registry.duplicate(bogus, 4), Err(HeapError::InvalidSource(bogus)));
    assert_eq!(allocator.allocations(), 0);
}

#[test]
fn test_oversized_copy_is_truncated_to_source() {
    for mode in [CopyMode::Strict, CopyMode::Legacy] {
        let (mut registry, _) = make_registry(mode);
        let x = registry.allocate(4).unwrap();
        write_i32s(registry.block_mut(x).unwrap(), [42]);

        let y = registry.duplicate(x, 16).unwrap();

        assert_eq!(read_i32s(registry.block(y).unwrap()), vec![42, 0, 0, 0]);
    }
}

#[test]
fn test_failed_resize_leaves_source_untouched() {
    let allocator = FailingAllocator::after(1);
    let mut registry = Registry::with_allocator(allocator.clone(), HeapConfig::embedded());
    let arr = registry.allocate(8).unwrap();
    write_i32s(registry.block_mut(arr).unwrap(), [1, 2]);

    assert_eq!(
        registry.resize(arr, 64),
        Err(HeapError::OutOfMemory { requested: 64 })
    );
    assert!(registry.is_tracked(arr));
    assert_eq!(read_i32s(registry.block(arr).unwrap()), vec![1, 2]);
    assert_eq!(allocator.live(), 1);
}
