/*!
 * Address Set Tests
 * Public behaviour of the ordered index under shuffled workloads
 */

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracked_heap::core::limits::max_index_height;
use tracked_heap::{Address, AddressSet};

fn addresses(values: impl IntoIterator<Item = usize>) -> Vec<Address> {
    values.into_iter().map(|v| Address::new(v * 16)).collect()
}

#[test]
fn test_shuffled_inserts_iterate_in_address_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys = addresses(1..=500);
    keys.shuffle(&mut rng);

    let set: AddressSet = keys.iter().copied().collect();

    assert_eq!(set.len(), 500);
    assert_eq!(set.keys(), addresses(1..=500));
    assert!(set.height() <= max_index_height(set.len()));
}

#[test]
fn test_interleaved_removals_keep_order_and_height() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut keys = addresses(1..=1000);
    keys.shuffle(&mut rng);
    let mut set: AddressSet = keys.iter().copied().collect();

    let (removed, kept) = keys.split_at(600);
    for key in removed {
        assert!(set.remove(*key));
        assert!(!set.contains(*key));
    }

    let mut expected = kept.to_vec();
    expected.sort();
    assert_eq!(set.keys(), expected);
    assert_eq!(set.first(), expected.first().copied());
    assert_eq!(set.last(), expected.last().copied());
    assert!(set.height() <= max_index_height(set.len()));
}

#[test]
fn test_reinserting_present_keys_changes_nothing() {
    let mut set: AddressSet = addresses(1..=64).into_iter().collect();
    let before = set.keys();

    for key in addresses(1..=64) {
        assert!(!set.insert(key));
    }

    assert_eq!(set.len(), 64);
    assert_eq!(set.keys(), before);
}

#[test]
fn test_drain_consumes_every_key() {
    let set: AddressSet = addresses(1..=100).into_iter().collect();
    let mut visited = 0;
    set.drain(|_| visited += 1);
    assert_eq!(visited, 100);
}
