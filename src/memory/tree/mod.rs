/*!
 * Ordered Address Set
 *
 * Self-balancing (AVL) binary search tree of block addresses.
 *
 * ## Complexity
 *
 * - **insert / remove / contains**: O(log n), height <= 1.44 * log2(n + 2)
 * - **for_each / iter**: O(n), strictly increasing address order
 * - **drain**: O(n), post-order, frees every node as it is visited
 *
 * The set only compares addresses. It never reads through them, and dropping
 * it releases its own nodes but never the memory the keys denote.
 */

mod iter;
mod node;

pub use iter::Iter;

use crate::core::types::Address;
use node::Link;

/// Ordered set of addresses backed by an AVL tree
#[derive(Debug, Default)]
pub struct AddressSet {
    root: Link,
    len: usize,
}

impl AddressSet {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert `key` if absent. Returns `true` if the set changed.
    pub fn insert(&mut self, key: Address) -> bool {
        let (root, inserted) = node::insert(self.root.take(), key);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove `key` if present. Returns `true` if the set changed.
    pub fn remove(&mut self, key: Address) -> bool {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    #[inline]
    pub fn contains(&self, key: Address) -> bool {
        node::contains(&self.root, key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty)
    #[inline]
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    /// Lowest address in the set
    pub fn first(&self) -> Option<Address> {
        node::first(&self.root)
    }

    /// Highest address in the set
    pub fn last(&self) -> Option<Address> {
        node::last(&self.root)
    }

    /// Call `visit` once per key in increasing address order
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(Address),
    {
        node::visit_in_order(&self.root, &mut visit);
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root, self.len)
    }

    /// All keys in increasing order
    pub fn keys(&self) -> Vec<Address> {
        let mut keys = Vec::with_capacity(self.len);
        self.for_each(|key| keys.push(key));
        keys
    }

    /// Consume the set, calling `visit` once per key in post-order and
    /// freeing each node right after its key was visited
    pub fn drain<F>(mut self, mut visit: F)
    where
        F: FnMut(Address),
    {
        node::drain_post_order(self.root.take(), &mut visit);
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = Address;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Extend<Address> for AddressSet {
    fn extend<I: IntoIterator<Item = Address>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Address> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let mut set = AddressSet::new();
        set.extend(iter);
        set
    }
}
