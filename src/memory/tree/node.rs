/*!
 * AVL Node
 * Owned links, rotations and rebalancing
 */

use crate::core::types::Address;
use std::cmp::Ordering;

/// Exclusively owned child link
pub(super) type Link = Option<Box<Node>>;

#[derive(Debug)]
pub(super) struct Node {
    pub key: Address,
    pub left: Link,
    pub right: Link,
    pub height: u32,
}

impl Node {
    fn leaf(key: Address) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Left height minus right height
    #[inline]
    pub fn balance(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

#[inline]
pub(super) fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Restore the height and balance of `node`, returning the new subtree root
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        // left-right: straighten the left child first
        if let Some(left) = node.left.take() {
            node.left = Some(if height(&left.left) >= height(&left.right) {
                left
            } else {
                rotate_left(left)
            });
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if let Some(right) = node.right.take() {
            node.right = Some(if height(&right.right) >= height(&right.left) {
                right
            } else {
                rotate_right(right)
            });
        }
        return rotate_left(node);
    }

    node
}

/// Insert `key` below `link`. Returns the new subtree root and whether the key was new.
///
/// Every ancestor on the path is rebalanced, including when the key was
/// already present.
pub(super) fn insert(link: Link, key: Address) -> (Box<Node>, bool) {
    let Some(mut node) = link else {
        return (rebalance(Node::leaf(key)), true);
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, inserted) = insert(node.left.take(), key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert(node.right.take(), key);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => false,
    };

    (rebalance(node), inserted)
}

/// Remove `key` below `link`. Returns the new subtree root and whether the key was found.
///
/// A node with two children takes its in-order successor's key, and the
/// successor is then removed from the right subtree.
pub(super) fn remove(link: Link, key: Address) -> (Link, bool) {
    let Some(mut node) = link else {
        return (None, false);
    };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => return (child.map(rebalance), true),
            (Some(left), Some(right)) => {
                let successor = leftmost(&right);
                node.key = successor;
                node.left = Some(left);
                node.right = remove(Some(right), successor).0;
                true
            }
        },
    };

    (Some(rebalance(node)), removed)
}

fn leftmost(mut node: &Node) -> Address {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node.key
}

fn rightmost(mut node: &Node) -> Address {
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    node.key
}

pub(super) fn first(link: &Link) -> Option<Address> {
    link.as_deref().map(leftmost)
}

pub(super) fn last(link: &Link) -> Option<Address> {
    link.as_deref().map(rightmost)
}

pub(super) fn contains(mut link: &Link, key: Address) -> bool {
    while let Some(node) = link {
        link = match key.cmp(&node.key) {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return true,
        };
    }
    false
}

/// In-order: left, self, right
pub(super) fn visit_in_order<F>(link: &Link, visit: &mut F)
where
    F: FnMut(Address),
{
    if let Some(node) = link {
        visit_in_order(&node.left, visit);
        visit(node.key);
        visit_in_order(&node.right, visit);
    }
}

/// Post-order: left, right, self. Each node is freed right after its key is visited.
pub(super) fn drain_post_order<F>(link: Link, visit: &mut F)
where
    F: FnMut(Address),
{
    if let Some(node) = link {
        let Node {
            key, left, right, ..
        } = *node;
        drain_post_order(left, visit);
        drain_post_order(right, visit);
        visit(key);
    }
}
