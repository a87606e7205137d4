/*!
 * Core Types
 * Common types used across the heap registry
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size type for memory operations
pub type Size = usize;

/// Identity of a tracked block
///
/// Wraps the numeric value of the caller-visible pointer. Ordering and
/// equality are defined on that integer only; the registry index never
/// reads through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(usize);

impl Address {
    /// The "no value" sentinel
    pub const NULL: Address = Address(0);

    #[inline]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Raw pointer to the block
    ///
    /// Dereferencing it is only sound while the block is tracked and within
    /// the length it was allocated with. The caller borrows the block; the
    /// registry remains its owner.
    #[inline]
    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
