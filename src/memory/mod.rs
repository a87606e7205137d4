/*!
 * Memory Module
 * Address index, tracked allocation registry and the process-wide instance
 */

mod block;
pub mod global;
pub mod registry;
pub mod traits;
pub mod tree;
pub mod types;

// Re-export for convenience
pub use registry::Registry;
pub use traits::{RawAllocator, SystemAllocator};
pub use tree::AddressSet;
pub use types::{RegistryState, RegistryStats, ShutdownReport};
