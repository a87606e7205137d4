/*!
 * Tracked Heap Library
 * Address-indexed allocation registry that frees every remaining block at shutdown
 */

pub mod core;
pub mod lifecycle;
pub mod memory;
pub mod monitoring;
pub mod signals;

// Re-exports
pub use crate::core::{Address, CopyMode, HeapConfig, HeapError, HeapResult, Size};
pub use lifecycle::startup;
pub use memory::global::{
    create_registry, shutdown, track_allocate, track_duplicate, track_release, track_resize,
};
pub use memory::{AddressSet, RawAllocator, Registry, RegistryState, RegistryStats, ShutdownReport, SystemAllocator};
pub use monitoring::init_tracing;
pub use signals::FatalSignal;
