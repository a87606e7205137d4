/*!
 * Process-wide Registry
 *
 * A single [`Registry`] behind one exclusive lock, with an explicit
 * `Uninitialized -> Active -> Drained` contract instead of constructor and
 * destructor hooks. Every logical operation (including its index rebalancing)
 * runs entirely under the lock.
 */

use super::registry::Registry;
use super::types::{RegistryState, RegistryStats, ShutdownReport};
use crate::core::config::HeapConfig;
use crate::core::errors::{HeapError, HeapResult};
use crate::core::types::{Address, Size};
use parking_lot::{const_mutex, Mutex};
use tracing::info;

enum Slot {
    Uninitialized,
    Active(Registry),
    Drained,
}

impl Slot {
    fn state(&self) -> RegistryState {
        match self {
            Slot::Uninitialized => RegistryState::Uninitialized,
            Slot::Active(_) => RegistryState::Active,
            Slot::Drained => RegistryState::Drained,
        }
    }
}

static REGISTRY: Mutex<Slot> = const_mutex(Slot::Uninitialized);

fn with_active<R, F>(operation: &'static str, f: F) -> HeapResult<R>
where
    F: FnOnce(&mut Registry) -> HeapResult<R>,
{
    let mut slot = REGISTRY.lock();
    match &mut *slot {
        Slot::Active(registry) => f(registry),
        other => Err(HeapError::invalid_state(other.state(), operation)),
    }
}

/// Move the process-wide registry from `Uninitialized` to `Active`
///
/// Only the copy policy of `config` is used here; process hooks are wired by
/// [`lifecycle::startup`](crate::lifecycle::startup).
pub fn create_registry(config: HeapConfig) -> HeapResult<()> {
    let mut slot = REGISTRY.lock();
    match &*slot {
        Slot::Uninitialized => {
            *slot = Slot::Active(Registry::new(config));
            info!(copy_mode = %config.copy_mode, "Process-wide registry active");
            Ok(())
        }
        other => Err(HeapError::invalid_state(other.state(), "create_registry")),
    }
}

pub fn state() -> RegistryState {
    REGISTRY.lock().state()
}

pub fn track_allocate(size: Size) -> HeapResult<Address> {
    with_active("track_allocate", |registry| registry.allocate(size))
}

pub fn track_release(addr: Address) -> HeapResult<()> {
    with_active("track_release", |registry| registry.release(addr))
}

pub fn track_duplicate(addr: Address, size: Size) -> HeapResult<Address> {
    with_active("track_duplicate", |registry| registry.duplicate(addr, size))
}

pub fn track_resize(addr: Address, new_size: Size) -> HeapResult<Address> {
    with_active("track_resize", |registry| registry.resize(addr, new_size))
}

/// Number of tracked blocks; zero unless the registry is active
pub fn tracked_count() -> usize {
    match &*REGISTRY.lock() {
        Slot::Active(registry) => registry.tracked_count(),
        _ => 0,
    }
}

pub fn is_tracked(addr: Address) -> bool {
    match &*REGISTRY.lock() {
        Slot::Active(registry) => registry.is_tracked(addr),
        _ => false,
    }
}

pub fn stats() -> HeapResult<RegistryStats> {
    with_active("stats", |registry| Ok(registry.stats()))
}

/// Run `f` over a tracked block while holding the registry lock
///
/// # Deadlocks
///
/// The lock is not reentrant: `f` must not call back into the process-wide
/// registry (`track_*`, [`stats`], [`shutdown`], ...) or it blocks forever.
pub fn with_block<R, F>(addr: Address, f: F) -> HeapResult<R>
where
    F: FnOnce(&[u8]) -> R,
{
    with_active("block", |registry| registry.block(addr).map(f))
}

/// Run `f` over a mutable view of a tracked block while holding the registry lock
///
/// # Deadlocks
///
/// The lock is not reentrant: `f` must not call back into the process-wide
/// registry (`track_*`, [`stats`], [`shutdown`], ...) or it blocks forever.
pub fn with_block_mut<R, F>(addr: Address, f: F) -> HeapResult<R>
where
    F: FnOnce(&mut [u8]) -> R,
{
    with_active("block_mut", |registry| registry.block_mut(addr).map(f))
}

/// Drain the registry, releasing every tracked block. Terminal.
pub fn shutdown() -> HeapResult<ShutdownReport> {
    let mut slot = REGISTRY.lock();
    drain_slot(&mut slot)
}

/// Exit-hook variant of [`shutdown`]: never blocks, never panics
pub(crate) fn shutdown_at_exit() -> Option<ShutdownReport> {
    let mut slot = REGISTRY.try_lock()?;
    if !slot.state().is_active() {
        return None;
    }
    drain_slot(&mut slot).ok()
}

fn drain_slot(slot: &mut Slot) -> HeapResult<ShutdownReport> {
    match std::mem::replace(slot, Slot::Drained) {
        Slot::Active(mut registry) => registry.shutdown(),
        other => {
            let state = other.state();
            *slot = other;
            Err(HeapError::invalid_state(state, "shutdown"))
        }
    }
}
