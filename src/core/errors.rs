/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::{Address, Size};
use crate::memory::RegistryState;
use crate::signals::FatalSignal;
use miette::Diagnostic;
use thiserror::Error;

/// Registry operation result
pub type HeapResult<T> = Result<T, HeapError>;

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum HeapError {
    #[error("Out of memory: could not allocate {requested} bytes")]
    #[diagnostic(
        code(heap::out_of_memory),
        help("The underlying allocator refused the request. Release tracked blocks or request less.")
    )]
    OutOfMemory { requested: Size },

    #[error("Invalid registry state: {operation} requires an active registry, found {state}")]
    #[diagnostic(
        code(heap::invalid_state),
        help("Create the registry before tracking allocations; nothing can be tracked after shutdown.")
    )]
    InvalidState {
        state: RegistryState,
        operation: &'static str,
    },

    #[error("Invalid copy source: {0} is not a tracked block")]
    #[diagnostic(
        code(heap::invalid_source),
        help("Duplicate and resize only read from live tracked blocks. The address may be null or already released.")
    )]
    InvalidSource(Address),

    #[error("Untracked release: {0} is not a tracked block")]
    #[diagnostic(
        code(heap::untracked_release),
        help("The block was already released or was never allocated through the registry.")
    )]
    UntrackedRelease(Address),

    #[error("Failed to install handler for {signal}: {errno}")]
    #[diagnostic(code(heap::signal_install))]
    SignalInstall {
        signal: FatalSignal,
        errno: nix::errno::Errno,
    },
}

impl HeapError {
    pub(crate) fn invalid_state(state: RegistryState, operation: &'static str) -> Self {
        HeapError::InvalidState { state, operation }
    }
}
