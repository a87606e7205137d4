/*!
 * Process Lifecycle
 *
 * Startup wiring for the process-wide registry: activate it, install the
 * fatal-signal handlers and register the normal-exit drain.
 */

use crate::core::config::HeapConfig;
use crate::core::errors::HeapResult;
use crate::memory::global;
use crate::signals;
use nix::libc;
use std::sync::Once;
use tracing::{info, warn};

static EXIT_HOOK: Once = Once::new();

/// Activate the process-wide registry and wire the hooks `config` asks for
pub fn startup(config: HeapConfig) -> HeapResult<()> {
    global::create_registry(config)?;

    if config.install_signal_handlers {
        signals::install_fatal_handlers()?;
    }
    if config.drain_at_exit {
        register_exit_hook();
    }

    info!(
        copy_mode = %config.copy_mode,
        signals = config.install_signal_handlers,
        drain_at_exit = config.drain_at_exit,
        "Heap registry started"
    );
    Ok(())
}

/// Drain the process-wide registry when the process exits normally
///
/// Registered at most once per process.
pub fn register_exit_hook() {
    EXIT_HOOK.call_once(|| {
        // SAFETY: drain_at_exit is a plain extern "C" fn with no arguments.
        if unsafe { libc::atexit(drain_at_exit) } != 0 {
            warn!("Could not register exit hook; tracked blocks will not be drained at exit");
        }
    });
}

extern "C" fn drain_at_exit() {
    // Unwinding out of an extern "C" fn aborts; swallow instead.
    let _ = std::panic::catch_unwind(global::shutdown_at_exit);
}
