/*!
 * Fatal Signal Handler
 *
 * Prints the signal report to stdout and exits with the signal number.
 * The handler only uses async-signal-safe calls (`write`, `_exit`), so it
 * neither takes the registry lock nor drains it: blocks still tracked when a
 * fatal signal arrives are left to the operating system.
 */

use super::messages::report_parts;
use super::types::FatalSignal;
use crate::core::errors::{HeapError, HeapResult};
use nix::libc;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet};
use tracing::{debug, info};

extern "C" fn on_fatal_signal(signum: libc::c_int) {
    if let Some(signal) = FatalSignal::from_number(signum) {
        for part in report_parts(signal) {
            write_stdout(part);
        }
    }
    // SAFETY: _exit is async-signal-safe and never returns.
    unsafe { libc::_exit(signum) }
}

fn write_stdout(text: &str) {
    let mut bytes = text.as_bytes();
    while !bytes.is_empty() {
        // SAFETY: bytes is a valid readable buffer of the given length.
        let written = unsafe { libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if written <= 0 {
            return;
        }
        bytes = &bytes[written as usize..];
    }
}

/// Route every [`FatalSignal`] to the diagnostic handler
pub fn install_fatal_handlers() -> HeapResult<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_fatal_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );

    for signal in FatalSignal::ALL {
        // SAFETY: the handler restricts itself to async-signal-safe functions.
        unsafe { sigaction(signal.to_unix(), &action) }
            .map_err(|errno| HeapError::SignalInstall { signal, errno })?;
        debug!(%signal, "Installed fatal signal handler");
    }

    info!(count = FatalSignal::ALL.len(), "Fatal signal handlers installed");
    Ok(())
}
