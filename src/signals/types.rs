/*!
 * Signal Types
 * Fatal signals intercepted at startup
 */

use nix::sys::signal::Signal as UnixSignal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signals that terminate the process through the diagnostic handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FatalSignal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT,
    /// Illegal instruction
    SIGILL,
    /// Trace/breakpoint trap
    SIGTRAP,
    /// Abort signal
    SIGABRT,
    /// Erroneous arithmetic operation
    SIGFPE,
    /// Invalid memory reference
    SIGSEGV,
    /// Write to a pipe with no readers
    SIGPIPE,
    /// Timer signal
    SIGALRM,
    /// Termination request
    SIGTERM,
}

impl FatalSignal {
    pub const ALL: [FatalSignal; 11] = [
        FatalSignal::SIGHUP,
        FatalSignal::SIGINT,
        FatalSignal::SIGQUIT,
        FatalSignal::SIGILL,
        FatalSignal::SIGTRAP,
        FatalSignal::SIGABRT,
        FatalSignal::SIGFPE,
        FatalSignal::SIGSEGV,
        FatalSignal::SIGPIPE,
        FatalSignal::SIGALRM,
        FatalSignal::SIGTERM,
    ];

    pub fn to_unix(self) -> UnixSignal {
        match self {
            FatalSignal::SIGHUP => UnixSignal::SIGHUP,
            FatalSignal::SIGINT => UnixSignal::SIGINT,
            FatalSignal::SIGQUIT => UnixSignal::SIGQUIT,
            FatalSignal::SIGILL => UnixSignal::SIGILL,
            FatalSignal::SIGTRAP => UnixSignal::SIGTRAP,
            FatalSignal::SIGABRT => UnixSignal::SIGABRT,
            FatalSignal::SIGFPE => UnixSignal::SIGFPE,
            FatalSignal::SIGSEGV => UnixSignal::SIGSEGV,
            FatalSignal::SIGPIPE => UnixSignal::SIGPIPE,
            FatalSignal::SIGALRM => UnixSignal::SIGALRM,
            FatalSignal::SIGTERM => UnixSignal::SIGTERM,
        }
    }

    /// Platform signal number; also the process exit code after the handler runs
    #[inline]
    pub fn number(self) -> i32 {
        self.to_unix() as i32
    }

    /// Convert from a platform signal number
    pub fn from_number(n: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|signal| signal.number() == n)
    }

    pub fn name(self) -> &'static str {
        self.to_unix().as_str()
    }

    /// Get human-readable description
    pub fn description(self) -> &'static str {
        match self {
            FatalSignal::SIGHUP => "Hangup",
            FatalSignal::SIGINT => "Interactive attention",
            FatalSignal::SIGQUIT => "Quit",
            FatalSignal::SIGILL => "Illegal instruction",
            FatalSignal::SIGTRAP => "Trace/breakpoint trap",
            FatalSignal::SIGABRT => "Abnormal termination",
            FatalSignal::SIGFPE => "Erroneous arithmetic operation",
            FatalSignal::SIGSEGV => "Invalid access to storage",
            FatalSignal::SIGPIPE => "Broken pipe",
            FatalSignal::SIGALRM => "Alarm clock",
            FatalSignal::SIGTERM => "Termination request",
        }
    }
}

impl fmt::Display for FatalSignal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}
