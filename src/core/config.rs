/*!
 * Registry Configuration
 *
 * Runtime configuration for copy policy and process hooks
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable selecting the copy policy (`strict` | `legacy`)
pub const ENV_COPY_MODE: &str = "TRACKED_HEAP_COPY_MODE";

/// Environment variable toggling fatal-signal handlers (`1`/`true`)
pub const ENV_SIGNALS: &str = "TRACKED_HEAP_SIGNALS";

/// Environment variable toggling the normal-exit drain (`1`/`true`)
pub const ENV_DRAIN_AT_EXIT: &str = "TRACKED_HEAP_DRAIN_AT_EXIT";

/// How duplicate and resize treat sources they cannot fully read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMode {
    /// Reject absent sources before allocating, clamp copies to the source extent
    #[default]
    Strict,
    /// Keep the discarded allocation on a null source and log truncated copies
    Legacy,
}

impl CopyMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(CopyMode::Strict),
            "legacy" => Some(CopyMode::Legacy),
            _ => None,
        }
    }
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CopyMode::Strict => write!(f, "strict"),
            CopyMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// Registry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapConfig {
    pub copy_mode: CopyMode,
    /// Install fatal-signal handlers at startup
    pub install_signal_handlers: bool,
    /// Drain the process-wide registry when the process exits normally
    pub drain_at_exit: bool,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            copy_mode: CopyMode::Strict,
            install_signal_handlers: true,
            drain_at_exit: true,
        }
    }
}

impl HeapConfig {
    pub const fn strict() -> Self {
        Self {
            copy_mode: CopyMode::Strict,
            install_signal_handlers: true,
            drain_at_exit: true,
        }
    }

    pub const fn legacy() -> Self {
        Self {
            copy_mode: CopyMode::Legacy,
            install_signal_handlers: true,
            drain_at_exit: true,
        }
    }

    /// No process hooks; for registries owned by a larger program or a test
    pub const fn embedded() -> Self {
        Self {
            copy_mode: CopyMode::Strict,
            install_signal_handlers: false,
            drain_at_exit: false,
        }
    }

    pub fn with_copy_mode(mut self, copy_mode: CopyMode) -> Self {
        self.copy_mode = copy_mode;
        self
    }

    /// Defaults overridden by `TRACKED_HEAP_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_COPY_MODE) {
            match CopyMode::parse(&raw) {
                Some(mode) => config.copy_mode = mode,
                None => tracing::warn!(value = %raw, "Ignoring unknown {}", ENV_COPY_MODE),
            }
        }
        if let Some(flag) = lookup(ENV_SIGNALS).and_then(|v| parse_flag(&v)) {
            config.install_signal_handlers = flag;
        }
        if let Some(flag) = lookup(ENV_DRAIN_AT_EXIT).and_then(|v| parse_flag(&v)) {
            config.drain_at_exit = flag;
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
