/*!
 * Signals Module
 * Fatal-signal diagnostics for processes using the registry
 */

mod handler;
pub mod messages;
pub mod types;

// Re-export public API
pub use handler::install_fatal_handlers;
pub use messages::render_report;
pub use types::FatalSignal;
