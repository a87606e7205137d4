/*!
 * Core Module
 * Fundamental types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::{CopyMode, HeapConfig};
pub use errors::{HeapError, HeapResult};
pub use types::{Address, Size};
