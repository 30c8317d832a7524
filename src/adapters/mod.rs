//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Narrative service adapters (Anthropic, mock)
//! - `catalog` - Movie catalog adapters (TMDB, in-memory)
//! - `progress` - Progress observer that logs through `tracing`

pub mod ai;
pub mod catalog;
pub mod progress;

pub use progress::{progress_bar, LoggingProgress};
