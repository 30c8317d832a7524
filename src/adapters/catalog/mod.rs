//! Catalog Adapters.
//!
//! - `TmdbCatalog` - The Movie Database v3 REST API, throttled
//! - `InMemoryCatalog` - Fixed movie list for tests and offline runs

mod in_memory;
mod throttle;
mod tmdb;

pub use in_memory::InMemoryCatalog;
pub use throttle::RequestThrottle;
pub use tmdb::{TmdbCatalog, TmdbConfig, DEFAULT_REQUEST_INTERVAL};
