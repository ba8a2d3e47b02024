//! Routing domain
//!
//! Maps a free-text query to the ordered list of specialists that should
//! analyze it. Routing is pure keyword matching and never fails.

pub mod router;

pub use router::{RouteCategory, Router};
