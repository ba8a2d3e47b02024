//! Output formatting for aggregated responses

pub mod console;
pub mod formatter;
