//! Progress reporting for specialist execution

pub mod reporter;
