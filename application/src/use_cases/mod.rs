//! Use cases (application services)

pub mod aggregate;
pub mod execute_specialists;
pub mod orchestrate;
