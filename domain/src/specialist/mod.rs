//! Specialist domain
//!
//! - [`identifier::SpecialistId`]: which analysis capability a unit provides
//! - [`result::SpecialistResult`]: immutable output of one unit invocation

pub mod identifier;
pub mod result;
