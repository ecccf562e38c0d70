//! # TaleForge Core
//!
//! Core business logic for phone verification before story creation.
//! This crate contains the verification session entity, the session manager
//! service with its storage and delivery seams, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
