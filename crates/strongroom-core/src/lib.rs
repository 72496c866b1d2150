//! # strongroom-core
//!
//! Core crate for Strongroom. Contains the collaborator traits, configuration
//! schemas, slug and digest helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Strongroom crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
