//! Access decisions.

pub mod engine;

pub use engine::AccessDecisionEngine;
