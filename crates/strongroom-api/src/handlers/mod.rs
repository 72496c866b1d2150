//! Request handlers.

pub mod document;
pub mod health;
