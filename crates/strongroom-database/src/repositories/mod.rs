//! PostgreSQL repositories.

pub mod audit;
