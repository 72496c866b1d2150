//! Asset store implementations.

pub mod local;
