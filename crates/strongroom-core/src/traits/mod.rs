//! Core traits defined in `strongroom-core` and implemented by other crates.

pub mod storage;

pub use storage::AssetStore;
