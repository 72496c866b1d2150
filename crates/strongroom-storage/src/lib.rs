//! # strongroom-storage
//!
//! Read-only asset storage for Strongroom: the local filesystem store and
//! the locator mapping document slugs onto canonical asset paths.

pub mod locator;
pub mod providers;

pub use locator::AssetLocator;
pub use providers::local::LocalAssetStore;
