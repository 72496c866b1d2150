//! Request extractors.

pub mod client;
pub mod credentials;

pub use client::ClientMeta;
pub use credentials::SessionCredentials;
