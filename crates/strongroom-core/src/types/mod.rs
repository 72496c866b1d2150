//! Shared value types.

pub mod digest;
pub mod slug;

pub use digest::sha256_hex;
pub use slug::Slug;
