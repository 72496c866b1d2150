//! Rate-limit bookkeeping.

pub mod record;

pub use record::RateLimitRecord;
