//! Tier ladder, caller context, document descriptors and decisions.

pub mod context;
pub mod decision;
pub mod document;
pub mod tier;

pub use context::AccessContext;
pub use decision::{Decision, ReasonCode};
pub use document::AccessControlledDocument;
pub use tier::Tier;
