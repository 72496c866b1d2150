//! Session lookup and resolution.

pub mod jwt;
pub mod memory;
pub mod resolver;
pub mod store;

pub use jwt::JwtSessionStore;
pub use memory::MemorySessionStore;
pub use resolver::SessionResolver;
pub use store::{Credentials, Session, SessionStore};
