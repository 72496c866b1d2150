//! # strongroom-auth
//!
//! Authorization and session handling for Strongroom.
//!
//! ## Modules
//!
//! - `access`: the pure access decision engine
//! - `jwt`: HS256 session token encoding and validation
//! - `session`: session store trait, JWT and in-memory stores, and the
//!   resolver turning credentials into an `AccessContext`

pub mod access;
pub mod jwt;
pub mod session;

pub use access::AccessDecisionEngine;
pub use jwt::{SessionClaims, SessionTokenDecoder, SessionTokenEncoder};
pub use session::{
    Credentials, JwtSessionStore, MemorySessionStore, Session, SessionResolver, SessionStore,
};
