//! `tradedesk-auth`: session and role boundary.
//!
//! This crate is intentionally decoupled from HTTP: it owns the bearer token
//! (behind a [`TokenStore`]), the role model used to gate portal tabs, and the
//! login/password payloads.

pub mod credentials;
pub mod roles;
pub mod session;

pub use credentials::{Identity, LoginRequest, LoginResponse, PasswordChange, PasswordChangeRequest};
pub use roles::Role;
pub use session::{AuthError, FileTokenStore, MemoryTokenStore, SessionContext, TokenStore};
