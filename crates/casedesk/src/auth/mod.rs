//! Authentication types and session management.
//!
//! The session credential pair lives in a [`SessionContext`], which is
//! restored from and mirrored into a [`CredentialStore`].

mod credentials;
mod session;
mod storage;
mod tokens;

pub use credentials::Credentials;
pub use session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionContext};
pub use storage::{CredentialStore, FileStore, MemoryStore};
pub use tokens::{AccessToken, RefreshToken};
