//! casedesk - client library for a legal case-management backend
//!
//! All backend traffic flows through a [`Gateway`], which attaches the
//! session's bearer token, renews it once when the backend answers 401,
//! and tears the session down when renewal is impossible. On top of it sit
//! typed per-resource wrappers ([`api`]), a route table with an
//! authentication guard ([`router`]) and caching state stores ([`store`]).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use casedesk::{Client, ClientConfig, Credentials, MemoryStore, Router, SessionContext};
//! use casedesk::models::ListParams;
//!
//! # async fn example() -> casedesk::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let session = SessionContext::restore(Arc::new(MemoryStore::new()))?;
//! let router = Arc::new(Router::new(session.clone()));
//! let client = Client::new(&config, session, router);
//!
//! let mut auth = client.auth_store();
//! auth.login(&Credentials::new("clerk", "correct horse battery")).await?;
//!
//! let mut cases = client.cases_store();
//! cases.fetch(ListParams::new().filter("case_status", "in_progress")).await?;
//! for case in cases.items() {
//!     println!("{}: {}", case.case_number, case.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod router;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{CredentialStore, Credentials, FileStore, MemoryStore, SessionContext};
pub use client::Client;
pub use config::ClientConfig;
pub use error::Error;
pub use gateway::{ApiRequest, Download, Gateway};
pub use router::{Navigation, Navigator, NoopNavigator, Router};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
