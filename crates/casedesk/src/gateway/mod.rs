//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway::send`]. The gateway attaches
//! the bearer token, renews it once on a 401 and tears the session down
//! when renewal is impossible.

mod client;
pub(crate) mod endpoints;
mod request;

pub use client::{Download, Gateway};
pub use request::{ApiRequest, Attempt, FilePart, Multipart, RequestBody};
pub use reqwest::Method;
