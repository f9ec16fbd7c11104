//! Backend endpoint paths and the auth request/response bodies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const AUTH_LOGIN: &str = "/api/auth/login";

/// Never renewed for: a 401 here tears the session down directly.
pub const AUTH_REFRESH: &str = "/api/auth/refresh";

pub const AUTH_LOGOUT: &str = "/api/auth/logout";

pub const AUTH_ME: &str = "/api/auth/me";

pub const AUTH_REGISTER: &str = "/api/auth/register";

pub const CASES: &str = "/api/cases";

pub const DOCUMENTS: &str = "/api/documents";

pub const PERSONS: &str = "/api/persons";

pub const EVENTS: &str = "/api/events";

pub const LEGAL_ACTS: &str = "/api/legal-acts";

pub const TEMPLATES: &str = "/api/templates";

pub const SEARCH: &str = "/api/search";

pub const REPORTS: &str = "/api/reports";

pub const ADMIN: &str = "/api/admin";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the refresh endpoint.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from the refresh endpoint. The refresh token is not rotated.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}
