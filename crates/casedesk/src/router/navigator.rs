//! Navigation side effects.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::auth::SessionContext;

use super::guard::{GuardDecision, guard};
use super::routes::{ResolvedRoute, RouteName, resolve};

/// A navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The login entry point.
    Login,
    /// An arbitrary application path, query string allowed.
    Path(String),
}

impl Navigation {
    fn target(&self) -> String {
        match self {
            Navigation::Login => RouteName::Login
                .path()
                .unwrap_or_else(|| "/login".to_string()),
            Navigation::Path(path) => path.clone(),
        }
    }
}

/// Receiver of navigation requests.
///
/// The [`Gateway`](crate::Gateway) calls it with [`Navigation::Login`] when it
/// tears a session down. Implementations must not block.
pub trait Navigator: Send + Sync + fmt::Debug {
    fn navigate(&self, to: Navigation);
}

/// Ignores every navigation request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, to: Navigation) {
        debug!(?to, "Navigation ignored");
    }
}

/// Where the router currently points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: RouteName,
    pub full_path: String,
}

impl From<&ResolvedRoute> for Location {
    fn from(resolved: &ResolvedRoute) -> Self {
        Self {
            name: resolved.name(),
            full_path: resolved.full_path.clone(),
        }
    }
}

// Guard redirects never chain deeper than login -> dashboard
const MAX_REDIRECTS: usize = 4;

/// Locations kept in [`Router::history`]; older ones are dropped.
pub const HISTORY_LIMIT: usize = 100;

/// Router over the static route table.
///
/// Every navigation runs through [`guard`] with the session's live
/// [`AuthState`](super::AuthState), following redirects until a route is
/// allowed. The last [`HISTORY_LIMIT`] accepted locations are kept as
/// history.
pub struct Router {
    session: SessionContext,
    history: Mutex<VecDeque<Location>>,
}

impl Router {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// Navigate to `path`, applying the guard. Returns where the user ended up.
    pub fn push(&self, path: &str) -> Location {
        let auth = self.session.auth_state();
        let mut resolved = resolve(path);

        for _ in 0..MAX_REDIRECTS {
            match guard(&resolved, auth) {
                GuardDecision::Proceed => break,
                GuardDecision::Redirect(redirect) => {
                    debug!(
                        from = %resolved.full_path,
                        to = %redirect.route,
                        "Navigation redirected"
                    );
                    resolved = resolve(&redirect.to_path());
                }
            }
        }

        let location = Location::from(&resolved);
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(location.clone());
        location
    }

    /// The current location, if any navigation has happened.
    pub fn current(&self) -> Option<Location> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }

    /// The retained locations, oldest first.
    pub fn history(&self) -> Vec<Location> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Navigator for Router {
    fn navigate(&self, to: Navigation) {
        let location = self.push(&to.target());
        info!(route = %location.name, path = %location.full_path, "Navigated");
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
