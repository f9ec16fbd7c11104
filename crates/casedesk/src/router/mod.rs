//! Client-side route table, navigation guard and router.
//!
//! The route table is static. [`resolve`] maps a path to a route,
//! [`guard`] decides whether navigation may proceed for the current
//! [`AuthState`], and [`Router`] ties both together and tracks where the
//! user currently is.

mod guard;
mod navigator;
mod routes;

pub use guard::{AuthState, GuardDecision, Redirect, guard};
pub use navigator::{HISTORY_LIMIT, Location, Navigation, Navigator, NoopNavigator, Router};
pub use routes::{ROUTES, ResolvedRoute, Route, RouteName, resolve};
