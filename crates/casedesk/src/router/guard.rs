//! Navigation guard.

use super::routes::{ResolvedRoute, RouteName};

/// What the guard knows about the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub admin: bool,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Where to send the user instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: RouteName,
    pub query: Vec<(String, String)>,
}

impl Redirect {
    fn to(route: RouteName) -> Self {
        Self {
            route,
            query: Vec::new(),
        }
    }

    /// The redirect target as a path with an encoded query string.
    pub fn to_path(&self) -> String {
        let path = self.route.path().unwrap_or_else(|| "/".to_string());
        if self.query.is_empty() {
            return path;
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", path, query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Redirect),
}

/// Decide whether navigation to `to` may proceed.
///
/// Rules are checked in order:
/// 1. a protected route without a session goes to `Login`, carrying the
///    requested path as `redirect`;
/// 2. an admin route without the admin role goes to `Dashboard`;
/// 3. `Login` with a session goes to `Dashboard`.
pub fn guard(to: &ResolvedRoute, auth: AuthState) -> GuardDecision {
    let route = to.route;

    if route.requires_auth && !auth.authenticated {
        return GuardDecision::Redirect(Redirect {
            route: RouteName::Login,
            query: vec![("redirect".to_string(), to.full_path.clone())],
        });
    }

    if route.requires_admin && !auth.admin {
        return GuardDecision::Redirect(Redirect::to(RouteName::Dashboard));
    }

    if route.name == RouteName::Login && auth.authenticated {
        return GuardDecision::Redirect(Redirect::to(RouteName::Dashboard));
    }

    GuardDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::resolve;

    const SIGNED_IN: AuthState = AuthState {
        authenticated: true,
        admin: false,
    };
    const ADMIN: AuthState = AuthState {
        authenticated: true,
        admin: true,
    };

    #[test]
    fn anonymous_user_is_sent_to_login_with_redirect() {
        let decision = guard(&resolve("/cases/3?tab=docs"), AuthState::anonymous());
        let GuardDecision::Redirect(redirect) = decision else {
            panic!("expected redirect");
        };
        assert_eq!(redirect.route, RouteName::Login);
        assert_eq!(redirect.to_path(), "/login?redirect=%2Fcases%2F3%3Ftab%3Ddocs");
    }

    #[test]
    fn anonymous_user_may_see_login() {
        assert_eq!(
            guard(&resolve("/login"), AuthState::anonymous()),
            GuardDecision::Proceed
        );
    }

    #[test]
    fn non_admin_is_sent_to_dashboard() {
        let decision = guard(&resolve("/admin"), SIGNED_IN);
        assert_eq!(
            decision,
            GuardDecision::Redirect(Redirect::to(RouteName::Dashboard))
        );
        assert_eq!(guard(&resolve("/admin"), ADMIN), GuardDecision::Proceed);
    }

    #[test]
    fn anonymous_admin_route_goes_to_login_first() {
        let GuardDecision::Redirect(redirect) = guard(&resolve("/admin"), AuthState::anonymous())
        else {
            panic!("expected redirect");
        };
        assert_eq!(redirect.route, RouteName::Login);
    }

    #[test]
    fn signed_in_user_skips_login() {
        let decision = guard(&resolve("/login"), SIGNED_IN);
        assert_eq!(
            decision,
            GuardDecision::Redirect(Redirect::to(RouteName::Dashboard))
        );
    }

    #[test]
    fn catch_all_requires_session() {
        assert!(matches!(
            guard(&resolve("/nowhere"), AuthState::anonymous()),
            GuardDecision::Redirect(_)
        ));
        assert_eq!(guard(&resolve("/nowhere"), SIGNED_IN), GuardDecision::Proceed);
    }
}
