//! Static route table.

use std::collections::BTreeMap;
use std::fmt;

/// Named screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Dashboard,
    CaseList,
    CaseNew,
    CaseDetail,
    CaseEdit,
    DocumentList,
    DocumentUpload,
    DocumentPreview,
    PersonList,
    PersonNew,
    PersonEdit,
    Calendar,
    LegalActList,
    TemplateList,
    Search,
    Admin,
    NotFound,
}

impl RouteName {
    /// The table entry for this route.
    pub fn route(self) -> &'static Route {
        ROUTES
            .iter()
            .find(|r| r.name == self)
            .unwrap_or(&ROUTES[ROUTES.len() - 1])
    }

    /// Build a concrete path, substituting `:param` segments from `params`.
    ///
    /// Returns `None` if a parameter is missing. The catch-all route has no
    /// canonical path and always yields `None`.
    pub fn path_with(self, params: &[(&str, &str)]) -> Option<String> {
        let route = self.route();
        if route.pattern == CATCH_ALL {
            return None;
        }

        let mut out = String::new();
        for segment in segments(route.pattern) {
            out.push('/');
            match segment.strip_prefix(':') {
                Some(name) => {
                    let (_, value) = params.iter().find(|(k, _)| *k == name)?;
                    out.push_str(value);
                }
                None => out.push_str(segment),
            }
        }

        if out.is_empty() {
            out.push('/');
        }
        Some(out)
    }

    /// Path of a parameterless route.
    pub fn path(self) -> Option<String> {
        self.path_with(&[])
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub pattern: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const CATCH_ALL: &str = "/*";

const fn route(name: RouteName, pattern: &'static str) -> Route {
    Route {
        name,
        pattern,
        requires_auth: true,
        requires_admin: false,
    }
}

/// The application's routes, matched in order. The last entry is the
/// catch-all and matches anything.
///
/// Only `Login` is public. Everything else, the catch-all included,
/// requires a session.
pub static ROUTES: &[Route] = &[
    Route {
        requires_auth: false,
        ..route(RouteName::Login, "/login")
    },
    route(RouteName::Dashboard, "/"),
    route(RouteName::CaseList, "/cases"),
    route(RouteName::CaseNew, "/cases/new"),
    route(RouteName::CaseDetail, "/cases/:id"),
    route(RouteName::CaseEdit, "/cases/:id/edit"),
    route(RouteName::DocumentList, "/documents"),
    route(RouteName::DocumentUpload, "/documents/upload"),
    route(RouteName::DocumentPreview, "/documents/:id"),
    route(RouteName::PersonList, "/persons"),
    route(RouteName::PersonNew, "/persons/new"),
    route(RouteName::PersonEdit, "/persons/:id/edit"),
    route(RouteName::Calendar, "/calendar"),
    route(RouteName::LegalActList, "/legal-acts"),
    route(RouteName::TemplateList, "/templates"),
    route(RouteName::Search, "/search"),
    Route {
        requires_admin: true,
        ..route(RouteName::Admin, "/admin")
    },
    route(RouteName::NotFound, CATCH_ALL),
];

/// A path matched against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: &'static Route,
    /// The path as requested, query string included.
    pub full_path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl ResolvedRoute {
    pub fn name(&self) -> RouteName {
        self.route.name
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    if pattern == CATCH_ALL {
        let mut params = BTreeMap::new();
        params.insert(
            "path_match".to_string(),
            path.trim_start_matches('/').to_string(),
        );
        return Some(params);
    }

    let mut params = BTreeMap::new();
    let mut wanted = segments(pattern);
    let mut actual = segments(path);

    loop {
        match (wanted.next(), actual.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(a)) => match w.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), a.to_string());
                }
                None if w == a => {}
                None => return None,
            },
            _ => return None,
        }
    }
}

/// Match `full_path` against [`ROUTES`]. The query string is parsed but
/// plays no part in matching. Always succeeds thanks to the catch-all.
pub fn resolve(full_path: &str) -> ResolvedRoute {
    let (path, query) = match full_path.split_once('?') {
        Some((path, query)) => (path, query),
        None => (full_path, ""),
    };
    let path = path.split('#').next().unwrap_or_default();

    let query = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let (route, params) = ROUTES
        .iter()
        .find_map(|route| match_pattern(route.pattern, path).map(|params| (route, params)))
        .unwrap_or_else(|| (RouteName::NotFound.route(), BTreeMap::new()));

    ResolvedRoute {
        route,
        full_path: full_path.to_string(),
        params,
        query,
    }
}
