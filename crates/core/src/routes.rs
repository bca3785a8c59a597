//! Route authorization gate
//!
//! Decides, per navigation, whether a request may proceed. The gate runs at
//! the edge, in a different execution context from the client runtime, so it
//! is a pure function of the incoming path and the cookie-mirrored session
//! fields; it never sees the in-memory token store.

use crate::types::Role;

/// Login entry point
pub const LOGIN_PATH: &str = "/login";

/// Cookie-mirrored session fields as seen by the gate
#[derive(Clone, Copy, Debug, Default)]
pub struct GateInput<'a> {
    pub token: Option<&'a str>,
    pub role: Option<&'a str>,
}

/// Outcome of a gate check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    /// Send the user to their own role's dashboard
    Redirect(&'static str),
}

/// Role-based routing table over path prefixes
pub struct RouteGate {
    public_paths: Vec<&'static str>,
    role_prefixes: Vec<(&'static str, Role)>,
}

impl Default for RouteGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGate {
    pub fn new() -> Self {
        Self {
            public_paths: vec!["/", LOGIN_PATH, "/register", "/forgot-password"],
            role_prefixes: vec![
                ("/admin", Role::Admin),
                ("/professor", Role::Professor),
                ("/student", Role::Student),
            ],
        }
    }

    /// Apply the decision table to one navigation
    pub fn decide(&self, path: &str, input: GateInput<'_>) -> RouteDecision {
        if self.is_public(path) {
            return RouteDecision::Allow;
        }

        let Some(token) = input.token else {
            return RouteDecision::RedirectToLogin;
        };
        if token.is_empty() {
            return RouteDecision::RedirectToLogin;
        }

        // A token without a role is an incomplete or corrupt session.
        let Some(role) = input.role else {
            return RouteDecision::RedirectToLogin;
        };
        let Ok(role) = role.parse::<Role>() else {
            return RouteDecision::RedirectToLogin;
        };

        match self.required_role(path) {
            Some(required) if required != role => RouteDecision::Redirect(role.dashboard_path()),
            _ => RouteDecision::Allow,
        }
    }

    fn is_public(&self, path: &str) -> bool {
        if self.public_paths.contains(&path) {
            return true;
        }
        // Framework internals, API passthrough, and static assets are never
        // gated here.
        path.starts_with("/api/")
            || path.starts_with("/_next/")
            || path.starts_with("/static/")
            || path.ends_with(".ico")
            || path.ends_with(".js")
            || path.ends_with(".css")
            || path.ends_with(".png")
            || path.ends_with(".svg")
    }

    fn required_role(&self, path: &str) -> Option<Role> {
        self.role_prefixes
            .iter()
            .find(|(prefix, _)| {
                path == *prefix || path.starts_with(&format!("{prefix}/"))
            })
            .map(|(_, role)| *role)
    }
}
