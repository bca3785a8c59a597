//! Edge route gate middleware
//!
//! Runs on full page navigations, outside the client runtime. Its only view
//! of the session is the cookie mirror the token store maintains; the
//! decision itself is the pure table in `examina_core::routes`.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use examina_core::routes::{GateInput, RouteDecision, RouteGate, LOGIN_PATH};
use examina_core::session::keys;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Gate one navigation: allow it through or redirect
pub async fn route_gate_middleware(
    State(gate): State<Arc<RouteGate>>,
    req: Request,
    next: Next,
) -> Response {
    let cookies = parse_cookies(req.headers());
    let input = GateInput {
        token: cookies.get(keys::COOKIE_TOKEN).map(String::as_str),
        role: cookies.get(keys::COOKIE_USER_ROLE).map(String::as_str),
    };

    match gate.decide(req.uri().path(), input) {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::RedirectToLogin => {
            debug!(path = req.uri().path(), "gate: redirecting to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        RouteDecision::Redirect(dashboard) => {
            debug!(
                path = req.uri().path(),
                dashboard, "gate: redirecting to role dashboard"
            );
            Redirect::temporary(dashboard).into_response()
        }
    }
}

/// Parse the `Cookie` request headers into a name/value map
fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}
