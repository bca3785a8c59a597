//! Cookie mirror consumed by the edge route gate
//!
//! The gate runs in a separate execution context and reads nothing but these
//! cookies; their names and attributes are the contract in
//! `examina_core::session::keys`.

use examina_core::session::keys;
use examina_core::{AuthError, AuthResult, PersistenceSink, SessionRecord, StoredSession};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

/// `PersistenceSink` writing the cookie mirror; write-only from the client
/// runtime's point of view
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieSink;

fn html_document() -> AuthResult<HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
        .ok_or_else(|| AuthError::storage("document unavailable"))
}

fn is_https() -> bool {
    web_sys::window()
        .and_then(|w| w.location().protocol().ok())
        .map(|protocol| protocol == "https:")
        .unwrap_or(false)
}

/// Serialize one cookie with the contract attributes
fn format_cookie(name: &str, value: &str, expires: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={value}; expires={expires}; path={}; samesite={}",
        keys::COOKIE_PATH,
        keys::COOKIE_SAME_SITE
    );
    if secure {
        cookie.push_str("; secure");
    }
    cookie
}

fn expired_cookie(name: &str) -> String {
    format!(
        "{name}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path={}",
        keys::COOKIE_PATH
    )
}

impl PersistenceSink for CookieSink {
    fn write(&self, record: &SessionRecord) -> AuthResult<()> {
        let document = html_document()?;
        // Cookie lifetime mirrors the token expiry.
        let expires: String = js_sys::Date::new(&JsValue::from_f64(record.expires_at_ms as f64))
            .to_utc_string()
            .into();
        let secure = is_https();

        let pairs = [
            (keys::COOKIE_TOKEN, record.access_token.as_str()),
            (keys::COOKIE_USER_ROLE, record.user.role.as_str()),
            (keys::COOKIE_REFRESH_TOKEN, record.refresh_token.as_str()),
        ];
        for (name, value) in pairs {
            document
                .set_cookie(&format_cookie(name, value, &expires, secure))
                .map_err(|e| AuthError::storage(format!("set cookie {name}: {e:?}")))?;
        }
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        let document = html_document()?;
        for name in [
            keys::COOKIE_TOKEN,
            keys::COOKIE_USER_ROLE,
            keys::COOKIE_REFRESH_TOKEN,
        ] {
            document
                .set_cookie(&expired_cookie(name))
                .map_err(|e| AuthError::storage(format!("clear cookie {name}: {e:?}")))?;
        }
        Ok(())
    }

    fn read(&self) -> AuthResult<Option<StoredSession>> {
        // The durable sink is the load source; the mirror is never read back.
        Ok(None)
    }
}
