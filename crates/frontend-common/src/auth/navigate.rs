//! Browser navigation seam

use examina_core::routes::LOGIN_PATH;
use examina_core::LoginNavigator;

/// `LoginNavigator` over `window.location`
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

impl LoginNavigator for WindowNavigator {
    fn redirect_to_login(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PATH);
        }
    }

    fn on_login_page(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .map(|path| path == LOGIN_PATH || path.starts_with("/login/"))
            .unwrap_or(false)
    }
}
