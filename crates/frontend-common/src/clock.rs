//! Browser clock

use examina_core::Clock;

/// Wall clock backed by `js_sys::Date`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
