use dristi_common::Navigator;

/// `window.location`を書き換えて遷移する
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                gloo::console::error!(format!("redirect failed: {:?}", e));
            }
        }
    }
}
