use std::sync::Arc;

mod desktop;

pub use desktop::DesktopLinkOpener;

/// Opens roadmap links outside the app window.
pub trait UiLinkOpener: Send + Sync {
    fn open_url(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn UiLinkOpener>;

/// Only plain web links are handed to the system.
pub(crate) fn is_web_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::is_web_url;

    #[test]
    fn only_http_links_are_opened() {
        assert!(is_web_url("https://roadmap.sh/frontend"));
        assert!(is_web_url("  HTTP://example.com "));
        assert!(!is_web_url("file:///etc/passwd"));
        assert!(!is_web_url("javascript:alert(1)"));
    }
}
