use std::process::Command;

use tracing::{debug, warn};

use super::{UiLinkOpener, is_web_url};

/// Hands URLs to the system browser.
pub struct DesktopLinkOpener;

impl DesktopLinkOpener {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if !is_web_url(url) {
            warn!(url, "refusing to open non-web link");
            return;
        }
        debug!(url, "opening link in system browser");
        if let Err(err) = Self::command(url).spawn() {
            warn!(url, error = %err, "failed to launch browser");
        }
    }
}
