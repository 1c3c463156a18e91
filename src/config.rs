//! Runtime configuration
//!
//! Command-line flags layer over the environment-derived defaults of the
//! page adapter (`FONTSCOPE_WS_URL`, `FONTSCOPE_CHROME`, `FONTSCOPE_HEADLESS`).

use std::path::PathBuf;

use page_cdp::PageCdpConfig;

use crate::errors::FontscopeError;

/// Connection overrides collected from the command line; anything not given
/// falls back to the environment-derived defaults.
#[derive(Clone, Debug, Default)]
pub struct ConnectionOverrides {
    pub ws_url: Option<String>,
    pub chrome_path: Option<PathBuf>,
    pub headful: bool,
    pub nav_timeout_ms: Option<u64>,
    pub settle_ms: Option<u64>,
}

/// Navigation needs an absolute URL; a bare hostname would be interpreted
/// relative to `about:blank`.
pub fn validate_url(url: &str) -> Result<(), FontscopeError> {
    if url.contains("://") {
        Ok(())
    } else {
        Err(FontscopeError::Config(format!(
            "url must be absolute, e.g. https://example.com (got {url:?})"
        )))
    }
}

/// Resolve the page adapter configuration for one command invocation.
pub fn page_config(overrides: &ConnectionOverrides) -> PageCdpConfig {
    let mut cfg = PageCdpConfig::default();
    if let Some(path) = &overrides.chrome_path {
        // An explicitly requested executable wins over an environment
        // websocket endpoint.
        cfg.executable = path.clone();
        cfg.ws_url = None;
    }
    if let Some(ws) = &overrides.ws_url {
        cfg.ws_url = Some(ws.clone());
    }
    if overrides.headful {
        cfg.headless = false;
    }
    if let Some(ms) = overrides.nav_timeout_ms {
        cfg.nav_timeout_ms = ms;
    }
    if let Some(ms) = overrides.settle_ms {
        cfg.settle_ms = ms;
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_executable_clears_websocket_endpoint() {
        let overrides = ConnectionOverrides {
            chrome_path: Some(PathBuf::from("/opt/chromium")),
            ..Default::default()
        };
        let cfg = page_config(&overrides);
        assert_eq!(cfg.executable, PathBuf::from("/opt/chromium"));
        assert_eq!(cfg.ws_url, None);
    }

    #[test]
    fn websocket_flag_wins_over_executable_flag() {
        let overrides = ConnectionOverrides {
            ws_url: Some("ws://127.0.0.1:9222/devtools/browser/abc".to_string()),
            chrome_path: Some(PathBuf::from("/opt/chromium")),
            ..Default::default()
        };
        let cfg = page_config(&overrides);
        assert_eq!(
            cfg.ws_url.as_deref(),
            Some("ws://127.0.0.1:9222/devtools/browser/abc")
        );
    }

    #[test]
    fn headful_flag_disables_headless() {
        let overrides = ConnectionOverrides {
            headful: true,
            ..Default::default()
        };
        assert!(!page_config(&overrides).headless);
    }

    #[test]
    fn rejects_relative_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("file:///tmp/page.html").is_ok());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn timing_overrides_apply() {
        let overrides = ConnectionOverrides {
            nav_timeout_ms: Some(5_000),
            settle_ms: Some(0),
            ..Default::default()
        };
        let cfg = page_config(&overrides);
        assert_eq!(cfg.nav_timeout_ms, 5_000);
        assert_eq!(cfg.settle_ms, 0);
    }
}
