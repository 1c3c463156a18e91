use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};
use which::which;

/// Configuration for reaching the inspected page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageCdpConfig {
    /// DevTools websocket endpoint of an already-running browser. When set,
    /// no browser is launched.
    pub ws_url: Option<String>,
    pub executable: PathBuf,
    pub headless: bool,
    pub nav_timeout_ms: u64,
    /// Grace period after load before the first snapshot, letting web fonts
    /// finish activating.
    pub settle_ms: u64,
}

impl Default for PageCdpConfig {
    fn default() -> Self {
        Self {
            ws_url: resolve_ws_url(),
            executable: default_chrome_path(),
            headless: resolve_headless_default(),
            nav_timeout_ms: 30_000,
            settle_ms: 250,
        }
    }
}

fn resolve_ws_url() -> Option<String> {
    match env::var("FONTSCOPE_WS_URL") {
        Ok(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Err(_) => None,
    }
}

fn resolve_headless_default() -> bool {
    // FONTSCOPE_HEADLESS: "0", "false", "no", "off" means headful
    match env::var("FONTSCOPE_HEADLESS") {
        Ok(value) => {
            let lower = value.to_ascii_lowercase();
            !matches!(lower.as_str(), "0" | "false" | "no" | "off")
        }
        Err(_) => true,
    }
}

fn default_chrome_path() -> PathBuf {
    detect_chrome_executable().unwrap_or_default()
}

/// Locate a Chrome/Chromium executable: the `FONTSCOPE_CHROME` override
/// first, then `PATH`, then the OS install locations.
pub fn detect_chrome_executable() -> Option<PathBuf> {
    if let Ok(raw) = env::var("FONTSCOPE_CHROME") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let candidate = PathBuf::from(trimmed);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    for name in chrome_executable_names() {
        if let Ok(path) = which(name) {
            return Some(path);
        }
    }

    let skip_defaults = env::var("FONTSCOPE_SKIP_OS_PATHS")
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);

    if !skip_defaults {
        for candidate in os_specific_chrome_paths() {
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    None
}

pub(crate) fn resolve_chrome_path(cfg: &PageCdpConfig) -> Option<PathBuf> {
    if !cfg.executable.as_os_str().is_empty() && cfg.executable.exists() {
        return Some(cfg.executable.clone());
    }
    detect_chrome_executable()
}

fn chrome_executable_names() -> &'static [&'static str] {
    #[cfg(target_os = "windows")]
    {
        &["chrome.exe", "chromium.exe", "msedge.exe"]
    }

    #[cfg(not(target_os = "windows"))]
    {
        &[
            "google-chrome-stable",
            "google-chrome",
            "chromium",
            "chromium-browser",
        ]
    }
}

fn os_specific_chrome_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let mut paths = Vec::new();
        for key in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
            if let Ok(value) = env::var(key) {
                let root = PathBuf::from(value.trim());
                paths.push(root.join("Google/Chrome/Application/chrome.exe"));
                paths.push(root.join("Chromium/Application/chrome.exe"));
            }
        }
        paths
    }

    #[cfg(target_os = "macos")]
    {
        vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ]
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        vec![
            PathBuf::from("/usr/bin/google-chrome-stable"),
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/usr/bin/chromium-browser"),
            PathBuf::from("/usr/bin/chromium"),
        ]
    }
}
