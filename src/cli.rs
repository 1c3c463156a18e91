//! Command-line surface and terminal rendering

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use perceiver_font::FontReportPayload;

use crate::config::ConnectionOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "fontscope",
    version,
    about = "Inspect which fonts a web page actually renders, grouped by tag"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a page and report rendered fonts per tag.
    Scan(ScanArgs),
    /// Re-locate and highlight the elements behind one (font, tag) entry.
    Highlight(HighlightArgs),
}

#[derive(Debug, Args)]
pub struct ConnectArgs {
    /// Page to inspect.
    #[arg(long)]
    pub url: String,

    /// DevTools websocket endpoint of an already-running browser.
    #[arg(long)]
    pub ws_url: Option<String>,

    /// Chrome/Chromium executable to launch.
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Launch the browser with a visible window.
    #[arg(long)]
    pub headful: bool,

    /// Navigation timeout in milliseconds.
    #[arg(long)]
    pub nav_timeout_ms: Option<u64>,

    /// Delay between page load and the first snapshot, in milliseconds.
    #[arg(long)]
    pub settle_ms: Option<u64>,
}

impl ConnectArgs {
    pub fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            ws_url: self.ws_url.clone(),
            chrome_path: self.chrome_path.clone(),
            headful: self.headful,
            nav_timeout_ms: self.nav_timeout_ms,
            settle_ms: self.settle_ms,
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Emit the raw report payload as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HighlightArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Font name exactly as it appeared in the scan report.
    #[arg(long)]
    pub font: String,

    /// Tag the font was reported under.
    #[arg(long)]
    pub tag: String,

    /// How long to keep the session open after highlighting, in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub hold_ms: u64,
}

/// Render a report for the terminal: fonts alphabetically, each with its
/// element total and per-tag counts.
pub fn render_report(payload: &FontReportPayload) -> String {
    if payload.tag_by_font.is_empty() {
        return "No visible fonts detected.\n".to_string();
    }

    let mut out = String::new();
    for (font, tags) in &payload.tag_by_font {
        let total: u64 = payload
            .counts_by_font_and_tag
            .get(font)
            .map(|counts| counts.values().sum())
            .unwrap_or(0);
        let _ = writeln!(out, "{font} ({total} elements)");
        for tag in tags {
            let count = payload
                .counts_by_font_and_tag
                .get(font)
                .and_then(|counts| counts.get(tag))
                .copied()
                .unwrap_or(0);
            if count == 0 {
                continue;
            }
            let _ = writeln!(out, "  <{tag}> ({count})");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceiver_font::AttributionReport;

    #[test]
    fn parses_scan_command() {
        let cli = Cli::try_parse_from([
            "fontscope",
            "scan",
            "--url",
            "https://example.com",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.connect.url, "https://example.com");
                assert!(args.json);
            }
            other => panic!("expected scan command, got {other:?}"),
        }
    }

    #[test]
    fn parses_highlight_command_with_defaults() {
        let cli = Cli::try_parse_from([
            "fontscope",
            "highlight",
            "--url",
            "https://example.com",
            "--font",
            "Georgia",
            "--tag",
            "h1",
        ])
        .unwrap();
        match cli.command {
            Command::Highlight(args) => {
                assert_eq!(args.font, "Georgia");
                assert_eq!(args.tag, "h1");
                assert_eq!(args.hold_ms, 5_000);
            }
            other => panic!("expected highlight command, got {other:?}"),
        }
    }

    #[test]
    fn renders_fonts_with_totals_and_badges() {
        let mut report = AttributionReport::default();
        report.record("Georgia", "h1");
        report.record("Arial", "div");
        report.record("Arial", "div");
        report.record("Arial", "span");

        let rendered = render_report(&report.to_payload());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Arial (3 elements)");
        assert_eq!(lines[1], "  <div> (2)");
        assert_eq!(lines[2], "  <span> (1)");
        assert_eq!(lines[3], "Georgia (1 elements)");
    }

    #[test]
    fn renders_empty_report_message() {
        let payload = AttributionReport::default().to_payload();
        assert_eq!(render_report(&payload), "No visible fonts detected.\n");
    }
}
