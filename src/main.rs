use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fontscope_cli::cli::{self, Cli, Command, ConnectArgs, HighlightArgs, ScanArgs};
use fontscope_cli::config;
use fontscope_cli::errors::FontscopeError;
use fontscope_cli::service::{InspectorService, ProbeRequest, ProbeResponse};
use page_cdp::CdpPage;
use perceiver_font::FontPerceiverBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => run_scan(args).await?,
        Command::Highlight(args) => run_highlight(args).await?,
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FONTSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn open_session(
    connect: &ConnectArgs,
) -> Result<(Arc<CdpPage>, InspectorService), FontscopeError> {
    config::validate_url(&connect.url)?;
    let cfg = config::page_config(&connect.overrides());
    let page = Arc::new(CdpPage::open(&cfg, &connect.url).await?);
    let perceiver = FontPerceiverBuilder::new().with_page(page.clone()).build();
    Ok((page, InspectorService::new(perceiver)))
}

async fn run_scan(args: ScanArgs) -> Result<(), FontscopeError> {
    let (page, service) = open_session(&args.connect).await?;
    let response = service.dispatch(ProbeRequest::GetFonts).await;
    page.close().await;

    if let ProbeResponse::Fonts(payload) = response? {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            print!("{}", cli::render_report(&payload));
        }
    }
    Ok(())
}

async fn run_highlight(args: HighlightArgs) -> Result<(), FontscopeError> {
    let (page, service) = open_session(&args.connect).await?;
    let response = service
        .dispatch(ProbeRequest::HighlightFontAndTag {
            font: args.font.clone(),
            tag: args.tag.clone(),
        })
        .await;

    match response {
        Ok(_) => {
            info!(
                font = %args.font,
                tag = %args.tag,
                hold_ms = args.hold_ms,
                "highlight applied; holding the session open"
            );
            tokio::time::sleep(Duration::from_millis(args.hold_ms)).await;
            page.close().await;
            Ok(())
        }
        Err(err) => {
            page.close().await;
            Err(err.into())
        }
    }
}
