//! CLI for resolving a single page URL
//!
//! Uses the same configuration as the server and prints JSON to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use pagesure::resolve_page_id;
use pagesure_server::{server::build_state, Config};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "resolve")]
#[command(about = "Resolve a page URL to its cached or freshly extracted record")]
struct Cli {
    /// Page URL, e.g. https://facebook.com/SomePage
    url: String,

    /// Only derive the page identifier; no store or network access
    #[arg(long)]
    id_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.id_only {
        let page_id = resolve_page_id(&cli.url)
            .with_context(|| format!("Cannot resolve '{}'", cli.url))?;
        return print_json(&json!({ "page_id": page_id }), cli.pretty);
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = build_state(&config).await?;

    match state.resolver.resolve_url(&cli.url).await {
        Ok(resolution) => print_json(
            &json!({
                "page_id": resolution.page_id,
                "source": resolution.source,
                "data": resolution.record,
            }),
            cli.pretty,
        ),
        Err(e) => {
            print_json(
                &json!({ "error": e.user_message(), "kind": e.kind() }),
                cli.pretty,
            )?;
            Err(e).context("Resolution failed")
        }
    }
}
