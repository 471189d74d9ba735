use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use gamehub_client::{ApiClient, ClientConfig, GameGrid};
use gamehub_core::query::GameQuery;
use gamehub_core::state::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Html,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let query = apply_args(config.query.clone(), &args);
    let format = match arg_value(&args, "--format=") {
        Some("html") => OutputFormat::Html,
        Some("text") | None => OutputFormat::Text,
        Some(other) => {
            tracing::error!("Unknown --format={other}, expected text or html");
            std::process::exit(1);
        },
    };

    let client = match ApiClient::new(&config.api) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        },
    };

    tracing::info!(base_url = client.base_url(), ?query, "Fetching games");
    let mut grid = GameGrid::mount(client, query);

    let interrupted = tokio::select! {
        _ = grid.settled() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        tracing::info!("Interrupted, cancelling request");
        grid.unmount();
        std::process::exit(130);
    }

    let output = match format {
        OutputFormat::Text => grid.render_text(),
        OutputFormat::Html => grid.render_html(),
    };
    print!("{output}");
    if format == OutputFormat::Html {
        println!();
    }

    let failed = grid.state().phase == Phase::Failed;
    grid.unmount();
    if failed {
        std::process::exit(1);
    }
}

/// Value of the first `--name=value` argument with the given prefix.
fn arg_value<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter().find_map(|a| a.strip_prefix(prefix))
}

/// Layer command-line filters over the configured query.
fn apply_args(mut query: GameQuery, args: &[String]) -> GameQuery {
    if let Some(term) = arg_value(args, "--search=") {
        query = query.with_search(term);
    }
    if let Some(genre) = arg_value(args, "--genre=").and_then(|v| v.parse().ok()) {
        query = query.with_genre(genre);
    }
    if let Some(platform) = arg_value(args, "--platform=").and_then(|v| v.parse().ok()) {
        query = query.with_parent_platform(platform);
    }
    if let Some(ordering) = arg_value(args, "--ordering=") {
        query = query.with_ordering(ordering);
    }
    query
}
