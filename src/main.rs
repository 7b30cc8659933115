//! GreenAyu CLI entry point.

use greenayu::cli::{commands, Cli};
use greenayu::utils::toml_config::{load_dotenv, GreenAyuConfig};
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    load_dotenv();
    init_tracing(&cli);

    commands::execute(cli).await?;
    Ok(())
}

/// `--verbose` forces debug; otherwise `RUST_LOG`, then `server.log_level`.
fn init_tracing(cli: &Cli) {
    let filter = log_filter(cli.verbose, std::env::var("RUST_LOG").ok(), || {
        GreenAyuConfig::load_file(&cli.config)
            .map(|config| config.server.log_level)
            .unwrap_or_else(|_| "info".to_string())
    });
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", filter, e);
        EnvFilter::new(crate_filter("info"))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(!cli.no_color)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn crate_filter(level: &str) -> String {
    format!("warn,greenayu={0},greenayu_core={0}", level)
}

fn log_filter(verbose: bool, env: Option<String>, configured: impl FnOnce() -> String) -> String {
    if verbose {
        return crate_filter("debug");
    }
    match env {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => crate_filter(&configured()),
    }
}
