use anyhow::Result;
use clap::Parser;
use hotkey_trader::{
    alpaca::AlpacaClient,
    datastructures::config::{
        Config, Credentials, DATA_BASE_URL, DEFAULT_DEMO_SYMBOL, LIVE_BASE_URL, PAPER_BASE_URL,
    },
    dispatcher::AppContext,
    terminal::TerminalUi,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Place Alpaca orders with single key presses.
#[derive(Parser)]
#[command(name = "hotkey-trader", version, about, long_about = None)]
struct Cli {
    /// Send orders to the live account instead of paper trading
    #[arg(long)]
    live: bool,

    /// Trading API base URL (overrides --live)
    #[arg(long, env = "ALPACA_BASE_URL")]
    base_url: Option<String>,

    /// Market data API base URL
    #[arg(long, env = "ALPACA_DATA_URL", default_value = DATA_BASE_URL)]
    data_url: String,

    /// Symbol sold by the S/C/P/T keys
    #[arg(long, default_value = DEFAULT_DEMO_SYMBOL)]
    demo_symbol: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env must be visible before clap reads its env fallbacks.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let default_base_url = if cli.live { LIVE_BASE_URL } else { PAPER_BASE_URL };
    let base_url = cli.base_url.unwrap_or_else(|| default_base_url.to_string());
    let config = Config::builder()
        .alpaca_base_url(base_url)
        .alpaca_data_url(cli.data_url)
        .alpaca_credentials(Credentials::from_env())
        .demo_symbol(cli.demo_symbol)
        .build();
    info!(base_url = %config.alpaca_base_url, credentials = ?config.credentials, "Starting");

    let client = AlpacaClient::new(&config);
    let mut app = AppContext::new(client, TerminalUi::stdio(), config.demo_symbol.as_str());

    app.ui_mut().show_banner(&config.demo_symbol)?;
    while let Some(key) = app.ui_mut().next_key().await {
        app.handle_key(key).await;
    }

    info!(last_status = %app.status(), "Input closed, exiting");
    Ok(())
}
