use bgw_mcp::app::App;
use bgw_mcp::constants::env;
use bgw_mcp::services::config::AppConfig;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries the JSON-RPC stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = std::env::var(env::LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
            EnvFilter::try_new(level.trim().to_lowercase())
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let app = match AppConfig::from_env().and_then(|config| App::initialize(&config)) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            eprintln!("bgw-mcp: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = bgw_mcp::mcp::server::run_stdio(app).await {
        tracing::error!(error = %err, "server stopped");
        eprintln!("bgw-mcp: {}", err);
        std::process::exit(1);
    }
}
