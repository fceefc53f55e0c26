use clap::Parser;
use huehook::bridge::{self, BridgeClient};
use huehook::config::{Cli, Command, Config};
use huehook::handler::AppState;
use huehook::router::build_router;
use huehook::unpack_error;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Loaded before anything else so it can feed RUST_LOG too. A missing
    // .env is fine, everything can come from the real environment.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::resolve(args.config_path.as_deref()).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?args.config_path, "failed to load config");
        std::process::exit(1);
    });

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Register { devicetype } => register(cfg, &devicetype).await,
    }
}

async fn serve(cfg: Config) {
    tracing::info!("huehook.svc starting");

    if let Err(e) = cfg.validate() {
        tracing::error!(error = %e, "invalid bridge config");
        std::process::exit(1);
    }

    let bridge = BridgeClient::from_config(&cfg.bridge).unwrap_or_else(|e| {
        tracing::error!(error = %unpack_error(&e), "failed to setup bridge client");
        std::process::exit(1);
    });
    tracing::info!(
        bridge = %cfg.bridge.ip,
        timeout_seconds = cfg.bridge.timeout_seconds,
        "proxying hooks to bridge"
    );

    let app = build_router(AppState::new(bridge));

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    let cancellation_token = CancellationToken::new();
    let ctrl_c_token = cancellation_token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl+c signal received, preparing to shutdown");
        }
        ctrl_c_token.cancel();
    });

    tracing::info!("huehook.svc running on {}", &address);
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
    {
        tracing::error!(error = %err, "server stopped unexpectedly");
        std::process::exit(1);
    }

    tracing::info!("huehook.svc going off, graceful shutdown complete");
}

async fn register(cfg: Config, devicetype: &str) {
    if cfg.bridge.ip.trim().is_empty() {
        tracing::error!("bridge.ip is empty, set it in the config file or via HUE_IP");
        std::process::exit(1);
    }

    match bridge::register(&cfg.bridge.registration_url(), devicetype, cfg.bridge.timeout()).await {
        Ok(username) => {
            tracing::info!(username = %username, "bridge issued a username");
            println!("{}", username);
        }
        Err(e) if e.is_link_button_not_pressed() => {
            tracing::error!("press the link button on the bridge, then run register again within 30 seconds");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %unpack_error(&e), "registration failed");
            std::process::exit(1);
        }
    }
}
