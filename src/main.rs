use std::env;

use clap::Parser;
use dotenvy::dotenv;

use finance_tracker_backend::api::{app_router, config::ApiConfig};
use finance_tracker_backend::utils::app_config::{AppConfig, DatabaseArgs};

#[derive(Parser, Debug)]
#[command(name = "finance-tracker-backend")]
#[command(about = "JSON backend for the personal finance tracker", long_about = None)]
struct Args {
    #[command(flatten)]
    api: ApiConfig,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let args = Args::parse();

    let app_config = AppConfig::connect(&args.database).await?;

    if let Some(dir) = &args.api.static_dir {
        tracing::info!("Serving front end from {}", dir.display());
    }

    let router = app_router(app_config, &args.api);

    let addr = args.api.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Starting finance tracker API on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
