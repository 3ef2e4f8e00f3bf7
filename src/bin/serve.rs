use std::sync::Arc;

use clap::Parser;
use users_etl::config::toml_config::FileConfig;
use users_etl::server::{users_router, ServerState};
use users_etl::utils::logger;
use users_etl::utils::validation::validate_path;
use users_etl::LocalStorage;

#[derive(Debug, Parser)]
#[command(name = "serve")]
#[command(about = "Serve the persisted users CSV as JSON over HTTP")]
struct ServeArgs {
    #[arg(long, default_value = "3000")]
    port: u16,

    #[arg(long, default_value = "./data")]
    data_dir: String,

    #[arg(long, default_value = "users.csv")]
    csv_file: String,

    #[arg(long, help = "Optional TOML config file; overrides the flags above")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = ServeArgs::parse();

    logger::init_server_logger();

    if let Some(path) = &args.config {
        let file_config = FileConfig::from_file(path)?;
        args.data_dir = file_config.storage.data_dir.clone();
        if let Some(csv_file) = &file_config.storage.csv_file {
            args.csv_file = csv_file.clone();
        }
        if let Some(port) = file_config.server_port() {
            args.port = port;
        }
    }

    validate_path("data_dir", &args.data_dir)?;
    validate_path("csv_file", &args.csv_file)?;

    let storage = LocalStorage::new(args.data_dir.clone());
    let state = Arc::new(ServerState::new(storage, args.csv_file.clone()));
    let router = users_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Serving {}/{} at http://{}/api/users", args.data_dir, args.csv_file, addr);

    axum::serve(listener, router).await?;
    Ok(())
}
