use clap::Parser;
use users_etl::config::toml_config::FileConfig;
use users_etl::utils::{logger, validation::Validate};
use users_etl::{CliConfig, EtlEngine, LocalStorage, UsersPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if let Some(path) = config.config.clone() {
        let file_config = FileConfig::from_file(&path)?;
        config.apply_file_config(&file_config);
        tracing::debug!("Loaded config overrides from {}", path);
    }

    if config.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_dir.clone());
    let pipeline = UsersPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Done. Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Fetch pipeline failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
