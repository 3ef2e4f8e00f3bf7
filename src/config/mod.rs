pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "users-etl")]
#[command(about = "Fetch user records from a JSON API and persist them as CSV")]
pub struct CliConfig {
    #[arg(long, default_value = "https://jsonplaceholder.typicode.com/users")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, default_value = "users.csv")]
    pub csv_file: String,

    #[arg(long, help = "Optional TOML config file; overrides the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies values from a loaded TOML config on top of the flag values.
    pub fn apply_file_config(&mut self, file: &toml_config::FileConfig) {
        self.api_endpoint = file.source.endpoint.clone();
        self.data_dir = file.storage.data_dir.clone();
        if let Some(csv_file) = &file.storage.csv_file {
            self.csv_file = csv_file.clone();
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn csv_file(&self) -> &str {
        &self.csv_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_path("data_dir", &self.data_dir)?;
        validate_path("csv_file", &self.csv_file)?;
        Ok(())
    }
}
