pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{etl::EtlEngine, pipeline::UsersPipeline};
pub use domain::model::Record;
pub use utils::error::{EtlError, Result};
