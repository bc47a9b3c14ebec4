//! Server configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::Parser;
use sentio_trainer::{PipelineConfig, DEFAULT_DATA_PATH, DEFAULT_TEST_FRACTION};

/// Default bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Every flag can also be set through its `SENTIO_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "sentio-server")]
#[command(about = "Serve sentiment predictions over HTTP")]
#[command(version)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    #[arg(short, long, env = "SENTIO_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Tab-separated dataset (`text<TAB>label`, no header)
    #[arg(short, long, env = "SENTIO_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Share of examples held out for evaluation
    #[arg(short, long, env = "SENTIO_TEST_FRACTION", default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Seed for the split and the trainer (unseeded runs differ)
    #[arg(short, long, env = "SENTIO_SEED")]
    pub seed: Option<u64>,

    /// Train once at startup and reuse the model for every request
    #[arg(long, env = "SENTIO_CACHE_MODEL")]
    pub cache_model: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
            cache_model: false,
        }
    }
}

impl ServerConfig {
    /// Pipeline settings derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_data_path(self.data_path.clone())
            .with_test_fraction(self.test_fraction)
            .with_seed(self.seed)
    }
}
