use std::path::PathBuf;

use clap::Parser;
use regex::Regex;

const DEFAULT_FILE_PATTERN: &str = r"^([A-Za-z]+)_values\.csv$";

/// Runtime configuration for the cryptick web service.
///
/// Every flag has an environment fallback so the service can run with no
/// arguments in containerized deployments.
#[derive(Debug, Parser)]
#[command(name = "cryptick-web", about = "Price-history analytics service", version)]
pub struct Settings {
    /// Directory holding the per-symbol CSV price files.
    #[arg(long, env = "CRYPTICK_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// File-name pattern with one capture group yielding the symbol.
    #[arg(long, env = "CRYPTICK_FILE_PATTERN", default_value = DEFAULT_FILE_PATTERN)]
    pub file_pattern: String,

    /// TCP port to listen on.
    #[arg(long, env = "CRYPTICK_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Settings {
    pub fn compiled_pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.file_pattern)
    }
}
