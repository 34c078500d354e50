use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the entry store file. `~/` and `$VAR` are expanded on load.
    #[serde(rename = "data_filepath")]
    pub data_file: String,
    /// Shell command that picks one line from stdin (e.g. `fzf`)
    pub select_cmd: String,
}

/// Default: written to config.toml on first run
pub const DEFAULT_SELECT_CMD: &str = "fzf";

/// Default: data file name inside the config directory
pub const DEFAULT_DATA_FILE: &str = "data.gli";
