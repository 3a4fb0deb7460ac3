use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root_directory: PathBuf,
    pub yaml_extensions: Vec<String>,
    pub json_extension: String,
    pub csv_path: PathBuf,
    /// Worker threads for the parse pool; 0 means one per logical CPU.
    pub workers: usize,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("openapi-directory").join("APIs"),
            yaml_extensions: vec!["yaml".to_string(), "yml".to_string()],
            json_extension: "json".to_string(),
            csv_path: PathBuf::from("data").join("openapi3_stats.csv"),
            workers: 0,
            show_progress: true,
        }
    }
}

impl Config {
    /// Get the default config file path (~/.openapi-stats.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".openapi-stats.toml"))
    }

    /// Load config from the default location, falling back to defaults if it doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = match Self::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("{}, using defaults", e);
                return Ok(Self::default());
            }
        };

        if config_path.exists() {
            info!("Loading configuration from {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Worker count after resolving the "one per CPU" default.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}
