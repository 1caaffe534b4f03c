//! # Application configuration
//!
//! Settings are read from a single YAML file:
//!
//! ```yaml
//! data_file: "~/mantenimiento/equipos.xlsx"
//! export_dir: "exports"
//! bind_address: "127.0.0.1:3000"
//! frontend_origin: "http://localhost:8080"
//! report_title: "Calendario de Mantenimiento Preventivo"
//! ```
//!
//! The file named by `MAINTENANCE_CONFIG` wins; otherwise `maintenance.yaml`
//! in the working directory is used when present; otherwise defaults apply.
//! Keys left out of the file keep their default value, and a leading `~`
//! in either path expands to the home directory.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "MAINTENANCE_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "maintenance.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backing table holding every equipment record
    pub data_file: PathBuf,
    /// Where exported reports are written
    pub export_dir: PathBuf,
    pub bind_address: String,
    /// Origin allowed by CORS
    pub frontend_origin: String,
    /// Title printed at the top of every PDF report
    pub report_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/equipos.xlsx"),
            export_dir: PathBuf::from("exports"),
            bind_address: "127.0.0.1:3000".to_string(),
            frontend_origin: "http://localhost:8080".to_string(),
            report_title: "Calendario de Mantenimiento Preventivo".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration for this process
    pub fn load() -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV_VAR).ok();
        let working_dir = std::env::current_dir().context("Failed to read working directory")?;
        Self::load_from(from_env.as_deref(), &working_dir)
    }

    /// Resolve and load the configuration file.
    ///
    /// `explicit` is the value of [`CONFIG_ENV_VAR`], if set; it must point
    /// at an existing file.
    pub fn load_from(explicit: Option<&str>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
            return Self::from_file(&expand_home(Path::new(path.trim())));
        }

        let fallback = working_dir.join(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            return Self::from_file(&fallback);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default().with_expanded_paths())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        let config = Self::from_yaml(&yaml_content)
            .with_context(|| format!("Invalid configuration file {:?}", path))?;
        info!("📋 Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml_content.trim().is_empty() {
            return Ok(Self::default().with_expanded_paths());
        }
        let config: AppConfig = serde_yaml::from_str(yaml_content)?;
        Ok(config.with_expanded_paths())
    }

    fn with_expanded_paths(mut self) -> Self {
        self.data_file = expand_home(&self.data_file);
        self.export_dir = expand_home(&self.export_dir);
        self
    }
}

/// Replace a leading `~` with the home directory, when one is known
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
