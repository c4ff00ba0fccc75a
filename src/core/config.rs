//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the per-directory config
pub const PROJECT_CONFIG: &str = ".formkit.yaml";

/// formkit configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format for submitted values (json or yaml)
    pub output: Option<String>,

    /// Force colors on or off
    pub color: Option<bool>,

    /// Default log filter when FORMKIT_LOG is unset
    pub log: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(Self::global_config_path().as_deref(), &cwd)
    }

    /// Load with an explicit global config path and working directory
    pub fn load_from(global_path: Option<&Path>, cwd: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/formkit/config.yaml)
        if let Some(global) = global_path.and_then(Self::read_file) {
            config.merge(global);
        }

        // 3. Directory config (.formkit.yaml)
        if let Some(local) = Self::read_file(&cwd.join(PROJECT_CONFIG)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(output) = std::env::var("FORMKIT_OUTPUT") {
            config.output = Some(output);
        }
        if let Ok(color) = std::env::var("FORMKIT_COLOR") {
            config.color = parse_bool(&color);
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "formkit")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
    }

    /// Log filter to use when FORMKIT_LOG is unset
    pub fn log_filter(&self) -> String {
        self.log.clone().unwrap_or_else(|| "warn".to_string())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "always" => Some(true),
        "0" | "false" | "no" | "off" | "never" => Some(false),
        _ => None,
    }
}
