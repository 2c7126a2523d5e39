use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub build: BuildConfig,
}

/// Where the site generator reads from and writes to.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub static_dir: PathBuf,
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    /// Remove the output directory before copying static assets.
    pub clean: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { clean: true }
    }
}

impl Config {
    /// The configuration bundled with the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// A file that exists but does not parse is reported and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                    Self::compiled_default()
                }
            },
            Err(_) => Self::compiled_default(),
        }
    }
}
