//! Configuration for importer paths and endpoints.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PBIMPORT_HOME, PBIMPORT_CONTENT, PBIMPORT_SERVICE_URL)
//! 2. Config file (.pbimport/config.yaml)
//! 3. Defaults (~/.pbimport)
//!
//! Config file discovery:
//! - Searches current directory and parents for .pbimport/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::pathbuilder::DEFAULT_SERVICE_URL;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub service: Option<ServiceConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Content library directory (relative to config file)
    pub content: Option<String>,
    /// Imported record directory (relative to config file)
    pub records: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Build export endpoint override
    pub url: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the importer home directory
    pub home: PathBuf,
    /// Absolute path to the content library directory
    pub content: PathBuf,
    /// Absolute path to the records directory
    pub records: PathBuf,
    /// Build export endpoint
    pub service_url: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".pbimport").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".pbimport");

    let config_file = find_config_file();

    let (home, content, records, service_url) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .pbimport/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = std::env::var("PBIMPORT_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let content = if let Ok(env_content) = std::env::var("PBIMPORT_CONTENT") {
            PathBuf::from(env_content)
        } else if let Some(ref content_path) = config.paths.content {
            resolve_path(base_dir, content_path)
        } else {
            home.join("content")
        };

        let records = if let Some(ref records_path) = config.paths.records {
            resolve_path(base_dir, records_path)
        } else {
            home.join("records")
        };

        let service_url = std::env::var("PBIMPORT_SERVICE_URL")
            .ok()
            .or_else(|| config.service.as_ref().and_then(|s| s.url.clone()))
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        (home, content, records, service_url)
    } else {
        let home = std::env::var("PBIMPORT_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let content = std::env::var("PBIMPORT_CONTENT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("content"));

        let records = home.join("records");

        let service_url = std::env::var("PBIMPORT_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());

        (home, content, records, service_url)
    };

    Ok(ResolvedConfig {
        home,
        content,
        records,
        service_url,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
