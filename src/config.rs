//! 配置加载：引擎路径、模型路径、查询超时
//!
//! JSON 配置文件；相对路径相对于配置文件所在目录解析

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Env var naming an alternative config file.
pub const CONFIG_FILE_ENV: &str = "SENTE_CONFIG_FILE";

const DEFAULT_CONFIG_NAME: &str = "sente.json";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, io::Error),
    Parse(PathBuf, serde_json::Error),
    /// A configured file (engine binary, engine config, model) is missing.
    Missing(&'static str, PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(path, e) => {
                write!(f, "failed to read config {}: {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "failed to parse config {}: {}", path.display(), e)
            }
            ConfigError::Missing(role, path) => {
                write!(f, "{} not found: {}", role, path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine binary.
    pub path: PathBuf,
    /// Engine's own config file, passed through as `-config`.
    pub config_path: PathBuf,
    pub model_path: PathBuf,
    pub human_model_path: Option<PathBuf>,
    pub additional_args: Vec<String>,
    pub ld_library_paths: Vec<PathBuf>,
    pub query_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            config_path: PathBuf::new(),
            model_path: PathBuf::new(),
            human_model_path: None,
            additional_args: Vec::new(),
            ld_library_paths: Vec::new(),
            query_timeout_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Arguments after the binary: `analysis -config <cfg> -model <model>`
    /// plus the optional human model and any extra args.
    pub fn command_args(&self) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = vec![
            "analysis".into(),
            "-config".into(),
            self.config_path.clone().into(),
            "-model".into(),
            self.model_path.clone().into(),
        ];
        if let Some(human_model) = &self.human_model_path {
            args.push("-human-model".into());
            args.push(human_model.clone().into());
        }
        args.extend(self.additional_args.iter().map(|a| a.into()));
        args
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub engine: EngineConfig,
}

/// `SENTE_CONFIG_FILE` if set, else `./sente.json`.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let raw =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let mut config: AppConfig =
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;

    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let engine = &mut config.engine;
    engine.path = resolve_path(&base, &engine.path);
    engine.config_path = resolve_path(&base, &engine.config_path);
    engine.model_path = resolve_path(&base, &engine.model_path);
    if let Some(human_model) = &engine.human_model_path {
        engine.human_model_path = Some(resolve_path(&base, human_model));
    }
    engine.ld_library_paths = engine
        .ld_library_paths
        .iter()
        .map(|p| resolve_path(&base, p))
        .collect();

    Ok(config)
}

/// Startup check that every configured file actually exists.
pub fn ensure_engine_available(engine: &EngineConfig) -> Result<()> {
    if !engine.path.is_file() {
        return Err(ConfigError::Missing("engine binary", engine.path.clone()));
    }
    if !engine.config_path.is_file() {
        return Err(ConfigError::Missing(
            "engine config",
            engine.config_path.clone(),
        ));
    }
    if !engine.model_path.is_file() {
        return Err(ConfigError::Missing("model file", engine.model_path.clone()));
    }
    if let Some(human_model) = &engine.human_model_path {
        if !human_model.is_file() {
            return Err(ConfigError::Missing("human model file", human_model.clone()));
        }
    }
    Ok(())
}

fn resolve_path(base: &Path, value: &Path) -> PathBuf {
    if value.as_os_str().is_empty() || value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}
