//! Environment-driven configuration.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::decision::converter::{ConverterConfig, DEFAULT_CONVERTER, DEFAULT_TIMEOUT};
use crate::decision::template::{TemplateConfig, TEMPLATE_FILE};
use crate::decision::RenderStrategy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const SCRATCH_DIR_NAME: &str = "stewards-decisions";

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub strategy: RenderStrategy,
    pub template: TemplateConfig,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            strategy: RenderStrategy::default(),
            template: TemplateConfig {
                template_path: get_static_dir().join(TEMPLATE_FILE),
                scratch_dir: env::temp_dir().join(SCRATCH_DIR_NAME),
                converter: ConverterConfig::default(),
            },
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            Err(_) => defaults.port,
        };

        let strategy = match env::var("DECISION_STRATEGY") {
            Ok(raw) => raw
                .parse::<RenderStrategy>()
                .map_err(anyhow::Error::msg)
                .context("invalid DECISION_STRATEGY")?,
            Err(_) => defaults.strategy,
        };

        let template_path = env::var("DECISION_TEMPLATE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.template.template_path);
        let scratch_dir = env::var("DECISION_SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.template.scratch_dir);
        let program = env::var("CONVERTER_BIN")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONVERTER));
        let timeout = match env::var("CONVERTER_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("CONVERTER_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'")
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => defaults.allowed_origins,
        };

        Ok(Self {
            host,
            port,
            strategy,
            template: TemplateConfig {
                template_path,
                scratch_dir,
                converter: ConverterConfig {
                    program,
                    timeout,
                    ..ConverterConfig::default()
                },
            },
            allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
