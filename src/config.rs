use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::optimizer::scenario::DEFAULT_SCENARIO_SPREAD;
use crate::optimizer::{Baseline, ConstraintSet};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub baseline: BaselineConfig,
    #[serde(default)]
    pub constraints: ConstraintSet,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_current_score")]
    pub current_score: f64,
    #[serde(default = "default_current_exposure")]
    pub current_exposure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_spread")]
    pub spread: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub current_score: Option<f64>,
    pub current_exposure: Option<f64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/metris-planner/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let mut parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        parsed.constraints = parsed.constraints.within_ranges();
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.catalog_path {
            self.catalog.path = path.display().to_string();
        }
        if let Some(score) = overrides.current_score {
            self.baseline.current_score = score;
        }
        if let Some(exposure) = overrides.current_exposure {
            self.baseline.current_exposure = exposure;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn baseline(&self) -> Baseline {
        Baseline {
            current_score: self.baseline.current_score,
            current_exposure: self.baseline.current_exposure,
        }
    }

    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        let trimmed = self.catalog.path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_tilde(trimmed))
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.resolved_catalog_path();
        Catalog::load_or_builtin(path.as_deref()).context("failed loading fix catalog")
    }

    pub fn default_template() -> String {
        let template = r#"[baseline]
current_score = 648.0
current_exposure = 4200000.0

[constraints]
# Values outside the slider ranges are pulled to the nearest bound.
risk_tolerance = 0.5
budget_constraint = 520000.0
target_score = 850.0
timeline = 90

[catalog]
# Empty path uses the built-in demo catalog. Accepts .json or .toml.
path = ""

[scenarios]
spread = 0.2

[server]
host = "127.0.0.1"
port = 3002
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            current_score: default_current_score(),
            current_exposure: default_current_exposure(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            spread: default_spread(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_current_score() -> f64 {
    Baseline::default().current_score
}

fn default_current_exposure() -> f64 {
    Baseline::default().current_exposure
}

fn default_spread() -> f64 {
    DEFAULT_SCENARIO_SPREAD
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3002
}
