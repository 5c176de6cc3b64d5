pub mod builtin;
pub mod schema;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

pub use schema::{parse_hours, CandidateFix, Difficulty, DifficultyParseError, DEFAULT_FIX_HOURS};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed reading catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed parsing JSON catalog {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed parsing TOML catalog {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
    #[error("duplicate checkpoint id in catalog: {0}")]
    DuplicateCheckpoint(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<CandidateFix>),
    Wrapped { fixes: Vec<CandidateFix> },
}

impl CatalogDocument {
    fn into_fixes(self) -> Vec<CandidateFix> {
        match self {
            Self::Bare(fixes) | Self::Wrapped { fixes } => fixes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    fixes: Vec<CandidateFix>,
}

/// Read-only fix catalog. Built once and handed to the optimizer by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub source: String,
    pub raw_hash: String,
    fixes: Vec<CandidateFix>,
}

impl Catalog {
    pub fn with_hash(source: impl Into<String>, fixes: Vec<CandidateFix>) -> Self {
        // Fixes hold only strings, numbers and a unit enum; serde_json writes
        // non-finite floats as null, so serialization has no failure path.
        let canonical = serde_json::to_string(&fixes).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let raw_hash = format!("{:x}", hasher.finalize());
        Self {
            source: source.into(),
            raw_hash,
            fixes,
        }
    }

    pub fn builtin() -> Self {
        Self::with_hash(builtin::BUILTIN_SOURCE, builtin::BUILTIN_FIXES.clone())
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let fixes = match extension.as_deref() {
            Some("json") => serde_json::from_str::<CatalogDocument>(&data)
                .map_err(|source| CatalogError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
                .into_fixes(),
            Some("toml") => {
                toml::from_str::<TomlCatalog>(&data)
                    .map_err(|source| CatalogError::Toml {
                        path: path.to_path_buf(),
                        source,
                    })?
                    .fixes
            }
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };
        ensure_unique(&fixes)?;
        debug!(path = %path.display(), fixes = fixes.len(), "loaded catalog");
        Ok(Self::with_hash(path.display().to_string(), fixes))
    }

    /// Loads `path` when given and non-empty, otherwise the builtin catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::load(path),
            _ => Ok(Self::builtin()),
        }
    }

    pub fn fixes(&self) -> &[CandidateFix] {
        &self.fixes
    }

    pub fn get(&self, checkpoint_id: &str) -> Option<&CandidateFix> {
        self.fixes.iter().find(|f| f.checkpoint_id == checkpoint_id)
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}

fn ensure_unique(fixes: &[CandidateFix]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for fix in fixes {
        if !seen.insert(fix.checkpoint_id.as_str()) {
            return Err(CatalogError::DuplicateCheckpoint(fix.checkpoint_id.clone()));
        }
    }
    Ok(())
}
