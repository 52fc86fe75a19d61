//! Configuration for a generation run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, GenResult};

/// Resource directory scanned when none is configured.
pub const DEFAULT_RESOURCE_ROOT: &str = "src/main/resources";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "target/taglib-interface";

/// Inputs of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directories to scan, in order. Not deduplicated.
    #[serde(default = "default_resource_roots")]
    pub resource_roots: Vec<PathBuf>,

    /// Directory generated sources are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_resource_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_RESOURCE_ROOT)]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resource_roots: default_resource_roots(),
            output_dir: default_output_dir(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(resource_roots: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_roots,
            output_dir: output_dir.into(),
        }
    }

    /// Load a JSON configuration file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(path: &Path) -> GenResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenError::io("Failed to read configuration", path, e))?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| GenError::ConfigFormat {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded generator configuration");

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        Self {
            resource_roots: self
                .resource_roots
                .into_iter()
                .map(|root| base.join(root))
                .collect(),
            output_dir: base.join(self.output_dir),
        }
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> GenResult<()> {
        if self.resource_roots.is_empty() {
            return Err(GenError::Config(
                "at least one resource root is required".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(GenError::Config("output directory is empty".to_string()));
        }
        Ok(())
    }
}
