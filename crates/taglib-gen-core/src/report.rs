//! Summary of a generation run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReport {
    /// Directory registered as a compile source root.
    pub output_dir: PathBuf,

    /// Resource roots that were scanned, in order.
    pub resource_roots: Vec<PathBuf>,

    /// Generated interfaces in fully qualified name order.
    pub interfaces: Vec<InterfaceSummary>,
}

impl GenerateReport {
    /// Total number of methods across all interfaces.
    pub fn method_count(&self) -> usize {
        self.interfaces.iter().map(|i| i.methods).sum()
    }

    /// Total number of tags across all interfaces.
    pub fn tag_count(&self) -> usize {
        self.interfaces.iter().map(|i| i.tags).sum()
    }
}

/// One generated interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceSummary {
    pub fqn: String,
    pub uri: String,
    pub source_file: PathBuf,
    pub tags: usize,
    pub methods: usize,
}
