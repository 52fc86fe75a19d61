//! Taglib discovery and interface synthesis.
//!
//! The walk is depth-first and emits a directory's interface after all of
//! its subdirectories, so nested taglibs are found independently of the
//! taglib that contains them.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::GeneratorConfig;
use crate::descriptor::{DescriptorSource, JellyDescriptorExtractor};
use crate::emit::{source_path, write_model};
use crate::error::{GenError, GenResult};
use crate::host::BuildHost;
use crate::model::OutputModel;
use crate::naming::{interface_name, method_name, taglib_uri, PackagePath};
use crate::report::{GenerateReport, InterfaceSummary};

/// Name of the file that marks a directory as a taglib.
pub const TAGLIB_MARKER: &str = "taglib";

/// Extension of tag files, without the dot.
pub const TAG_FILE_EXTENSION: &str = "jelly";

/// Walks resource roots and builds taglib interfaces.
#[derive(Debug, Default, Clone)]
pub struct TaglibGenerator<D = JellyDescriptorExtractor> {
    descriptors: D,
}

impl TaglibGenerator {
    /// Generator reading tag documentation from disk.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: DescriptorSource> TaglibGenerator<D> {
    /// Generator using a custom documentation source.
    pub fn with_descriptors(descriptors: D) -> Self {
        Self { descriptors }
    }

    /// Run a complete generation.
    ///
    /// Walks every resource root, writes one source file per taglib under
    /// the output directory and registers that directory with `host`.
    /// Nothing is written if any root fails.
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        host: &mut dyn BuildHost,
    ) -> GenResult<GenerateReport> {
        config.validate()?;

        let model = self.collect(&config.resource_roots)?;
        write_model(&model, &config.output_dir)?;
        host.add_compile_source_root(&config.output_dir);

        let interfaces = model
            .interfaces()
            .map(|interface| InterfaceSummary {
                fqn: interface.fqn(),
                uri: interface.uri.clone(),
                source_file: config.output_dir.join(source_path(interface)),
                tags: interface.tag_count(),
                methods: interface.methods.len(),
            })
            .collect();

        let report = GenerateReport {
            output_dir: config.output_dir.clone(),
            resource_roots: config.resource_roots.clone(),
            interfaces,
        };
        info!(
            interfaces = report.interfaces.len(),
            methods = report.method_count(),
            output = %config.output_dir.display(),
            "Generated taglib interfaces"
        );
        Ok(report)
    }

    /// Walk every resource root into a fresh model.
    pub fn collect(&self, resource_roots: &[PathBuf]) -> GenResult<OutputModel> {
        let mut model = OutputModel::new();
        for root in resource_roots {
            if !root.is_dir() {
                warn!(root = %root.display(), "Resource root is not a directory, skipping");
                continue;
            }
            debug!(root = %root.display(), "Scanning resource root");
            self.walk(root, &PackagePath::root(), &mut model)?;
        }
        Ok(model)
    }

    /// Visit `dir`, whose natural package is `package`.
    ///
    /// Symlinked subdirectories are followed; a link back to a directory
    /// already on the current path is skipped.
    pub fn walk(&self, dir: &Path, package: &PackagePath, model: &mut OutputModel) -> GenResult<()> {
        self.visit(dir, package, model, &mut Vec::new())
    }

    fn visit(
        &self,
        dir: &Path,
        package: &PackagePath,
        model: &mut OutputModel,
        ancestors: &mut Vec<PathBuf>,
    ) -> GenResult<()> {
        let canonical = dir
            .canonicalize()
            .map_err(|e| GenError::io("Failed to resolve directory", dir, e))?;
        if ancestors.contains(&canonical) {
            warn!(dir = %dir.display(), "Directory link loops back to an ancestor, skipping");
            return Ok(());
        }
        ancestors.push(canonical);

        for child in list_dir(dir)? {
            if is_directory(&child) {
                let name = entry_name(&child);
                self.visit(child.path(), &package.child(name), model, ancestors)?;
            }
        }
        ancestors.pop();

        if dir.join(TAGLIB_MARKER).exists() {
            self.emit_taglib(dir, package, model)?;
        }
        Ok(())
    }

    fn emit_taglib(&self, dir: &Path, package: &PackagePath, model: &mut OutputModel) -> GenResult<()> {
        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if package.is_root() {
            warn!(dir = %dir.display(), "Taglib marker at a resource root, declaring in the default package");
        }

        let declared_in = package.parent();
        let uri = taglib_uri(&declared_in, &dir_name);
        let interface = model.declare_interface(declared_in, interface_name(&dir_name), uri)?;
        debug!(interface = %interface.fqn(), uri = %interface.uri, "Found taglib");

        let suffix = format!(".{}", TAG_FILE_EXTENSION);
        for entry in list_dir(dir)? {
            let file_name = entry_name(&entry);
            if !file_name.ends_with(&suffix) || !entry.path().is_file() {
                continue;
            }
            let base_name = &file_name[..file_name.len() - suffix.len()];
            if base_name.is_empty() {
                warn!(tag = %entry.path().display(), "Tag file has no base name, skipping");
                continue;
            }

            let documentation = self.descriptors.documentation(entry.path())?;
            let name = method_name(base_name);
            debug!(tag = %name, documented = documentation.is_some(), "Declaring tag methods");
            interface.add_tag(&name, documentation.as_deref());
        }
        Ok(())
    }
}

/// Immediate entries of `dir`, sorted by file name.
fn list_dir(dir: &Path) -> GenResult<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                GenError::io("Failed to list directory", path, e.into())
            })
        })
        .collect()
}

fn is_directory(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        let is_dir = entry.path().is_dir();
        if is_dir {
            debug!(link = %entry.path().display(), "Following directory link");
        }
        is_dir
    } else {
        entry.file_type().is_dir()
    }
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}
