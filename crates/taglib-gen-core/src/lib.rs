//! Typed taglib interface generation.
//!
//! Scans resource trees for directories marked with a `taglib` file and
//! generates one Java interface per taglib, with four overloads for every
//! `*.jelly` tag file it contains.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use taglib_gen_core::{GeneratorConfig, TaglibGenerator};
//!
//! fn main() -> Result<(), taglib_gen_core::GenError> {
//!     let config = GeneratorConfig::new(
//!         vec![PathBuf::from("src/main/resources")],
//!         "target/taglib-interface",
//!     );
//!     let mut source_roots: Vec<PathBuf> = Vec::new();
//!     let report = TaglibGenerator::new().generate(&config, &mut source_roots)?;
//!
//!     println!("Generated {} interfaces", report.interfaces.len());
//!     Ok(())
//! }
//! ```

mod config;
mod descriptor;
mod emit;
mod error;
mod generator;
mod host;
mod model;
mod naming;
mod report;

// Re-export public API
pub use config::{GeneratorConfig, DEFAULT_OUTPUT_DIR, DEFAULT_RESOURCE_ROOT};
pub use descriptor::{
    extract_documentation, extract_documentation_from_str, DescriptorSource,
    JellyDescriptorExtractor, DOCUMENTATION_ELEMENT, STAPLER_NAMESPACE,
};
pub use emit::{render_interface, source_path, write_model};
pub use error::{GenError, GenResult, MarkupError};
pub use generator::{TaglibGenerator, TAGLIB_MARKER, TAG_FILE_EXTENSION};
pub use host::BuildHost;
pub use model::{
    GeneratedInterface, GeneratedMethod, Overload, OutputModel, Param, ARGS_TYPE, BODY_TYPE,
    OVERLOADS, TAG_LIBRARY_URI, TYPED_TAG_LIBRARY,
};
pub use naming::{
    capitalize, escape_javadoc, interface_name, method_name, taglib_uri, PackagePath,
    INTERFACE_SUFFIX,
};
pub use report::{GenerateReport, InterfaceSummary};
