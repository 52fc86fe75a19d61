//! Naming rules for packages, interfaces, methods and taglib URIs.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Suffix appended to the capitalized taglib directory name.
pub const INTERFACE_SUFFIX: &str = "TagLib";

/// A Java package as an ordered list of name segments.
///
/// The root (default) package has no segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PackagePath {
    segments: Vec<String>,
}

impl PackagePath {
    /// The root (default) package.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a package from dotted notation, e.g. `"lib.form"`.
    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Sub-package named `name` inside this package.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Enclosing package. The root package is its own parent.
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dotted form, empty for the root package.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Relative directory holding this package's sources.
    pub fn to_dir(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Fully qualified name of a type called `simple_name` in this package.
    pub fn qualify(&self, simple_name: &str) -> String {
        if self.is_root() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.dotted(), simple_name)
        }
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Interface name for a taglib directory: `form` -> `FormTagLib`.
pub fn interface_name(dir_name: &str) -> String {
    format!("{}{}", capitalize(dir_name), INTERFACE_SUFFIX)
}

/// Method name for a tag file base name: `my-tag` -> `my_tag`.
pub fn method_name(base_name: &str) -> String {
    base_name.replace('-', "_")
}

/// Taglib URI for a directory `dir_name` declared in `package`.
///
/// `<package>.<dirName>` with every `.` turned into `/`. A directory in the
/// root package yields just its own name.
pub fn taglib_uri(package: &PackagePath, dir_name: &str) -> String {
    package.qualify(dir_name).replace('.', "/")
}

/// Make documentation text safe to embed in a Javadoc comment.
///
/// Only `&` and `<` are escaped.
pub fn escape_javadoc(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
