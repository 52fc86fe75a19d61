//! Java source rendering and materialization.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use askama::Template;
use tracing::{debug, info};

use crate::error::{GenError, GenResult};
use crate::model::{GeneratedInterface, GeneratedMethod, OutputModel, TAG_LIBRARY_URI};

const COMMENT_END: &str = "*/";
const COMMENT_END_GUARD: &str = "*<!---->/";

/// Askama template for one generated interface.
#[derive(Template)]
#[template(path = "taglib_interface.java", escape = "none")]
struct InterfaceTemplate<'a> {
    package: String,
    imports: Vec<&'a str>,
    uri: String,
    name: &'a str,
    extends: Vec<&'a str>,
    methods: Vec<MethodView>,
}

struct MethodView {
    name: String,
    params: String,
    javadoc: Vec<String>,
}

impl MethodView {
    fn from_method(method: &GeneratedMethod) -> Self {
        let params = method
            .params
            .iter()
            .map(|p| format!("{} {}", p.simple_type(), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            name: method.name.clone(),
            params,
            javadoc: method.javadoc.as_deref().map(javadoc_lines).unwrap_or_default(),
        }
    }
}

/// Render an interface as a Java compilation unit.
pub fn render_interface(interface: &GeneratedInterface) -> GenResult<String> {
    let mut imports = BTreeSet::new();
    imports.insert(TAG_LIBRARY_URI);
    for parent in &interface.extends {
        imports.insert(parent.as_str());
    }
    for param in interface.methods.iter().flat_map(|m| &m.params) {
        imports.insert(param.type_name.as_str());
    }

    let template = InterfaceTemplate {
        package: interface.package.dotted(),
        imports: imports.into_iter().collect(),
        uri: java_string_content(&interface.uri),
        name: &interface.name,
        extends: interface.extends.iter().map(|e| simple_name(e)).collect(),
        methods: interface.methods.iter().map(MethodView::from_method).collect(),
    };
    template.render().map_err(|source| GenError::Render {
        name: interface.fqn(),
        source,
    })
}

/// Relative path of the source file for `interface`.
pub fn source_path(interface: &GeneratedInterface) -> PathBuf {
    interface
        .package
        .to_dir()
        .join(format!("{}.java", interface.name))
}

/// Write every interface of `model` under `output_dir`.
///
/// Creates `output_dir` and package directories as needed and returns the
/// written files in model order.
pub fn write_model(model: &OutputModel, output_dir: &Path) -> GenResult<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| GenError::io("Failed to create output directory", output_dir, e))?;

    let mut written = Vec::with_capacity(model.len());
    for interface in model.interfaces() {
        let path = output_dir.join(source_path(interface));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GenError::io("Failed to create package directory", parent, e))?;
        }
        let source = render_interface(interface)?;
        std::fs::write(&path, source)
            .map_err(|e| GenError::io("Failed to write generated source", &path, e))?;
        debug!(path = %path.display(), interface = %interface.fqn(), "Wrote interface");
        written.push(path);
    }

    info!(
        output = %output_dir.display(),
        files = written.len(),
        "Materialized taglib interfaces"
    );
    Ok(written)
}

fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// Split documentation into Javadoc lines.
///
/// Lines are kept as written, except that every `*/` is broken up so the
/// text cannot close the comment it sits in.
fn javadoc_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.replace(COMMENT_END, COMMENT_END_GUARD))
        .collect()
}

fn java_string_content(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
