//! End-to-end tests for taglib interface generation.
//!
//! Each test lays out a resource tree in a temp directory, runs the
//! generator with the real Jelly extractor and inspects the written sources.
//!
//! Run with: `cargo test --package taglib-gen-core --test generate_integration`

use std::fs;
use std::path::{Path, PathBuf};

use taglib_gen_core::{GenError, GeneratorConfig, TaglibGenerator};
use tempfile::TempDir;

/// Write a Jelly tag file, optionally documented.
fn write_tag(path: &Path, documentation: Option<&str>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let doc = documentation
        .map(|d| format!("  <st:documentation>{}</st:documentation>\n", d))
        .unwrap_or_default();
    fs::write(
        path,
        format!(
            "<?jelly escape-by-default='true'?>\n<j:jelly xmlns:j=\"jelly:core\" xmlns:st=\"jelly:stapler\">\n{}  <j:set var=\"x\" value=\"1\"/>\n</j:jelly>\n",
            doc
        ),
    )
    .unwrap();
}

fn mark_taglib(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("taglib"), "").unwrap();
}

fn run(roots: Vec<PathBuf>, out: &Path) -> (Result<taglib_gen_core::GenerateReport, GenError>, Vec<PathBuf>) {
    let mut host: Vec<PathBuf> = Vec::new();
    let result = TaglibGenerator::new().generate(&GeneratorConfig::new(roots, out), &mut host);
    (result, host)
}

// =============================================================================
// Successful runs
// =============================================================================

#[test]
fn test_documented_tag_produces_four_overloads() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("foo"));
    write_tag(&res.join("foo/my-tag.jelly"), Some("Says hi"));
    let out = temp.path().join("out");

    let (result, host) = run(vec![res], &out);
    let report = result.unwrap();

    assert_eq!(host, vec![out.clone()]);
    assert_eq!(report.interfaces.len(), 1);
    assert_eq!(report.interfaces[0].fqn, "FooTagLib");
    assert_eq!(report.interfaces[0].uri, "foo");

    let source = fs::read_to_string(out.join("FooTagLib.java")).unwrap();
    assert!(source.contains("public interface FooTagLib"));
    assert!(source.contains("extends TypedTagLibrary"));
    assert!(source.contains("@TagLibraryUri(\"foo\")"));
    assert_eq!(source.matches("void my_tag(").count(), 4);
    assert!(source.contains("void my_tag(Map args, Closure body);"));
    assert!(source.contains("void my_tag(Closure body);"));
    assert!(source.contains("void my_tag(Map args);"));
    assert!(source.contains("void my_tag();"));
    assert_eq!(source.matches("* Says hi").count(), 4);
}

#[test]
fn test_package_layout_and_uri() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("lib/form"));
    write_tag(&res.join("lib/form/entry.jelly"), None);
    write_tag(&res.join("lib/form/bar.jelly"), None);
    let out = temp.path().join("out");

    let (result, _) = run(vec![res], &out);
    let report = result.unwrap();

    assert_eq!(report.interfaces[0].fqn, "lib.FormTagLib");
    assert_eq!(report.interfaces[0].uri, "lib/form");
    assert_eq!(report.method_count(), 8);

    let path = out.join("lib").join("FormTagLib.java");
    assert_eq!(report.interfaces[0].source_file, path);
    let source = fs::read_to_string(path).unwrap();
    assert!(source.starts_with("package lib;"));
    assert!(source.contains("@TagLibraryUri(\"lib/form\")"));
    assert!(source.contains("void bar();"));
    assert!(source.contains("void entry(Map args);"));
    assert!(!source.contains("/**"));
}

#[test]
fn test_documentation_is_escaped() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("lib/layout"));
    write_tag(
        &res.join("lib/layout/main-panel.jelly"),
        Some("Wraps &lt;div&gt; content &amp; more"),
    );
    let out = temp.path().join("out");

    let (result, _) = run(vec![res], &out);
    result.unwrap();

    let source = fs::read_to_string(out.join("lib/LayoutTagLib.java")).unwrap();
    assert_eq!(source.matches("* Wraps &lt;div> content &amp; more").count(), 4);
    assert!(source.contains("void main_panel(Map args, Closure body);"));
}

#[test]
fn test_latin1_tag_with_ant_pattern_renders_valid_comment() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("lib/form"));
    let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n".to_vec();
    bytes.extend_from_slice(
        b"<j:jelly xmlns:j=\"jelly:core\" xmlns:st=\"jelly:stapler\">\
<st:documentation>Caf\xE9 files matching **/*.xml</st:documentation></j:jelly>",
    );
    fs::write(res.join("lib/form/cafe.jelly"), bytes).unwrap();
    let out = temp.path().join("out");

    let (result, _) = run(vec![res], &out);
    result.unwrap();

    let source = fs::read_to_string(out.join("lib/FormTagLib.java")).unwrap();
    assert_eq!(
        source
            .matches("* Caf\u{e9} files matching **<!---->/*.xml")
            .count(),
        4
    );
    assert_eq!(source.matches("*/").count(), 4);
    assert!(source.contains("void cafe(Map args, Closure body);"));
}

#[test]
fn test_nested_taglib_excludes_inner_tags() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("lib/outer"));
    write_tag(&res.join("lib/outer/a.jelly"), None);
    mark_taglib(&res.join("lib/outer/inner"));
    write_tag(&res.join("lib/outer/inner/b.jelly"), None);
    let out = temp.path().join("out");

    let (result, _) = run(vec![res], &out);
    let report = result.unwrap();

    let fqns: Vec<_> = report.interfaces.iter().map(|i| i.fqn.as_str()).collect();
    assert_eq!(fqns, vec!["lib.OuterTagLib", "lib.outer.InnerTagLib"]);

    let outer = fs::read_to_string(out.join("lib/OuterTagLib.java")).unwrap();
    assert!(outer.contains("void a();"));
    assert!(!outer.contains("void b("));

    let inner = fs::read_to_string(out.join("lib/outer/InnerTagLib.java")).unwrap();
    assert!(inner.contains("package lib.outer;"));
    assert!(inner.contains("@TagLibraryUri(\"lib/outer/inner\")"));
    assert!(inner.contains("void b();"));
}

#[test]
fn test_empty_taglib_and_multiple_roots() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    mark_taglib(&first.join("lib/empty"));
    mark_taglib(&second.join("lib/form"));
    write_tag(&second.join("lib/form/entry.jelly"), None);
    let out = temp.path().join("nested/out");

    let (result, host) = run(vec![first, second], &out);
    let report = result.unwrap();

    assert_eq!(host.len(), 1);
    assert_eq!(report.interfaces.len(), 2);
    let empty = fs::read_to_string(out.join("lib/EmptyTagLib.java")).unwrap();
    assert!(empty.contains("public interface EmptyTagLib"));
    assert!(!empty.contains("void "));
}

#[test]
fn test_no_taglibs_still_registers_output() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    fs::create_dir_all(res.join("images")).unwrap();
    let out = temp.path().join("out");

    let (result, host) = run(vec![res], &out);
    let report = result.unwrap();

    assert!(report.interfaces.is_empty());
    assert!(out.is_dir());
    assert_eq!(host, vec![out]);
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn test_collision_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    mark_taglib(&first.join("lib/form"));
    mark_taglib(&second.join("lib/form"));
    let out = temp.path().join("out");

    let (result, host) = run(vec![first, second], &out);

    let err = result.unwrap_err();
    assert!(matches!(err, GenError::DuplicateInterface { ref existing } if existing == "lib.FormTagLib"));
    assert!(err.to_string().contains("lib.FormTagLib"));
    assert!(!out.exists());
    assert!(host.is_empty());
}

#[test]
fn test_malformed_tag_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let res = temp.path().join("resources");
    mark_taglib(&res.join("lib/form"));
    write_tag(&res.join("lib/form/good.jelly"), Some("fine"));
    fs::write(
        res.join("lib/form/broken.jelly"),
        "<j:jelly xmlns:j=\"jelly:core\"><j:if></j:jelly>",
    )
    .unwrap();
    let out = temp.path().join("out");

    let (result, host) = run(vec![res.clone()], &out);

    match result.unwrap_err() {
        GenError::Parse { path, .. } => assert_eq!(path, res.join("lib/form/broken.jelly")),
        other => panic!("Expected Parse, got {:?}", other),
    }
    assert!(!out.exists());
    assert!(host.is_empty());
}
