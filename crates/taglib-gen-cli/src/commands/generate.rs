//! Generate command implementation.
//!
//! Resolves the run configuration from flags, environment and an optional
//! config file, runs the generator and prints the registered source root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use taglib_gen_core::{GenerateReport, GeneratorConfig, TaglibGenerator};
use tracing::info;

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "taglib-gen.json";

/// Arguments of the generate command.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Resource directories to scan (defaults to src/main/resources).
    pub roots: Vec<PathBuf>,

    /// Directory to write generated sources into.
    #[arg(short, long, env = "TAGLIB_GEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// JSON config file with `resource_roots` and `output_dir`.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the generation report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the generate command.
pub fn execute(args: GenerateArgs, quiet: bool) -> Result<()> {
    let config = resolve_config(&args, Path::new("."))?;
    info!(
        roots = config.resource_roots.len(),
        output = %config.output_dir.display(),
        "Generating taglib interfaces"
    );

    let mut source_roots: Vec<PathBuf> = Vec::new();
    let report = TaglibGenerator::new()
        .generate(&config, &mut source_roots)
        .context("Failed to generate taglib type interface")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize generation report")?;
        println!("{}", json);
        return Ok(());
    }

    if !quiet {
        print_summary(&report);
    }
    for root in &source_roots {
        println!("{}", root.display());
    }
    Ok(())
}

/// Build the run configuration.
///
/// Precedence: command-line flags and environment, then the config file
/// (explicit, or `taglib-gen.json` in `cwd`), then defaults.
pub fn resolve_config(args: &GenerateArgs, cwd: &Path) -> Result<GeneratorConfig> {
    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    };

    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default().relative_to(cwd),
    };

    if !args.roots.is_empty() {
        config.resource_roots = args.roots.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(report: &GenerateReport) {
    eprintln!(
        "Generated {} taglib interfaces ({} tags, {} methods) in {}",
        report.interfaces.len(),
        report.tag_count(),
        report.method_count(),
        report.output_dir.display()
    );
    for interface in &report.interfaces {
        eprintln!(
            "  {} <{}> - {} tags",
            interface.fqn, interface.uri, interface.tags
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_relative_to_cwd() {
        let temp = TempDir::new().unwrap();
        let config = resolve_config(&GenerateArgs::default(), temp.path()).unwrap();

        assert_eq!(
            config.resource_roots,
            vec![temp.path().join("src/main/resources")]
        );
        assert_eq!(config.output_dir, temp.path().join("target/taglib-interface"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "resource_roots": ["res"], "output_dir": "gen" }"#,
        )
        .unwrap();

        let from_file = resolve_config(&GenerateArgs::default(), temp.path()).unwrap();
        assert_eq!(from_file.resource_roots, vec![temp.path().join("res")]);
        assert_eq!(from_file.output_dir, temp.path().join("gen"));

        let args = GenerateArgs {
            output: Some(PathBuf::from("/tmp/elsewhere")),
            ..GenerateArgs::default()
        };
        let overridden = resolve_config(&args, temp.path()).unwrap();
        assert_eq!(overridden.resource_roots, vec![temp.path().join("res")]);
        assert_eq!(overridden.output_dir, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        let args = GenerateArgs {
            config: Some(temp.path().join("nope.json")),
            ..GenerateArgs::default()
        };
        assert!(resolve_config(&args, temp.path()).is_err());
    }
}
