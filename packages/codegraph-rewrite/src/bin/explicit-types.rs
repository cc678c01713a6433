/*
 * Explicit Types CLI
 *
 * Replaces `var` declarations with their explicit types, in place.
 *
 * Usage:
 *   explicit-types src/main/java/App.java
 *   explicit-types --preset conservative --dry-run src/
 *   explicit-types --config explicit-types.yaml --format json src/
 *
 * Output formats:
 *   --format text    Human-readable output (default)
 *   --format json    One JSON SessionResult per line
 */

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use codegraph_rewrite::config::{ConfigResult, Preset, RewriteConfig, ValidatedConfig};
use codegraph_rewrite::features::syntax::LanguageId;
use codegraph_rewrite::{FileSystemSink, JavaProvider, SessionDriver, SessionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Replace implicitly-typed local declarations with explicit types
#[derive(Debug, Parser)]
#[command(name = "explicit-types", version)]
struct Args {
    /// YAML configuration file (schema v1)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preset: minimal, conservative, balanced
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Report the result without writing files
    #[arg(long)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Files outside this directory are left untouched
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Files or directories to convert
    #[arg(required = true, value_name = "PATHS")]
    paths: Vec<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> ConfigResult<ValidatedConfig> {
    let mut config = match &args.config {
        Some(path) => RewriteConfig::from_yaml(path)?.into_inner(),
        None => RewriteConfig::default(),
    };
    if let Some(name) = &args.preset {
        let preset = Preset::from_str(name)?;
        config = config.apply_preset(preset);
    }
    if args.dry_run {
        config = config.dry_run(true);
    }
    if let Some(root) = &args.project_root {
        config = config.project_root(root);
    }
    config.build()
}

/// Expand directories into the supported source files they contain
fn collect_documents(paths: &[PathBuf]) -> Vec<PathBuf> {
    let supported = |path: &Path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(LanguageId::from_extension)
            .is_some()
    };
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && supported(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            documents.extend(found);
        } else {
            // Explicit files go through the session's own validation
            documents.push(path.clone());
        }
    }
    documents
}

fn print_result(result: &SessionResult, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(result) {
            Ok(line) => println!("{}", line),
            Err(err) => error!(error = %err, "cannot serialize session result"),
        },
        OutputFormat::Text => {
            println!("{}", result.summary_line());
            for line in result.message.lines() {
                println!("  {}", line);
            }
            for added in &result.imports_added {
                println!("  + import {};", added);
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };
    debug!(config = %config.describe(), "configuration loaded");

    let driver = SessionDriver::new(
        Arc::new(JavaProvider::new()),
        Arc::new(FileSystemSink::new()),
        config,
    );

    let mut failed = 0usize;
    for document in collect_documents(&args.paths) {
        let result = driver.run_conversion(Some(&document)).await;
        if result.outcome.is_failure() {
            failed += 1;
        }
        print_result(&result, args.format);
    }

    if failed > 0 {
        eprintln!("{} session(s) failed", failed);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
