//! generate-manifest - Write image-manifest.json for the quiz
//!
//! Lists the human and AI image directories under the asset root and writes
//! `<root>/image-manifest.json`. Exits non-zero if a directory is missing or
//! either list comes out empty.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aivr_common::config::{resolve, TomlConfig, DEFAULT_ROOT_FOLDER};
use aivr_common::scanner::{ImageScanner, LabelDirs};
use aivr_common::{Error, Label};

/// Command-line arguments for generate-manifest
#[derive(Parser, Debug)]
#[command(name = "generate-manifest")]
#[command(about = "Generate image-manifest.json from the image directories")]
#[command(version)]
struct Args {
    /// Asset root containing the image directories
    #[arg(env = "AIVR_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Optional TOML config file ([server] root_folder, [pools])
    #[arg(short, long, env = "AIVR_CONFIG")]
    config: Option<PathBuf>,

    /// Human image directory, relative to the root (repeatable)
    #[arg(long = "human-dir")]
    human_dirs: Vec<PathBuf>,

    /// AI image directory, relative to the root (repeatable)
    #[arg(long = "ai-dir")]
    ai_dirs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aivr_common=warn,generate_manifest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let toml = match TomlConfig::load_optional(args.config.as_deref()) {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("Failed to load config file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let root = resolve(
        args.root_folder,
        toml.server.root_folder,
        PathBuf::from(DEFAULT_ROOT_FOLDER),
    );
    let mut dirs: LabelDirs = toml.pools;
    if !args.human_dirs.is_empty() {
        dirs.human = args.human_dirs;
    }
    if !args.ai_dirs.is_empty() {
        dirs.ai = args.ai_dirs;
    }

    let scanner = ImageScanner::new(root);
    let manifest = match scanner.scan(&dirs) {
        Ok(manifest) => manifest,
        Err(e) => {
            match &e {
                Error::DirectoryNotFound(_) => {
                    eprintln!("Could not find required folders for manifest generation.")
                }
                Error::EmptyPool(_) => {
                    eprintln!("Manifest generation failed because one dataset is empty.")
                }
                _ => eprintln!("Manifest generation failed."),
            }
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = scanner.write_manifest(&manifest) {
        eprintln!("Failed to write {}: {}", scanner.manifest_path().display(), e);
        return ExitCode::FAILURE;
    }

    println!(
        "Generated image-manifest.json (human={}, ai={})",
        manifest.paths(Label::Human).len(),
        manifest.paths(Label::Ai).len()
    );
    ExitCode::SUCCESS
}
