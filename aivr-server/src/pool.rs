//! Image pool for server-side selection
//!
//! Built once at startup, either from the generated manifest or from a live
//! scan of the label directories. An empty pool is a startup error.

use std::path::Path;

use aivr_common::scanner::{ImageScanner, LabelDirs};
use aivr_common::{ImagePool, Label, Result};
use clap::ValueEnum;
use tracing::info;

/// Where the pool comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PoolOrigin {
    /// `<root>/image-manifest.json`
    #[default]
    Manifest,
    /// Scan the label directories at startup
    Scan,
}

/// Load the pool and check both labels have images
pub fn build_pool(root: &Path, origin: PoolOrigin, dirs: &LabelDirs) -> Result<ImagePool> {
    let scanner = ImageScanner::new(root);
    let manifest = match origin {
        PoolOrigin::Manifest => {
            info!("Loading image pool from {}", scanner.manifest_path().display());
            scanner.read_manifest()?
        }
        PoolOrigin::Scan => {
            info!("Scanning image directories under {}", root.display());
            scanner.scan(dirs)?
        }
    };

    let pool = ImagePool::from_manifest(manifest)?;
    info!(
        "Image pool ready (human={}, ai={})",
        pool.len(Label::Human),
        pool.len(Label::Ai)
    );
    Ok(pool)
}
