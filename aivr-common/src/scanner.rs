//! Image directory scanner
//!
//! Builds a [`Manifest`] from one directory per label. Only regular files
//! directly inside the directory are listed (no recursion), filtered to the
//! supported image extensions and sorted by file name so repeated runs
//! produce the same manifest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::mime::is_supported_image;
use crate::model::{Label, Manifest};
use crate::paths::to_posix;
use crate::{Error, Result};

/// File name of the generated manifest inside the asset root
pub const MANIFEST_FILE: &str = "image-manifest.json";

/// Candidate directories per label, relative to the asset root
///
/// The first candidate that exists is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelDirs {
    #[serde(default = "default_human_dirs")]
    pub human: Vec<PathBuf>,
    #[serde(default = "default_ai_dirs")]
    pub ai: Vec<PathBuf>,
}

fn default_human_dirs() -> Vec<PathBuf> {
    vec![
        ["assets", "Art", "RealArt"].iter().collect(),
        ["assets", "RealArt"].iter().collect(),
    ]
}

fn default_ai_dirs() -> Vec<PathBuf> {
    vec![
        ["assets", "Art", "AiArtData"].iter().collect(),
        ["assets", "AiArtData"].iter().collect(),
    ]
}

impl Default for LabelDirs {
    fn default() -> Self {
        Self {
            human: default_human_dirs(),
            ai: default_ai_dirs(),
        }
    }
}

impl LabelDirs {
    pub fn candidates(&self, label: Label) -> &[PathBuf] {
        match label {
            Label::Human => &self.human,
            Label::Ai => &self.ai,
        }
    }
}

/// Scans label directories under an asset root
pub struct ImageScanner {
    root: PathBuf,
}

impl ImageScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First candidate (relative candidates are joined to the root) that is
    /// an existing directory
    pub fn first_existing_dir(&self, candidates: &[PathBuf]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.is_dir())
    }

    /// Supported images directly inside `dir`, as `/`-separated paths
    /// relative to the root
    pub fn list_images(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut images = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error accessing entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            images.push(to_posix(relative));
        }

        debug!("Found {} images in {}", images.len(), dir.display());
        Ok(images)
    }

    fn scan_label(&self, dirs: &LabelDirs, label: Label) -> Result<Vec<String>> {
        let candidates = dirs.candidates(label);
        let dir = self.first_existing_dir(candidates).ok_or_else(|| {
            let wanted = candidates
                .first()
                .map(|c| self.root.join(c))
                .unwrap_or_else(|| self.root.clone());
            Error::DirectoryNotFound(wanted)
        })?;

        let images = self.list_images(&dir)?;
        if images.is_empty() {
            return Err(Error::EmptyPool(label));
        }
        Ok(images)
    }

    /// Scan both labels; fails if a directory is missing or a pool is empty
    pub fn scan(&self, dirs: &LabelDirs) -> Result<Manifest> {
        Ok(Manifest {
            human: self.scan_label(dirs, Label::Human)?,
            ai: self.scan_label(dirs, Label::Ai)?,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Write `manifest` to `<root>/image-manifest.json`
    pub fn write_manifest(&self, manifest: &Manifest) -> Result<PathBuf> {
        let path = self.manifest_path();
        fs::write(&path, manifest.to_pretty_json()?)?;
        Ok(path)
    }

    /// Read `<root>/image-manifest.json`
    pub fn read_manifest(&self) -> Result<Manifest> {
        let json = fs::read_to_string(self.manifest_path())?;
        Manifest::from_json(&json)
    }
}
