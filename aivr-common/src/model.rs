//! Image labels, records, pools and wire formats

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ground-truth classification of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Human-made art
    Human,
    /// AI-generated art
    Ai,
}

impl Label {
    /// Pick a label with probability 0.5 each
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Label::Human
        } else {
            Label::Ai
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Label::Human => Label::Ai,
            Label::Ai => Label::Human,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Human => "human",
            Label::Ai => "ai",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Label::Human),
            "ai" => Ok(Label::Ai),
            other => Err(Error::InvalidLabel(other.to_string())),
        }
    }
}

/// One image and its true label
///
/// `url` is whatever the consumer can load the image from: an encoded path
/// relative to the asset root, or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub url: String,
    pub label: Label,
}

impl ImageRecord {
    pub fn new(url: impl Into<String>, label: Label) -> Self {
        Self {
            url: url.into(),
            label,
        }
    }
}

/// Precomputed listing of image paths grouped by label
///
/// Serialized as `{ "human": [...], "ai": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub human: Vec<String>,
    #[serde(default)]
    pub ai: Vec<String>,
}

impl Manifest {
    /// Parse a manifest document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty JSON (two-space indent) with a trailing newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn paths(&self, label: Label) -> &[String] {
        match label {
            Label::Human => &self.human,
            Label::Ai => &self.ai,
        }
    }
}

/// Response body of `GET /api/next-image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextImageResponse {
    pub image_url: String,
    pub source: Label,
}

/// Two non-empty pools of image paths, one per label
///
/// Both pools are checked at construction so selection never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePool {
    human: Vec<String>,
    ai: Vec<String>,
}

impl ImagePool {
    pub fn new(human: Vec<String>, ai: Vec<String>) -> Result<Self> {
        if human.is_empty() {
            return Err(Error::EmptyPool(Label::Human));
        }
        if ai.is_empty() {
            return Err(Error::EmptyPool(Label::Ai));
        }
        Ok(Self { human, ai })
    }

    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        Self::new(manifest.human, manifest.ai)
    }

    pub fn paths(&self, label: Label) -> &[String] {
        match label {
            Label::Human => &self.human,
            Label::Ai => &self.ai,
        }
    }

    pub fn len(&self, label: Label) -> usize {
        self.paths(label).len()
    }

    /// Uniform pick among the images of one label
    pub fn pick<R: Rng + ?Sized>(&self, label: Label, rng: &mut R) -> ImageRecord {
        let path = self
            .paths(label)
            .choose(rng)
            .cloned()
            .unwrap_or_default();
        ImageRecord::new(path, label)
    }

    /// Uniform label first, then uniform image within that label
    ///
    /// Label frequency stays at 50/50 regardless of pool sizes.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> ImageRecord {
        let label = Label::random(rng);
        self.pick(label, rng)
    }
}
