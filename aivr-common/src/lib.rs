//! # AI vs Real Common Library
//!
//! Shared code for the quiz server, the manifest generator and game clients:
//! - Image labels, records, pools and the manifest format
//! - Manifest directory scanning
//! - URL path encoding and asset-root path safety
//! - MIME type lookup
//! - TOML configuration loading

pub mod config;
pub mod error;
pub mod mime;
pub mod model;
pub mod paths;
pub mod scanner;

pub use error::{Error, Result};
pub use model::{ImagePool, ImageRecord, Label, Manifest, NextImageResponse};
