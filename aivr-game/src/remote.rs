//! Providers that talk to the quiz server over HTTP
//!
//! - [`ManifestSource`]: fetches `image-manifest.json` once, then selects
//!   locally every round
//! - [`ApiSource`]: asks `GET /api/next-image` every round; the server selects

use aivr_common::paths::encode_path;
use aivr_common::scanner::MANIFEST_FILE;
use aivr_common::{ImagePool, ImageRecord, Label, Manifest, NextImageResponse};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::source::ImageSource;

/// Path of the selection endpoint, relative to the server base
pub const NEXT_IMAGE_PATH: &str = "api/next-image";

/// Parse a base URL, making sure relative joins stay under its path
pub fn parse_base_url(base: &str) -> GameResult<Url> {
    let mut url = Url::parse(base).map_err(|e| GameError::Url(format!("{}: {}", base, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join(base: &Url, relative: &str) -> GameResult<Url> {
    base.join(relative)
        .map_err(|e| GameError::Url(format!("{} + {}: {}", base, relative, e)))
}

async fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: Url) -> GameResult<T> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(GameError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| GameError::Payload(format!("{}: {}", url, e)))
}

/// Manifest delivery: one fetch, local selection
pub struct ManifestSource {
    client: Client,
    base: Url,
    pool: Option<ImagePool>,
    rng: StdRng,
}

impl ManifestSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self {
            client,
            base,
            pool: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn manifest_url(&self) -> GameResult<Url> {
        join(&self.base, MANIFEST_FILE)
    }

    pub fn is_prepared(&self) -> bool {
        self.pool.is_some()
    }
}

#[async_trait]
impl ImageSource for ManifestSource {
    async fn prepare(&mut self) -> GameResult<()> {
        let url = self.manifest_url()?;
        debug!("Fetching manifest from {}", url);

        let manifest: Manifest = get_json(&self.client, url).await?;
        let pool = ImagePool::from_manifest(manifest)?;
        info!(
            "Manifest loaded (human={}, ai={})",
            pool.len(Label::Human),
            pool.len(Label::Ai)
        );
        self.pool = Some(pool);
        Ok(())
    }

    async fn select_next(&mut self) -> GameResult<ImageRecord> {
        let pool = self.pool.as_ref().ok_or(GameError::NotPrepared)?;
        let picked = pool.select(&mut self.rng);
        let url = join(&self.base, &encode_path(&picked.url))?;
        Ok(ImageRecord::new(url.to_string(), picked.label))
    }

    fn describe(&self) -> String {
        format!("manifest at {}", self.base)
    }
}

/// API delivery: the server selects every round
///
/// `imageUrl` is resolved against the base the way a browser resolves an
/// `img src`: an absolute path such as `/assets/a.png` replaces any sub-path
/// of the base, so `http://host/quiz/` yields `http://host/assets/a.png`.
pub struct ApiSource {
    client: Client,
    base: Url,
}

impl ApiSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn endpoint(&self) -> GameResult<Url> {
        join(&self.base, NEXT_IMAGE_PATH)
    }
}

#[async_trait]
impl ImageSource for ApiSource {
    async fn select_next(&mut self) -> GameResult<ImageRecord> {
        let response: NextImageResponse = get_json(&self.client, self.endpoint()?).await?;
        let url = join(&self.base, &response.image_url)?;
        Ok(ImageRecord::new(url.to_string(), response.source))
    }

    fn describe(&self) -> String {
        format!("API at {}", self.base)
    }
}
