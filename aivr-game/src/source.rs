//! Image source provider contract
//!
//! Every provider picks the label first (50/50) and then an image of that
//! label, so label frequency does not depend on pool sizes. Implementations
//! are interchangeable behind [`ImageSource`] and chosen when the controller
//! is built.

use aivr_common::paths::encode_path;
use aivr_common::{ImagePool, ImageRecord, Label, Manifest};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GameResult;

/// Supplies the image for each round
#[async_trait]
pub trait ImageSource: Send {
    /// One-time startup step (fetching and validating pools)
    ///
    /// Failure here means the game cannot start.
    async fn prepare(&mut self) -> GameResult<()> {
        Ok(())
    }

    /// Image and true label for the next round
    async fn select_next(&mut self) -> GameResult<ImageRecord>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: ImageSource + ?Sized> ImageSource for Box<T> {
    async fn prepare(&mut self) -> GameResult<()> {
        (**self).prepare().await
    }

    async fn select_next(&mut self) -> GameResult<ImageRecord> {
        (**self).select_next().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Provider over an in-memory [`ImagePool`]
///
/// Record URLs are `url_prefix` followed by the percent-encoded pool path.
pub struct PoolSource<R = StdRng> {
    pool: ImagePool,
    rng: R,
    url_prefix: String,
    forced_label: Option<Label>,
}

impl PoolSource<StdRng> {
    pub fn new(pool: ImagePool) -> Self {
        Self::with_rng(pool, StdRng::from_entropy())
    }

    /// Deterministic selection sequence
    pub fn seeded(pool: ImagePool, seed: u64) -> Self {
        Self::with_rng(pool, StdRng::seed_from_u64(seed))
    }

    pub fn from_manifest(manifest: Manifest) -> GameResult<Self> {
        Ok(Self::new(ImagePool::from_manifest(manifest)?))
    }
}

impl<R: Rng + Send> PoolSource<R> {
    pub fn with_rng(pool: ImagePool, rng: R) -> Self {
        Self {
            pool,
            rng,
            url_prefix: String::new(),
            forced_label: None,
        }
    }

    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Always pick from one label (practice mode)
    pub fn force_label(mut self, label: Label) -> Self {
        self.forced_label = Some(label);
        self
    }

    /// Select without going through the async trait
    pub fn next_record(&mut self) -> ImageRecord {
        let picked = match self.forced_label {
            Some(label) => self.pool.pick(label, &mut self.rng),
            None => self.pool.select(&mut self.rng),
        };
        ImageRecord::new(
            format!("{}{}", self.url_prefix, encode_path(&picked.url)),
            picked.label,
        )
    }
}

#[async_trait]
impl<R: Rng + Send> ImageSource for PoolSource<R> {
    async fn select_next(&mut self) -> GameResult<ImageRecord> {
        Ok(self.next_record())
    }

    fn describe(&self) -> String {
        format!(
            "local pool (human={}, ai={})",
            self.pool.len(Label::Human),
            self.pool.len(Label::Ai)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_pool() -> ImagePool {
        ImagePool::new(
            vec!["h1.png".to_string()],
            vec!["a1.png".to_string(), "a2.png".to_string()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_forced_ai_never_returns_human_image() {
        let mut source = PoolSource::seeded(scenario_pool(), 11).force_label(Label::Ai);

        for _ in 0..100 {
            let record = source.select_next().await.unwrap();
            assert_eq!(record.label, Label::Ai);
            assert!(record.url == "a1.png" || record.url == "a2.png");
        }
    }

    #[tokio::test]
    async fn test_label_frequency_is_half_for_uneven_pool() {
        let mut source = PoolSource::seeded(scenario_pool(), 2024);
        let trials = 10_000;
        let mut human = 0;

        for _ in 0..trials {
            if source.select_next().await.unwrap().label == Label::Human {
                human += 1;
            }
        }

        let ratio = human as f64 / trials as f64;
        assert!((ratio - 0.5).abs() < 0.03, "human ratio was {}", ratio);
    }

    #[test]
    fn test_urls_are_encoded_and_prefixed() {
        let pool = ImagePool::new(
            vec!["folder/my file.png".to_string()],
            vec!["folder/my file.png".to_string()],
        )
        .unwrap();
        let mut source = PoolSource::seeded(pool, 1).with_url_prefix("/");

        assert_eq!(source.next_record().url, "/folder/my%20file.png");
    }

    #[test]
    fn test_from_manifest_rejects_empty_pool() {
        let manifest = Manifest {
            human: vec![],
            ai: vec!["x.png".to_string()],
        };
        assert!(PoolSource::from_manifest(manifest).is_err());
    }

    #[test]
    fn test_describe_reports_pool_sizes() {
        let source = PoolSource::seeded(scenario_pool(), 0);
        assert_eq!(source.describe(), "local pool (human=1, ai=2)");
    }
}
