//! HTTP handlers for aivr-server

pub mod assets;
pub mod health;
pub mod next_image;

pub use assets::{reject_non_get, serve_asset};
pub use health::health_routes;
pub use next_image::next_image;
