//! Server configuration
//!
//! Each setting comes from the first source that provides it: command line,
//! environment variable, `--config` TOML file, compiled default.

use std::net::SocketAddr;
use std::path::PathBuf;

use aivr_common::config::{
    resolve, TomlConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_ROOT_FOLDER,
};
use aivr_common::scanner::LabelDirs;
use aivr_common::{Error, Result};
use clap::Parser;

use crate::pool::PoolOrigin;

/// Command-line arguments for aivr-server
#[derive(Parser, Debug, Clone)]
#[command(name = "aivr-server")]
#[command(about = "Static server for the AI vs Real quiz")]
#[command(version)]
pub struct Args {
    /// Interface to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory served as the site root
    #[arg(short, long, env = "AIVR_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long, env = "AIVR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable GET /api/next-image
    #[arg(long, env = "AIVR_API")]
    pub api: bool,

    /// Where the /api/next-image pool comes from
    #[arg(long, value_enum, default_value = "manifest", env = "AIVR_POOL")]
    pub pool: PoolOrigin,
}

/// Fully resolved server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub root_folder: PathBuf,
    pub api: bool,
    pub pool_origin: PoolOrigin,
    pub pool_dirs: LabelDirs,
    pub log_level: String,
}

impl ServerConfig {
    /// Merge parsed arguments over the TOML file
    pub fn resolve(args: Args, toml: TomlConfig) -> Self {
        Self {
            host: resolve(args.host, toml.server.host, DEFAULT_HOST.to_string()),
            port: resolve(args.port, toml.server.port, DEFAULT_PORT),
            root_folder: resolve(
                args.root_folder,
                toml.server.root_folder,
                PathBuf::from(DEFAULT_ROOT_FOLDER),
            ),
            api: args.api,
            pool_origin: args.pool,
            pool_dirs: toml.pools,
            log_level: toml.logging.level,
        }
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                Error::Config(format!(
                    "invalid bind address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn default_log_filter(&self) -> String {
        format!(
            "aivr_server={level},aivr_common={level},tower_http={level}",
            level = self.log_level
        )
    }
}
