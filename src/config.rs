//! Configuration loading from environment variables.
//!
//! Uses the following environment variables:
//! - `HAIL_HTTP_ADDR`: Address the HTTP gateway binds (default: 127.0.0.1:7071)

use std::{env, net::SocketAddr, str::FromStr};

use anyhow::{Context, Result};

/// Default address for the HTTP gateway
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:7071";

/// Host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP gateway binds
    pub http_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` file if present, then reads from environment.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let http_addr =
            env::var("HAIL_HTTP_ADDR").unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string());
        let http_addr =
            SocketAddr::from_str(&http_addr).context("invalid HAIL_HTTP_ADDR format")?;

        Ok(Self { http_addr })
    }

    /// Create a test configuration bound to an ephemeral port
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            http_addr: "127.0.0.1:0".parse().unwrap(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.parse().unwrap(),
        }
    }
}
