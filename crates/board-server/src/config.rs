use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BOARD_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("BOARD_PORT")
            .unwrap_or_else(|| "5555".into())
            .parse()
            .context("BOARD_PORT must be a port number")?;
        let db_path: PathBuf = lookup("BOARD_DB_PATH")
            .unwrap_or_else(|| "board.db".into())
            .into();

        Ok(Self { host, port, db_path })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
