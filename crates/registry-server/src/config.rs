use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("REGISTRY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("REGISTRY_PORT")
            .unwrap_or_else(|_| "5009".into())
            .parse()
            .context("REGISTRY_PORT must be a port number")?;
        let db_path: PathBuf = std::env::var("REGISTRY_DB_PATH")
            .unwrap_or_else(|_| "users.db".into())
            .into();

        Ok(Self { host, port, db_path })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))?;
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 5009,
            db_path: "users.db".into(),
        };
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:5009");
    }

    #[test]
    fn bad_host_is_an_error() {
        let config = Config {
            host: "not a host".into(),
            port: 1,
            db_path: "users.db".into(),
        };
        assert!(config.addr().is_err());
    }
}
