use crate::{env_or_default, env_required, ConfigError, FromEnv};
use std::net::{Ipv4Addr, SocketAddr};

/// Listen configuration for the RPC server
#[derive(Clone, Debug)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl RpcServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the listen address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the listen address into a `SocketAddr`
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address()
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "API_HOST/API_PORT".to_string(),
                details: format!("{}", e),
            })
    }
}

impl FromEnv for RpcServerConfig {
    /// Reads from environment variables:
    /// - API_HOST: defaults to 0.0.0.0 (all interfaces)
    /// - API_PORT: required
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("API_HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_required("API_PORT")?
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "API_PORT".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { host, port })
    }
}
