use crate::{env_required, ConfigError, FromEnv};

/// Location of the external logistics service that receives composed orders
#[derive(Clone, Debug)]
pub struct LogisticsConfig {
    pub host: String,
    pub port: u16,
}

impl LogisticsConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Full URL of the order-creation endpoint
    pub fn order_endpoint(&self) -> String {
        format!("http://{}:{}/orders", self.host, self.port)
    }
}

impl FromEnv for LogisticsConfig {
    /// Reads from environment variables:
    /// - LOGISTICS_APP_HOST: required
    /// - LOGISTICS_APP_PORT: required
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_required("LOGISTICS_APP_HOST")?;
        let port = env_required("LOGISTICS_APP_PORT")?
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "LOGISTICS_APP_PORT".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { host, port })
    }
}
