use core_config::{logistics::LogisticsConfig, server::RpcServerConfig, FromEnv};
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub server: RpcServerConfig,
    pub logistics: LogisticsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = RpcServerConfig::from_env()?;
        let logistics = LogisticsConfig::from_env()?;

        Ok(Self {
            mongodb,
            server,
            logistics,
            environment,
        })
    }
}
