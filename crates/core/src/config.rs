use serde::{Deserialize, Serialize};

/// Published SOFR forward curve table.
pub const DEFAULT_FEED_URL: &str =
    "https://19621209.fs1.hubspotusercontent-na1.net/hubfs/19621209/FWDCurveTable.xml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
    pub etl: EtlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EtlConfig {
    /// Run the ETL once before the server starts accepting requests.
    pub run_on_startup: bool,
    /// Six-field cron expression (with seconds) for periodic refreshes.
    pub cron_schedule: Option<String>,
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/forward_curve.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            run_on_startup: true,
            cron_schedule: None,
        }
    }
}
