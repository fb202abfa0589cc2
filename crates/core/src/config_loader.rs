use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration from the default TOML file and `APP_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads application configuration from a specific TOML file.
    ///
    /// Missing files are ignored; built-in defaults fill in anything not set.
    /// Nested keys are addressed with a double underscore, e.g. `APP_SERVER__PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment values cannot be parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref()).extract()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("APP_").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("missing.toml").expect("load failed");
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.server.port, 5000);
            assert!(config.etl.run_on_startup);
            Ok(())
        });
    }

    #[test]
    fn test_toml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
                [server]
                port = 8081

                [etl]
                cron_schedule = "0 0 6 * * *"
                "#,
            )?;

            let config = ConfigLoader::load_from("Config.toml").expect("load failed");
            assert_eq!(config.server.port, 8081);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.etl.cron_schedule.as_deref(), Some("0 0 6 * * *"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("Config.toml", "[database]\nmax_connections = 2\n")?;
            jail.set_env("APP_DATABASE__URL", "sqlite::memory:");
            jail.set_env("APP_DATABASE__MAX_CONNECTIONS", "7");

            let config = ConfigLoader::load_from("Config.toml").expect("load failed");
            assert_eq!(config.database.url, "sqlite::memory:");
            assert_eq!(config.database.max_connections, 7);
            Ok(())
        });
    }
}
