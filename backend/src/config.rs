//! Service configuration loaded via OrthoConfig.
//!
//! Every field can be set through a `MINING_<FIELD>` environment variable,
//! e.g. `MINING_DATABASE_URL=/data/mining.db`.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "mining.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Only one of the administrator username and password was given.
    #[error("administrator username and password must be set together")]
    PartialAdministrator,
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MINING")]
pub struct AppSettings {
    /// SQLite database path or URL.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Insert the historical price table at startup.
    #[ortho_config(default = true)]
    pub seed_prices: bool,
    /// Administrator account created at startup when absent.
    pub admin_username: Option<String>,
    /// Password for [`Self::admin_username`].
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Configured database URL, falling back to `mining.db`.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool size, falling back to 8.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Checkout timeout, falling back to ten seconds.
    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
        )
    }

    /// The bootstrap administrator as `(username, password)`, if configured.
    ///
    /// # Errors
    /// [`SettingsError::PartialAdministrator`] when only one half is set.
    pub fn administrator(&self) -> Result<Option<(&str, &str)>, SettingsError> {
        match (self.admin_username.as_deref(), self.admin_password.as_deref()) {
            (Some(username), Some(password)) => Ok(Some((username, password))),
            (None, None) => Ok(None),
            _ => Err(SettingsError::PartialAdministrator),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "MINING_DATABASE_URL",
        "MINING_BIND_ADDR",
        "MINING_POOL_MAX_SIZE",
        "MINING_POOL_CONNECTION_TIMEOUT_SECS",
        "MINING_SEED_PRICES",
        "MINING_ADMIN_USERNAME",
        "MINING_ADMIN_PASSWORD",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> AppSettings {
        let vars = VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        });
        let _guard = lock_env(vars);
        AppSettings::load_from_iter([OsString::from("mining-insights")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(settings.pool_connection_timeout(), Duration::from_secs(10));
        assert!(settings.seed_prices);
        assert!(settings.administrator().expect("no admin").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("MINING_DATABASE_URL", "/tmp/mining-test.db"),
            ("MINING_BIND_ADDR", "127.0.0.1:9000"),
            ("MINING_POOL_MAX_SIZE", "2"),
            ("MINING_SEED_PRICES", "false"),
            ("MINING_ADMIN_USERNAME", "root"),
            ("MINING_ADMIN_PASSWORD", "change-me-now"),
        ]);
        assert_eq!(settings.database_url(), "/tmp/mining-test.db");
        assert_eq!(settings.bind_addr().expect("address").port(), 9000);
        assert_eq!(settings.pool_max_size(), 2);
        assert!(!settings.seed_prices);
        assert_eq!(
            settings.administrator().expect("admin pair"),
            Some(("root", "change-me-now"))
        );
    }

    #[rstest]
    fn half_configured_administrator_is_rejected() {
        let settings = load_with(&[("MINING_ADMIN_USERNAME", "root")]);
        assert!(matches!(
            settings.administrator(),
            Err(SettingsError::PartialAdministrator)
        ));
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let settings = load_with(&[("MINING_BIND_ADDR", "not-an-address")]);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
