use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Patient-Data-Management-Application";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 5000;

const ENV_HOST: &str = "PDM_HOST";
const ENV_PORT: &str = "PDM_PORT";
const ENV_DB_PATH: &str = "PDM_DB_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid IP address: {value}")]
    InvalidHost { var: &'static str, value: String },
    #[error("{var} is not a valid port: {value}")]
    InvalidPort { var: &'static str, value: String },
    #[error("Cannot determine home directory; set {0}")]
    NoDataDir(&'static str),
}

/// Runtime configuration, resolved from the environment with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = match get(ENV_HOST) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidHost {
                var: ENV_HOST,
                value,
            })?,
            None => DEFAULT_HOST,
        };

        let port: u16 = match get(ENV_PORT) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: ENV_PORT,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let db_path = match get(ENV_DB_PATH) {
            Some(value) => PathBuf::from(value),
            None => default_db_path().ok_or(ConfigError::NoDataDir(ENV_DB_PATH))?,
        };

        Ok(Self {
            host,
            port,
            db_path,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.socket_addr())
    }
}

/// Get the application data directory
/// ~/PatientData/ on all platforms
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("PatientData"))
}

/// Default location of the record store.
pub fn default_db_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("records.db"))
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "patient_data_lib=info,patient_data=info,tower_http=info"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_listener_address() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "/tmp/records.db")]))
            .unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 5000);
        assert_eq!(config.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_HOST, "0.0.0.0"),
            (ENV_PORT, "8080"),
            (ENV_DB_PATH, "/var/lib/pdm/records.db"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pdm/records.db"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "not-a-port"),
            (ENV_DB_PATH, "/tmp/records.db"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "  "),
            (ENV_DB_PATH, "/tmp/records.db"),
        ]))
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn default_db_path_under_app_data() {
        if let (Some(db), Some(dir)) = (default_db_path(), app_data_dir()) {
            assert!(db.starts_with(dir));
            assert!(db.ends_with("records.db"));
        }
    }

    #[test]
    fn app_name_is_stable() {
        assert_eq!(APP_NAME, "Patient-Data-Management-Application");
    }
}
