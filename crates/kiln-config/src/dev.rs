//! Development server configuration.

use serde::{Deserialize, Serialize};

use crate::mode::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Hot module replacement. Validation rejects `false`.
    #[serde(default = "default_hot")]
    pub hot: bool,

    #[serde(default)]
    pub open: bool,
}

impl DevServerConfig {
    /// The server section of a plan: present only in development.
    pub fn for_mode(&self, mode: Mode) -> Option<DevServerConfig> {
        mode.is_development().then(|| self.clone())
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            hot: default_hot(),
            open: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    4200
}

fn default_hot() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_development_gets_a_server() {
        let config = DevServerConfig::default();
        assert!(config.for_mode(Mode::Production).is_none());
        let dev = config.for_mode(Mode::Development).unwrap();
        assert_eq!(dev.port, 4200);
        assert!(dev.hot);
    }

    #[test]
    fn development_keeps_declared_settings() {
        let config = DevServerConfig {
            port: 9000,
            open: true,
            ..DevServerConfig::default()
        };
        assert_eq!(config.for_mode(Mode::Development), Some(config));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_str::<DevServerConfig>(r#"{ "static_dir": "public" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("static_dir"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: DevServerConfig = serde_json::from_str(r#"{ "port": 8080 }"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert!(!config.open);
    }
}
