//! Build mode resolution.
//!
//! The mode is read exactly once from an [`EnvSnapshot`] and then passed by
//! value into every planner. Nothing downstream looks at the process
//! environment again.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable whose literal value `development` selects
/// [`Mode::Development`].
pub const MODE_ENV_VAR: &str = "NODE_ENV";

/// Two-valued build context gating every conditional decision of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Resolve the mode from an environment snapshot.
    ///
    /// Only the exact value `"development"` yields [`Mode::Development`].
    /// A missing variable, an empty one or any other spelling resolves to
    /// [`Mode::Production`]. This never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{EnvSnapshot, Mode};
    ///
    /// let env = EnvSnapshot::from_pairs([("NODE_ENV", "development")]);
    /// assert_eq!(Mode::resolve(&env), Mode::Development);
    /// assert_eq!(Mode::resolve(&EnvSnapshot::default()), Mode::Production);
    /// ```
    pub fn resolve(env: &EnvSnapshot) -> Self {
        match env.get(MODE_ENV_VAR) {
            Some("development") => Mode::Development,
            _ => Mode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable copy of the environment variables taken at process start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}
