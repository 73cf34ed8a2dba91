//! Runtime settings read from the environment.
//!
//! A `.env` file in the working directory is loaded first, so every setting
//! can live there instead of the shell environment.

use crate::models::{parse_ipv4_mask, parse_ipv6_prefix};
use std::env;
use std::path::Path;

/// Environment variable naming the log4rs YAML file.
pub const ENV_LOG_CONFIG: &str = "IPCALC_LOG_CONFIG";
/// Environment variable with the IPv4 mask used when none is given.
pub const ENV_DEFAULT_V4_MASK: &str = "IPCALC_DEFAULT_V4_MASK";
/// Environment variable with the IPv6 prefix used when none is given.
pub const ENV_DEFAULT_V6_PREFIX: &str = "IPCALC_DEFAULT_V6_PREFIX";

const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
const DEFAULT_V4_MASK: &str = "24";
const DEFAULT_V6_PREFIX: &str = "64";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_config: String,
    pub default_v4_mask: String,
    pub default_v6_prefix: String,
    /// Set when `NO_COLOR` is present, whatever its value.
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            default_v4_mask: DEFAULT_V4_MASK.to_string(),
            default_v6_prefix: DEFAULT_V6_PREFIX.to_string(),
            no_color: false,
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Config {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; invalid masks fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            config.log_config = path;
        }

        if let Some(mask) = lookup(ENV_DEFAULT_V4_MASK) {
            match parse_ipv4_mask(&mask) {
                Ok(_) => config.default_v4_mask = mask,
                Err(e) => log::warn!("ignoring {ENV_DEFAULT_V4_MASK}={mask}: {e}"),
            }
        }

        if let Some(prefix) = lookup(ENV_DEFAULT_V6_PREFIX) {
            match parse_ipv6_prefix(&prefix) {
                Ok(_) => config.default_v6_prefix = prefix,
                Err(e) => log::warn!("ignoring {ENV_DEFAULT_V6_PREFIX}={prefix}: {e}"),
            }
        }

        config.no_color = lookup("NO_COLOR").is_some();
        config
    }

    /// The YAML log config to load, if any. `--verbose` always logs debug to
    /// stderr, so it skips the file.
    pub fn log_config_file(&self, verbose: bool) -> Option<&Path> {
        let path = Path::new(&self.log_config);
        (!verbose && path.exists()).then_some(path)
    }
}
