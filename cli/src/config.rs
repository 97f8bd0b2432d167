//! Layered configuration: built-in defaults, then an optional TOML file, then
//! CLI flag overrides. Last writer wins.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Loads `scheduler::Config`, starting from [`scheduler::Config::default`] and
/// overlaying any fields present in the TOML file at `path`.
pub fn load(path: Option<&Path>) -> Result<scheduler::Config, ConfigError> {
    let base = scheduler::Config::default();
    let Some(path) = path else {
        return Ok(base);
    };
    let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&text).map_err(ConfigError::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_gives_defaults() {
        let config = load(None).unwrap();
        assert_eq!(config, scheduler::Config::default());
    }
}
