//! Environment variable configuration adapter.
//!
//! Maps a config key to the environment variable with the same name in
//! upper case (`add_capital` → `ADD_CAPITAL`), ignoring the section, so the
//! scan thresholds can be overridden the way a CI job sets them. Layered on
//! top of a file adapter via [`LayeredConfigAdapter`]: the environment wins.

use crate::ports::config_port::ConfigPort;

pub struct EnvConfigAdapter;

impl EnvConfigAdapter {
    pub fn new() -> Self {
        Self
    }

    fn lookup(key: &str) -> Option<String> {
        std::env::var(key.to_uppercase()).ok()
    }
}

impl Default for EnvConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for EnvConfigAdapter {
    fn get_string(&self, _section: &str, key: &str) -> Option<String> {
        Self::lookup(key)
    }

    fn get_int(&self, _section: &str, key: &str, default: i64) -> i64 {
        Self::lookup(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn get_double(&self, _section: &str, key: &str, default: f64) -> f64 {
        Self::lookup(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Environment overrides layered over a base config source.
pub struct LayeredConfigAdapter<B: ConfigPort> {
    env: EnvConfigAdapter,
    base: B,
}

impl<B: ConfigPort> LayeredConfigAdapter<B> {
    pub fn new(base: B) -> Self {
        Self {
            env: EnvConfigAdapter::new(),
            base,
        }
    }
}

impl<B: ConfigPort> ConfigPort for LayeredConfigAdapter<B> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.env
            .get_string(section, key)
            .or_else(|| self.base.get_string(section, key))
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.env
            .get_int(section, key, self.base.get_int(section, key, default))
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.env
            .get_double(section, key, self.base.get_double(section, key, default))
    }
}
