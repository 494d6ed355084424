//! Unprefixed environment names kept for existing deployments
//! (`MONITOR_DIR`, `CHECK_INTERVAL`, `EMAIL_USER`, ...).

use config::{ConfigError, Map, Source, Value, ValueKind};

/// (environment variable, config key)
pub const LEGACY_KEYS: &[(&str, &str)] = &[
    ("MONITOR_DIR", "monitor.root"),
    ("CHECK_INTERVAL", "monitor.interval_secs"),
    ("BASELINE_FILE", "storage.baseline_file"),
    ("LOG_FILE", "storage.event_log_file"),
    ("EMAIL_RELAY_URL", "notify.endpoint"),
    ("EMAIL_USER", "notify.username"),
    ("EMAIL_PASS", "notify.password"),
    ("EMAIL_TO", "notify.recipient"),
];

/// Source reading the legacy variable names
#[derive(Debug, Clone, Default)]
pub struct LegacyEnvironment {
    /// Fixed variables instead of the process environment (tests)
    source: Option<Map<String, String>>,
}

impl LegacyEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            source: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match &self.source {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }
}

impl Source for LegacyEnvironment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let origin = "legacy environment".to_string();
        let mut map = Map::new();
        for (var, key) in LEGACY_KEYS {
            let Some(raw) = self.lookup(var) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            let kind = if *key == "monitor.interval_secs" {
                let secs = raw.trim().parse::<i64>().map_err(|_| {
                    ConfigError::Message(format!("{} must be an integer, got {:?}", var, raw))
                })?;
                ValueKind::I64(secs)
            } else {
                ValueKind::String(raw)
            };
            map.insert(key.to_string(), Value::new(Some(&origin), kind));
        }
        Ok(map)
    }
}
