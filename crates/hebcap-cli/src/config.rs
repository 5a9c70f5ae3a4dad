//! CLI configuration.
//!
//! Only front-end behavior is configurable: log output and the defaults used
//! when `--vibe` or `--platforms` is omitted. Pipeline results never depend
//! on the environment.

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log output format (`LOG_FORMAT=json` for JSON lines)
    pub log_format: LogFormat,
    /// `tracing` filter directives
    pub log_filter: String,
    /// Comma-separated platforms used when `--platforms` is omitted
    pub default_platforms: String,
    /// Vibe used when `--vibe` is omitted
    pub default_vibe: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "warn".to_string(),
            default_platforms: "tiktok,instagram,youtube_shorts".to_string(),
            default_vibe: "casual".to_string(),
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            log_format: match lookup("LOG_FORMAT") {
                Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            log_filter: non_empty("HEBCAP_LOG").unwrap_or(defaults.log_filter),
            default_platforms: non_empty("HEBCAP_DEFAULT_PLATFORMS")
                .unwrap_or(defaults.default_platforms),
            default_vibe: non_empty("HEBCAP_DEFAULT_VIBE").unwrap_or(defaults.default_vibe),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> CliConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.default_vibe, "casual");
        assert_eq!(config.default_platforms, "tiktok,instagram,youtube_shorts");
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            ("LOG_FORMAT", "JSON"),
            ("HEBCAP_LOG", "hebcap_engine=debug"),
            ("HEBCAP_DEFAULT_PLATFORMS", "instagram"),
            ("HEBCAP_DEFAULT_VIBE", "sales"),
        ]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter, "hebcap_engine=debug");
        assert_eq!(config.default_platforms, "instagram");
        assert_eq!(config.default_vibe, "sales");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("HEBCAP_DEFAULT_VIBE", "  "), ("LOG_FORMAT", "text")]);
        assert_eq!(config.default_vibe, "casual");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
