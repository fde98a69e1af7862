/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// CLI configuration loaded from environment variables.
///
/// Command-line arguments select what to build; these settings control how
/// the tool reports and formats its output.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log output format (default: text).
    pub log_format: LogFormat,
    /// Pretty-print encoded documents (default: off).
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `SIGNALSYNC_LOG_FORMAT` | `text`  |
    /// | `SIGNALSYNC_PRETTY`     | `false` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = lookup("SIGNALSYNC_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Text);

        let pretty = lookup("SIGNALSYNC_PRETTY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self { log_format, pretty }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> CliConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.pretty);
    }

    #[test]
    fn json_log_format() {
        let config = config_from(&[("SIGNALSYNC_LOG_FORMAT", "JSON")]);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_falls_back_to_text() {
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }

    #[test]
    fn pretty_flag_values() {
        assert!(config_from(&[("SIGNALSYNC_PRETTY", "1")]).pretty);
        assert!(config_from(&[("SIGNALSYNC_PRETTY", "true")]).pretty);
        assert!(!config_from(&[("SIGNALSYNC_PRETTY", "0")]).pretty);
        assert!(!config_from(&[("SIGNALSYNC_PRETTY", "")]).pretty);
    }
}
