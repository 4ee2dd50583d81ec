const FALLBACK_API_BASE: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve()
    }
}

impl ClientConfig {
    /// Build-time overrides first, then the page origin.
    pub fn resolve() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self::from_parts(
            option_env!("FINANCE_API_BASE"),
            option_env!("FINANCE_LOG_LEVEL"),
            origin,
        )
    }

    fn from_parts(
        api_override: Option<&str>,
        level: Option<&str>,
        origin: Option<String>,
    ) -> Self {
        let api_base = api_override
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| origin.filter(|o| !o.is_empty() && o != "null"))
            .unwrap_or_else(|| FALLBACK_API_BASE.to_string());

        ClientConfig {
            api_base: api_base.trim_end_matches('/').to_string(),
            log_level: parse_level(level),
        }
    }
}

fn parse_level(raw: Option<&str>) -> log::Level {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => log::Level::Error,
        Some("warn") => log::Level::Warn,
        Some("debug") => log::Level::Debug,
        Some("trace") => log::Level::Trace,
        _ => log::Level::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_used_without_override() {
        let cfg = ClientConfig::from_parts(None, None, Some("https://budget.example".into()));
        assert_eq!(cfg.api_base, "https://budget.example");
        assert_eq!(cfg.log_level, log::Level::Info);
    }

    #[test]
    fn override_wins_and_trailing_slash_is_trimmed() {
        let cfg = ClientConfig::from_parts(
            Some("http://127.0.0.1:9000/"),
            Some("DEBUG"),
            Some("https://budget.example".into()),
        );
        assert_eq!(cfg.api_base, "http://127.0.0.1:9000");
        assert_eq!(cfg.log_level, log::Level::Debug);
    }

    #[test]
    fn blank_override_and_opaque_origin_fall_back() {
        let cfg = ClientConfig::from_parts(Some("  "), Some("loud"), Some("null".into()));
        assert_eq!(cfg.api_base, FALLBACK_API_BASE);
        assert_eq!(cfg.log_level, log::Level::Info);
    }
}
