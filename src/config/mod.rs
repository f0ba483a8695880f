use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 45;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_allowed_ips() -> Vec<String> {
    vec!["127.0.0.1".to_string(), "::1".to_string()]
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// Optional config file — all fields are overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// REST server port (default: 5000).
    port: Option<u16>,
    /// Bind address for the REST server (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Completion-provider API key. Prefer CASEFORGE_API_KEY over storing it here.
    api_key: Option<String>,
    /// OpenAI-compatible chat-completion base URL (default: Groq).
    api_base_url: Option<String>,
    /// Model identifier sent with every completion request.
    model: Option<String>,
    /// Sampling temperature sent with every completion request (default: 0.2).
    temperature: Option<f32>,
    /// Outbound completion request timeout in seconds (default: 45).
    request_timeout_secs: Option<u64>,
    /// Client addresses allowed to call the REST API (default: loopback only).
    allowed_ips: Option<Vec<String>>,
    /// Log level filter string, e.g. "debug", "info,caseforge=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file — using defaults");
            None
        }
    }
}

// ─── AppConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Bind address for the REST server (CASEFORGE_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Completion-provider credential (CASEFORGE_API_KEY env var).
    /// None is a startup-time fatal misconfiguration, reported by the binary.
    pub api_key: Option<String>,
    /// Chat-completion base URL (CASEFORGE_API_URL env var).
    pub api_base_url: String,
    /// Fixed model identifier (CASEFORGE_MODEL env var).
    pub model: String,
    /// Sampling temperature for every completion call.
    pub temperature: f32,
    /// Bounded timeout for the single outbound call per generation.
    pub request_timeout_secs: u64,
    /// REST allow-list; requests from other addresses get 403.
    pub allowed_ips: Vec<String>,
    pub log: String,
    /// "pretty" (default) | "json".
    pub log_format: String,
}

impl AppConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `config_path`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        config_path: Option<PathBuf>,
        log: Option<String>,
    ) -> Self {
        // Load TOML as the lowest-priority override layer
        let toml = config_path
            .as_deref()
            .and_then(load_toml)
            .unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let api_key = std::env::var("CASEFORGE_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or(toml.api_key);

        let api_base_url = std::env::var("CASEFORGE_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let model = std::env::var("CASEFORGE_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = toml.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        let request_timeout_secs = toml
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let allowed_ips = toml.allowed_ips.unwrap_or_else(default_allowed_ips);

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let log_format = std::env::var("CASEFORGE_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        Self {
            port,
            bind_address,
            api_key,
            api_base_url,
            model,
            temperature,
            request_timeout_secs,
            allowed_ips,
            log,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = AppConfig::new(None, None, None, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.allowed_ips, vec!["127.0.0.1", "::1"]);
    }

    #[test]
    fn cli_beats_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("caseforge.toml");
        std::fs::write(&path, "port = 9000\nbind_address = \"0.0.0.0\"\n").unwrap();

        let config = AppConfig::new(Some(7000), None, Some(path), None);
        assert_eq!(config.port, 7000, "CLI value must win over TOML");
        assert_eq!(config.bind_address, "0.0.0.0", "TOML fills what CLI left unset");
    }

    #[test]
    fn toml_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("caseforge.toml");
        std::fs::write(
            &path,
            "model = \"llama-3.1-8b-instant\"\ntemperature = 0.7\nallowed_ips = [\"10.0.0.1\"]\n",
        )
        .unwrap();

        let config = AppConfig::new(None, None, Some(path), None);
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.allowed_ips, vec!["10.0.0.1"]);
    }

    #[test]
    fn unparseable_toml_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("caseforge.toml");
        std::fs::write(&path, "port = \"not a number").unwrap();

        let config = AppConfig::new(None, None, Some(path), None);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
