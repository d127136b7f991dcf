use serde::Deserialize;
use std::path::Path;
use tracing::error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_WORKSHEET: &str = "Sheet1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TOKEN_URL: &str = "https://accounts.zoho.in/oauth/v2/token";
const DEFAULT_SHEET_API_BASE: &str = "https://sheet.zoho.in/api/v2";
const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 8000).
    port: Option<u16>,
    /// Bind address for the HTTP server (default: "0.0.0.0").
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,worklogd=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default) | "json".
    log_format: Option<String>,
    /// Groq API key for the completion service.
    groq_api_key: Option<String>,
    /// Completion model ID (default: llama-3.1-8b-instant).
    model: Option<String>,
    /// Override the chat-completions endpoint URL.
    completion_url: Option<String>,
    /// Zoho OAuth client id / secret / refresh token.
    zoho_client_id: Option<String>,
    zoho_client_secret: Option<String>,
    zoho_refresh_token: Option<String>,
    /// Override the Zoho token endpoint URL.
    token_url: Option<String>,
    /// Override the Zoho Sheet API base URL (default: https://sheet.zoho.in/api/v2).
    sheet_api_base: Option<String>,
    /// Resource id of the target spreadsheet.
    sheet_id: Option<String>,
    /// Worksheet (tab) name within the spreadsheet (default: "Sheet1").
    worksheet_name: Option<String>,
    /// Outbound request timeout in seconds (default: 30).
    request_timeout_secs: Option<u64>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub log: String,
    /// Log output format: "pretty" (default) | "json" (structured for log aggregators).
    pub log_format: String,
    /// Completion service credentials (GROQ_API_KEY env var).
    pub groq_api_key: String,
    pub model: String,
    pub completion_url: String,
    /// Identity provider credentials (ZOHO_CLIENT_ID / _SECRET / _REFRESH_TOKEN).
    pub zoho_client_id: String,
    pub zoho_client_secret: String,
    pub zoho_refresh_token: String,
    pub token_url: String,
    pub sheet_api_base: String,
    /// Spreadsheet resource id (ZOHO_SHEET_ID env var).
    pub sheet_id: String,
    pub worksheet_name: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap, or read here
    ///   2. TOML file at `config_path`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        log: Option<String>,
        log_format: Option<String>,
        config_path: &Path,
    ) -> Self {
        let toml = load_toml(config_path).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind_address = bind_address
            .or(toml.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());
        let log_format = log_format
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let groq_api_key = env_var("GROQ_API_KEY")
            .or(toml.groq_api_key)
            .unwrap_or_default();
        let model = env_var("WORKLOG_MODEL")
            .or(toml.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let completion_url = env_var("WORKLOG_COMPLETION_URL")
            .or(toml.completion_url)
            .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string());

        let zoho_client_id = env_var("ZOHO_CLIENT_ID")
            .or(toml.zoho_client_id)
            .unwrap_or_default();
        let zoho_client_secret = env_var("ZOHO_CLIENT_SECRET")
            .or(toml.zoho_client_secret)
            .unwrap_or_default();
        let zoho_refresh_token = env_var("ZOHO_REFRESH_TOKEN")
            .or(toml.zoho_refresh_token)
            .unwrap_or_default();
        let token_url = env_var("WORKLOG_TOKEN_URL")
            .or(toml.token_url)
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        let sheet_api_base = env_var("WORKLOG_SHEET_URL")
            .or(toml.sheet_api_base)
            .unwrap_or_else(|| DEFAULT_SHEET_API_BASE.to_string());
        let sheet_id = env_var("ZOHO_SHEET_ID").or(toml.sheet_id).unwrap_or_default();
        let worksheet_name = env_var("ZOHO_WORKSHEET_NAME")
            .or(toml.worksheet_name)
            .unwrap_or_else(|| DEFAULT_WORKSHEET.to_string());

        let request_timeout_secs = env_var("WORKLOG_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .or(toml.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            port,
            bind_address,
            log,
            log_format,
            groq_api_key,
            model,
            completion_url,
            zoho_client_id,
            zoho_client_secret,
            zoho_refresh_token,
            token_url,
            sheet_api_base,
            sheet_id,
            worksheet_name,
            request_timeout_secs,
        }
    }

    /// Full URL of the spreadsheet resource.
    pub fn sheet_url(&self) -> String {
        format!("{}/{}", self.sheet_api_base.trim_end_matches('/'), self.sheet_id)
    }

    /// Names of required credentials that are currently unset.
    /// The server still starts without them (every store/completion call
    /// will fail upstream), but startup logs a warning per missing entry.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.groq_api_key.is_empty() {
            missing.push("GROQ_API_KEY");
        }
        if self.zoho_client_id.is_empty() {
            missing.push("ZOHO_CLIENT_ID");
        }
        if self.zoho_client_secret.is_empty() {
            missing.push("ZOHO_CLIENT_SECRET");
        }
        if self.zoho_refresh_token.is_empty() {
            missing.push("ZOHO_REFRESH_TOKEN");
        }
        if self.sheet_id.is_empty() {
            missing.push("ZOHO_SHEET_ID");
        }
        missing
    }
}
