use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// External provider selection and credentials.
    pub providers: ProvidersConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            providers: ProvidersConfig::from_env(),
        }
    }
}

/// Which external providers to use and how to reach them.
///
/// Provider selection happens once at startup; per-request logic never
/// chooses a provider.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    /// Chat model backend: `"openai"`, `"anthropic"`, or `"gemini"`
    /// (default: `openai`).
    pub llm_provider: String,
    /// Transcription backend: `"openai"` or `"sarvam"` (default: `openai`).
    pub stt_provider: String,
    /// Synthesis backend: `"openai"` or `"sarvam"` (default: `openai`).
    pub tts_provider: String,
    pub openai_api_key: String,
    pub anthropic_api_key: String,
    pub gemini_api_key: String,
    pub sarvam_api_key: String,
    /// Emotion detection is disabled when unset.
    pub hume_api_key: Option<String>,
}

impl ProvidersConfig {
    /// Load provider configuration from environment variables.
    ///
    /// | Env Var          | Default   |
    /// |------------------|-----------|
    /// | `LLM_PROVIDER`   | `openai`  |
    /// | `STT_PROVIDER`   | `openai`  |
    /// | `TTS_PROVIDER`   | `openai`  |
    /// | `OPENAI_API_KEY` | empty     |
    /// | `ANTHROPIC_API_KEY` | empty  |
    /// | `GEMINI_API_KEY` | empty     |
    /// | `SARVAM_API_KEY` | empty     |
    /// | `HUME_API_KEY`   | unset     |
    pub fn from_env() -> Self {
        Self {
            llm_provider: std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".into()),
            stt_provider: std::env::var("STT_PROVIDER").unwrap_or_else(|_| "openai".into()),
            tts_provider: std::env::var("TTS_PROVIDER").unwrap_or_else(|_| "openai".into()),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            sarvam_api_key: std::env::var("SARVAM_API_KEY").unwrap_or_default(),
            hume_api_key: std::env::var("HUME_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }
}
