use std::time::Duration;

use adapters::gemini::GeminiConfig;
use adapters::gemini::client::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_POST_MODEL, DEFAULT_TEXT_MODEL,
};

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Credential for the generative API (`API_KEY`).
    ///
    /// Optional on purpose: without it the process still runs and every AI
    /// action reports "not configured".
    pub api_key: Option<String>,

    // =========================
    // Generative API
    // =========================
    /// Base URL of the Generative Language API (`GEMINI_BASE_URL`).
    pub gemini_base_url: String,

    /// Model used for signal and pool summaries (`GEMINI_TEXT_MODEL`).
    pub text_model: String,

    /// Model used for the schema-constrained blog post (`GEMINI_POST_MODEL`).
    pub post_model: String,

    /// Image model (`GEMINI_IMAGE_MODEL`).
    pub image_model: String,

    /// Per-request timeout for AI calls (`AI_TIMEOUT_SECS`).
    pub ai_timeout: Duration,

    // =========================
    // Logging
    // =========================
    /// JSON log lines instead of pretty output (`APP_ENV=production`).
    pub json_logs: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let ai_timeout = match lookup("AI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::InvalidConfig(format!("AI_TIMEOUT_SECS must be whole seconds, got {raw:?}"))
                })?;
                if secs == 0 {
                    return Err(AppError::InvalidConfig(
                        "AI_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(60),
        };

        Ok(Self {
            api_key: lookup("API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_base_url: get("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            text_model: get("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            post_model: get("GEMINI_POST_MODEL", DEFAULT_POST_MODEL),
            image_model: get("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            ai_timeout,
            json_logs: lookup("APP_ENV").as_deref() == Some("production"),
        })
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.gemini_base_url.clone(),
            text_model: self.text_model.clone(),
            post_model: self.post_model.clone(),
            image_model: self.image_model.clone(),
            timeout: self.ai_timeout,
        }
    }
}
