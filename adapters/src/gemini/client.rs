use std::time::Duration;

use async_trait::async_trait;
use common::logger::warn_if_slow;
use market::{DexPool, Signal};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::gemini::api::GenerativeApi;
use crate::gemini::errors::AiError;
use crate::gemini::parser::{extract_image, extract_text, parse_post, remote_error};
use crate::gemini::prompts::{pools_prompt, post_prompt, post_schema, signals_prompt};
use crate::gemini::types::{AspectRatio, ImageRef, PostDraft};
use crate::gemini::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, PredictInstance,
    PredictParameters, PredictRequest, PredictResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_POST_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

const API_KEY_HEADER: &str = "x-goog-api-key";
const IMAGE_MIME: &str = "image/jpeg";
const SLOW_CALL: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// `None` leaves the client in the not-configured state.
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub post_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            post_model: DEFAULT_POST_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// REST client for the Generative Language API.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    text_model: String,
    post_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let api_key = config.api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("API_KEY not set; AI features will report as not configured");
        }

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model,
            post_model: config.post_model,
            image_model: config.image_model,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.api_key.as_deref().ok_or(AiError::NotConfigured)
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, AiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let key = self.api_key()?;

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = remote_error(status.as_u16(), &text);
            warn!(status = status.as_u16(), error = %err, "generative api call failed");
            return Err(err);
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AiError::Remote(format!("unreadable response body: {e}")))
    }

    async fn generate_text(
        &self,
        model: &str,
        prompt: String,
        config: Option<GenerationConfig>,
    ) -> Result<String, AiError> {
        let url = self.model_url(model, "generateContent");
        let request = GenerateContentRequest::from_prompt(prompt, config);

        let resp: GenerateContentResponse =
            warn_if_slow("generate_content", SLOW_CALL, self.post_json(&url, &request)).await?;

        extract_text(resp)
    }
}

#[async_trait]
impl GenerativeApi for GeminiClient {
    #[instrument(skip(self, signals), fields(count = signals.len()), level = "debug")]
    async fn summarize_signals(&self, signals: &[Signal]) -> Result<String, AiError> {
        self.api_key()?;
        let prompt = signals_prompt(signals)?;

        let text = self
            .generate_text(&self.text_model, prompt, Some(GenerationConfig::fast()))
            .await?;

        debug!(chars = text.len(), "signal summary received");
        Ok(text)
    }

    #[instrument(skip(self, pools), fields(count = pools.len()), level = "debug")]
    async fn summarize_pools(&self, pools: &[DexPool], deep_mode: bool) -> Result<String, AiError> {
        self.api_key()?;
        let prompt = pools_prompt(pools, deep_mode)?;
        let config = if deep_mode {
            None
        } else {
            Some(GenerationConfig::fast())
        };

        let text = self.generate_text(&self.text_model, prompt, config).await?;

        debug!(chars = text.len(), "pool summary received");
        Ok(text)
    }

    #[instrument(skip(self), level = "debug")]
    async fn generate_post(&self) -> Result<PostDraft, AiError> {
        self.api_key()?;

        let text = self
            .generate_text(
                &self.post_model,
                post_prompt().to_string(),
                Some(GenerationConfig::json(post_schema())),
            )
            .await?;

        let post = parse_post(&text)?;
        debug!(title = %post.title, "blog post generated");
        Ok(post)
    }

    #[instrument(skip(self, prompt, aspect_ratio), fields(aspect_ratio = %aspect_ratio), level = "debug")]
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, AiError> {
        self.api_key()?;

        let url = self.model_url(&self.image_model, "predict");
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.as_str().to_string(),
                output_mime_type: IMAGE_MIME.to_string(),
            },
        };

        let resp: PredictResponse =
            warn_if_slow("predict_image", SLOW_CALL, self.post_json(&url, &request)).await?;

        let image = extract_image(resp)?;
        debug!(bytes = image.payload_len(), "image generated");
        Ok(image)
    }
}
