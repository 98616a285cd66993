use std::sync::Arc;

use adapters::gemini::{AspectRatio, GenerativeApi, ImageRef};
use common::logger::{TraceId, root_span};
use tracing::{Instrument, info, warn};

use crate::desk::{Panel, PanelState, user_message};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub image: ImageRef,
}

/// Free-form image generator.
pub struct ImageDesk {
    ai: Arc<dyn GenerativeApi>,
    panel: Panel<GeneratedImage>,
}

impl ImageDesk {
    pub fn new(ai: Arc<dyn GenerativeApi>) -> Self {
        Self {
            ai,
            panel: Panel::new(),
        }
    }

    pub fn image(&self) -> PanelState<GeneratedImage> {
        self.panel.state()
    }

    /// Rejects a blank prompt without touching the panel or the API.
    pub async fn submit(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<PanelState<GeneratedImage>, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::InvalidInput("prompt is required".to_string()));
        }

        let trace_id = TraceId::new();
        let span = root_span("image_generation", &trace_id);

        let state = async {
            let ticket = self.panel.begin();

            let outcome = match self.ai.generate_image(prompt, aspect_ratio).await {
                Ok(image) => {
                    info!(aspect_ratio = %aspect_ratio, "image ready");
                    Ok(GeneratedImage {
                        prompt: prompt.to_string(),
                        aspect_ratio,
                        image,
                    })
                }
                Err(e) => {
                    warn!(error = %e, transient = e.is_transient(), "image generation failed");
                    Err(user_message(&e))
                }
            };

            self.panel.finish(ticket, outcome);
            self.panel.state()
        }
        .instrument(span)
        .await;

        Ok(state)
    }
}
