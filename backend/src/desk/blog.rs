use std::sync::Arc;

use adapters::gemini::{AiError, AspectRatio, GenerativeApi, ImageRef, PostDraft};
use common::logger::{TraceId, child_span, root_span};
use tracing::{Instrument, info, warn};

use crate::desk::{Panel, PanelState, user_message};

/// Blog post ready for display: generated text plus its illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub body: String,
    pub image_prompt: String,
    pub image: ImageRef,
}

pub struct BlogDesk {
    ai: Arc<dyn GenerativeApi>,
    panel: Panel<BlogPost>,
}

impl BlogDesk {
    pub fn new(ai: Arc<dyn GenerativeApi>) -> Self {
        Self {
            ai,
            panel: Panel::new(),
        }
    }

    pub fn post(&self) -> PanelState<BlogPost> {
        self.panel.state()
    }

    /// Generates a post, then a 16:9 image from its image prompt.
    pub async fn fetch_new_post(&self) -> PanelState<BlogPost> {
        let trace_id = TraceId::new();
        let span = root_span("blog_post", &trace_id);

        async {
            let ticket = self.panel.begin();

            let outcome = match self.compose().await {
                Ok(post) => {
                    info!(title = %post.title, "blog post ready");
                    Ok(post)
                }
                Err(e) => {
                    warn!(error = %e, transient = e.is_transient(), "blog post failed");
                    Err(user_message(&e))
                }
            };

            self.panel.finish(ticket, outcome);
            self.panel.state()
        }
        .instrument(span)
        .await
    }

    async fn compose(&self) -> Result<BlogPost, AiError> {
        let PostDraft {
            title,
            body,
            image_prompt,
        } = self
            .ai
            .generate_post()
            .instrument(child_span("generate_post"))
            .await?;

        let image = self
            .ai
            .generate_image(&image_prompt, AspectRatio::Landscape)
            .instrument(child_span("generate_image"))
            .await?;

        Ok(BlogPost {
            title,
            body,
            image_prompt,
            image,
        })
    }
}
