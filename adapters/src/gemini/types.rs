use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Landscape,
    Portrait,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(AspectRatio::Square),
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            other => Err(format!(
                "unsupported aspect ratio {other:?} (expected 1:1, 16:9 or 9:16)"
            )),
        }
    }
}

/// Blog post as returned by the schema-constrained generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,

    #[serde(rename = "imagePrompt")]
    pub image_prompt: String,
}

/// Generated image as a `data:` URL, ready for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn from_base64(mime_type: &str, data: &str) -> Self {
        Self(format!("data:{mime_type};base64,{data}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.0.strip_prefix("data:")?.split(';').next()
    }

    /// Length of the base64 payload.
    pub fn payload_len(&self) -> usize {
        self.0.split_once(',').map(|(_, d)| d.len()).unwrap_or(0)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratios_parse_from_their_labels() {
        assert_eq!("1:1".parse::<AspectRatio>(), Ok(AspectRatio::Square));
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Portrait));
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::Landscape.to_string(), "16:9");
        assert_eq!(AspectRatio::default(), AspectRatio::Square);
    }

    #[test]
    fn post_draft_reads_camel_case_image_prompt() {
        let post: PostDraft = serde_json::from_str(
            r#"{"title":"T","body":"B","imagePrompt":"neon charts"}"#,
        )
        .unwrap();
        assert_eq!(post.image_prompt, "neon charts");
    }

    #[test]
    fn image_ref_is_a_data_url() {
        let img = ImageRef::from_base64("image/jpeg", "QUJD");
        assert_eq!(img.as_str(), "data:image/jpeg;base64,QUJD");
        assert_eq!(img.mime_type(), Some("image/jpeg"));
        assert_eq!(img.payload_len(), 4);
    }
}
