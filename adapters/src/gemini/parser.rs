//! Turns raw API responses into domain values or [`AiError`]s.
//!
//! The rules:
//!
//! - a non-2xx body carrying Google's error envelope yields the envelope
//!   message; anything else yields the status plus the (trimmed) body,
//! - a blocked prompt or an empty candidate list is a remote failure,
//! - a post that does not match the schema is a malformed response,
//! - an image response without bytes is a remote failure.

use crate::gemini::errors::AiError;
use crate::gemini::types::{ImageRef, PostDraft};
use crate::gemini::wire::{ErrorEnvelope, GenerateContentResponse, PredictResponse};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
const MAX_ERROR_BODY: usize = 300;

pub fn remote_error(status: u16, body: &str) -> AiError {
    if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) {
        return AiError::Remote(env.error.message);
    }

    let body = body.trim();
    if body.is_empty() {
        return AiError::Remote(format!("HTTP {status} with empty body"));
    }

    let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
    AiError::Remote(format!("HTTP {status}: {snippet}"))
}

pub fn extract_text(resp: GenerateContentResponse) -> Result<String, AiError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AiError::Remote(format!("request blocked: {reason}")));
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(AiError::Remote("no candidates returned".to_string()));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AiError::Remote(format!(
            "empty response (finish reason: {reason})"
        )));
    }

    Ok(text)
}

pub fn parse_post(text: &str) -> Result<PostDraft, AiError> {
    let json = strip_code_fence(text);

    let post: PostDraft =
        serde_json::from_str(json).map_err(|e| AiError::MalformedResponse(e.to_string()))?;

    for (field, value) in [
        ("title", &post.title),
        ("body", &post.body),
        ("imagePrompt", &post.image_prompt),
    ] {
        if value.trim().is_empty() {
            return Err(AiError::MalformedResponse(format!(
                "post field `{field}` is empty"
            )));
        }
    }

    Ok(post)
}

pub fn extract_image(resp: PredictResponse) -> Result<ImageRef, AiError> {
    let mut filtered = None;

    for p in resp.predictions {
        match p.bytes_base64_encoded {
            Some(bytes) if !bytes.is_empty() => {
                let mime = p.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME);
                return Ok(ImageRef::from_base64(mime, &bytes));
            }
            _ => filtered = filtered.or(p.rai_filtered_reason),
        }
    }

    Err(match filtered {
        Some(reason) => AiError::Remote(format!("image blocked: {reason}")),
        None => AiError::Remote("no image returned".to_string()),
    })
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(v: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(v).unwrap()
    }

    // -----------------------------------------------------------------------
    // Error bodies
    // -----------------------------------------------------------------------

    #[test]
    fn envelope_message_becomes_remote_error() {
        let body = json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })
        .to_string();

        match remote_error(429, &body) {
            AiError::Remote(m) => assert_eq!(m, "Quota exceeded"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn plain_body_keeps_status_and_text() {
        match remote_error(502, "  bad gateway \n") {
            AiError::Remote(m) => assert_eq!(m, "HTTP 502: bad gateway"),
            other => panic!("expected Remote, got {other:?}"),
        }
        match remote_error(500, "") {
            AiError::Remote(m) => assert_eq!(m, "HTTP 500 with empty body"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    #[test]
    fn text_parts_are_joined() {
        let resp = response(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "BTC " }, { "text": "leads." }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_text(resp).unwrap(), "BTC leads.");
    }

    #[test]
    fn blocked_prompt_is_remote_error() {
        let resp = response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        match extract_text(resp) {
            Err(AiError::Remote(m)) => assert_eq!(m, "request blocked: SAFETY"),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "MAX_TOKENS" }]
        }));
        match extract_text(resp) {
            Err(AiError::Remote(m)) => assert!(m.contains("MAX_TOKENS")),
            other => panic!("expected Remote, got {other:?}"),
        }

        assert!(matches!(
            extract_text(response(json!({}))),
            Err(AiError::Remote(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Posts
    // -----------------------------------------------------------------------

    #[test]
    fn post_is_parsed_from_json_text() {
        let post = parse_post(r#"{"title":"Gas wars","body":"...","imagePrompt":"robots"}"#).unwrap();
        assert_eq!(post.title, "Gas wars");
        assert_eq!(post.image_prompt, "robots");
    }

    #[test]
    fn fenced_post_is_accepted() {
        let text = "```json\n{\"title\":\"t\",\"body\":\"b\",\"imagePrompt\":\"i\"}\n```";
        assert_eq!(parse_post(text).unwrap().body, "b");
    }

    #[test]
    fn post_missing_fields_is_malformed() {
        assert!(matches!(
            parse_post(r#"{"title":"t","body":"b"}"#),
            Err(AiError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_post("Here is your post!"),
            Err(AiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn post_with_blank_field_is_malformed() {
        match parse_post(r#"{"title":" ","body":"b","imagePrompt":"i"}"#) {
            Err(AiError::MalformedResponse(m)) => assert!(m.contains("title")),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    #[test]
    fn first_image_becomes_data_url() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "predictions": [{ "bytesBase64Encoded": "QUJD", "mimeType": "image/png" }]
        }))
        .unwrap();
        assert_eq!(extract_image(resp).unwrap().as_str(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn missing_mime_defaults_to_jpeg() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "predictions": [{ "bytesBase64Encoded": "QUJD" }]
        }))
        .unwrap();
        assert_eq!(extract_image(resp).unwrap().mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn filtered_or_empty_image_is_remote_error() {
        let filtered: PredictResponse = serde_json::from_value(json!({
            "predictions": [{ "raiFilteredReason": "contains a person" }]
        }))
        .unwrap();
        match extract_image(filtered) {
            Err(AiError::Remote(m)) => assert_eq!(m, "image blocked: contains a person"),
            other => panic!("expected Remote, got {other:?}"),
        }

        assert!(matches!(
            extract_image(PredictResponse::default()),
            Err(AiError::Remote(_))
        ));
    }
}
