//! Input analysis: resolves which modality is authoritative for style.
//!
//! Analysis failures never fail a request. The pipeline turns them into a
//! warning and continues with text-only style inference.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use url::Url;

use adgen_models::{
    ExtractedParameters, MediaReference, PromptInput, ReferenceKind, ReferenceSummary,
    StyleSource,
};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid {field} url: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("unsupported {field} url scheme: {scheme}")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{field} is not valid base64: {reason}")]
    InvalidBase64 { field: &'static str, reason: String },

    #[error("{field} decoded to no data")]
    EmptyPayload { field: &'static str },
}

/// Resolves visual references for a prompt.
#[async_trait]
pub trait InputAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        prompt: &PromptInput,
        params: &ExtractedParameters,
    ) -> Result<ReferenceSummary, AnalysisError>;
}

/// Default analyzer: inspects references locally without fetching them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceAnalyzer;

impl ReferenceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InputAnalyzer for ReferenceAnalyzer {
    async fn analyze(
        &self,
        prompt: &PromptInput,
        params: &ExtractedParameters,
    ) -> Result<ReferenceSummary, AnalysisError> {
        let image = match (prompt.image_base64(), prompt.image_url()) {
            (Some(data), _) => Some(inline_reference("image_base64", data)?),
            (None, Some(url)) => Some(url_reference("image_url", url)?),
            (None, None) => None,
        };
        let video = match (prompt.video_base64(), prompt.video_url()) {
            (Some(data), _) => Some(inline_reference("video_base64", data)?),
            (None, Some(url)) => Some(url_reference("video_url", url)?),
            (None, None) => None,
        };

        // A usable reference is authoritative: video, then image, then text.
        let style_source = if video.is_some() {
            StyleSource::Video
        } else if image.is_some() {
            StyleSource::Image
        } else {
            StyleSource::Text
        };

        let mut notes = Vec::new();
        if let Some(reference) = &image {
            notes.push(describe("image", reference));
        }
        if let Some(reference) = &video {
            notes.push(describe("video", reference));
        }
        if params.has_style_keywords() && (image.is_some() || video.is_some()) {
            notes.push(format!(
                "caption style keywords: {}",
                params.style_keywords.join(", ")
            ));
        }

        Ok(ReferenceSummary {
            style_source,
            image,
            video,
            notes,
        })
    }
}

fn describe(label: &str, reference: &MediaReference) -> String {
    let mime = reference.mime_type.as_deref().unwrap_or("unknown type");
    match (reference.kind, reference.size_bytes, &reference.url) {
        (ReferenceKind::Inline, Some(size), _) => {
            format!("{} reference supplied inline ({}, {} bytes)", label, mime, size)
        }
        (_, _, Some(url)) => format!("{} reference at {} ({})", label, url, mime),
        _ => format!("{} reference ({})", label, mime),
    }
}

fn url_reference(field: &'static str, raw: &str) -> Result<MediaReference, AnalysisError> {
    let url = Url::parse(raw).map_err(|e| AnalysisError::InvalidUrl {
        field,
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AnalysisError::UnsupportedScheme {
            field,
            scheme: url.scheme().to_string(),
        });
    }

    let mime_type = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .and_then(|(_, ext)| mime_from_extension(ext))
        .map(str::to_string);

    Ok(MediaReference {
        kind: ReferenceKind::Url,
        mime_type,
        size_bytes: None,
        url: Some(url.to_string()),
    })
}

fn inline_reference(field: &'static str, raw: &str) -> Result<MediaReference, AnalysisError> {
    // Accept both bare base64 and `data:<mime>;base64,<payload>` URIs.
    let (declared_mime, payload) = match raw.strip_prefix("data:") {
        Some(rest) => match rest.split_once(',') {
            Some((header, payload)) => (
                header
                    .split(';')
                    .next()
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
                payload,
            ),
            None => (None, rest),
        },
        None => (None, raw),
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AnalysisError::InvalidBase64 {
            field,
            reason: e.to_string(),
        })?;

    if bytes.is_empty() {
        return Err(AnalysisError::EmptyPayload { field });
    }

    let mime_type = sniff_mime(&bytes).map(str::to_string).or(declared_mime);

    Ok(MediaReference {
        kind: ReferenceKind::Inline,
        mime_type,
        size_bytes: Some(bytes.len()),
        url: None,
    })
}

/// Identify common image and video containers from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [0x1A, 0x45, 0xDF, 0xA3, ..] => Some("video/webm"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'q', b't', ..] => Some("video/quicktime"),
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => Some("video/mp4"),
        _ => None,
    }
}

fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" | "m4v" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "webm" => Some("video/webm"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn analyze(prompt: PromptInput, keywords: &[&str]) -> Result<ReferenceSummary, AnalysisError> {
        let params = ExtractedParameters {
            style_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        };
        tokio_test::block_on(ReferenceAnalyzer::new().analyze(&prompt, &params))
    }

    #[test]
    fn test_inline_image_is_style_source() {
        let prompt = PromptInput {
            text: Some("our new sneakers".to_string()),
            image_base64: Some(STANDARD.encode(PNG_HEADER)),
            ..Default::default()
        };
        let summary = analyze(prompt, &[]).unwrap();
        assert_eq!(summary.style_source, StyleSource::Image);
        let image = summary.image.unwrap();
        assert_eq!(image.kind, ReferenceKind::Inline);
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
        assert_eq!(image.size_bytes, Some(PNG_HEADER.len()));
    }

    #[test]
    fn test_data_uri_prefix_accepted() {
        let prompt = PromptInput {
            image_base64: Some(format!("data:image/png;base64,{}", STANDARD.encode(PNG_HEADER))),
            ..Default::default()
        };
        assert_eq!(analyze(prompt, &[]).unwrap().style_source, StyleSource::Image);
    }

    #[test]
    fn test_video_beats_image() {
        let prompt = PromptInput {
            image_url: Some("https://cdn.example.com/look.jpg".to_string()),
            video_url: Some("https://cdn.example.com/clip.mp4".to_string()),
            ..Default::default()
        };
        let summary = analyze(prompt, &[]).unwrap();
        assert_eq!(summary.style_source, StyleSource::Video);
        assert_eq!(
            summary.video.unwrap().mime_type.as_deref(),
            Some("video/mp4")
        );
        assert_eq!(summary.notes.len(), 2);
    }

    #[test]
    fn test_reference_wins_over_caption_keywords() {
        let prompt = PromptInput {
            text: Some("sleek black watch".to_string()),
            image_base64: Some(STANDARD.encode(PNG_HEADER)),
            ..Default::default()
        };
        let summary = analyze(prompt, &["sleek"]).unwrap();
        assert_eq!(summary.style_source, StyleSource::Image);
        assert!(summary
            .notes
            .iter()
            .any(|n| n == "caption style keywords: sleek"));
    }

    #[test]
    fn test_text_only_prompt_is_text_source() {
        let prompt = PromptInput::from_text("moody cinematic ad");
        let summary = analyze(prompt, &["moody", "cinematic"]).unwrap();
        assert_eq!(summary.style_source, StyleSource::Text);
        assert!(!summary.has_references());
        assert!(summary.notes.is_empty());
    }

    #[test]
    fn test_bad_references_are_errors() {
        let bad_scheme = PromptInput {
            image_url: Some("ftp://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            analyze(bad_scheme, &[]),
            Err(AnalysisError::UnsupportedScheme { .. })
        ));

        let bad_base64 = PromptInput {
            image_base64: Some("***not base64***".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            analyze(bad_base64, &[]),
            Err(AnalysisError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(
            sniff_mime(&[0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm']),
            Some("video/mp4")
        );
        assert_eq!(sniff_mime(b"hello"), None);
    }
}
