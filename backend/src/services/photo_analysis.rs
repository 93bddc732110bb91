//! Photo analysis boundary.
//!
//! The vision model itself is called by a proxy outside this crate. What lives
//! here is the part both sides must agree on: which uploads are acceptable,
//! the prompt sent with them, and how the model's answer is read back.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::sanitize::sanitize_text;
use crate::models::{ImageFormat, PhotoAnalysis};

/// Upload ceiling used when nothing is configured.
pub const DEFAULT_MAX_IMAGE_SIZE_MB: f64 = 10.0;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const ACCEPTED_PREFIXES: [(&str, ImageFormat); 4] = [
    ("data:image/jpeg", ImageFormat::Jpeg),
    ("data:image/jpg", ImageFormat::Jpeg),
    ("data:image/png", ImageFormat::Png),
    ("data:image/webp", ImageFormat::Webp),
];

const ANALYSIS_PROMPT: &str = "Analyze this astrophotography image and provide concise feedback on composition, technical aspects, and suggestions for improvement. Keep your response under 500 words. Focus on:
1) Star visibility and focus quality
2) Light pollution impact and mitigation
3) Foreground composition and framing
4) Exposure settings and contrast
5) Overall technical quality and artistic merit

Please provide specific, actionable advice for improving future astrophotography shots. Be concise and direct.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhotoAnalysisError {
    #[error("Invalid image format. Please upload a JPEG, PNG, or WebP image.")]
    InvalidFormat,

    #[error("Invalid image data. Please try uploading the image again.")]
    InvalidData,

    #[error("Image too large ({size_mb:.2}MB). Please upload an image smaller than {max_mb}MB.")]
    TooLarge { size_mb: f64, max_mb: f64 },

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),
}

/// An upload that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub format: ImageFormat,
    pub size_bytes: u64,
    pub size_mb: f64,
}

/// Check a `data:image/...;base64,` upload against the accepted formats and
/// `max_mb`.
///
/// Size is estimated from the base64 length, without decoding.
pub fn validate_image_payload(
    data_url: &str,
    max_mb: f64,
) -> Result<ImagePayload, PhotoAnalysisError> {
    let format = ACCEPTED_PREFIXES
        .iter()
        .find(|(prefix, _)| data_url.starts_with(prefix))
        .map(|(_, format)| *format)
        .ok_or(PhotoAnalysisError::InvalidFormat)?;

    let size_bytes = estimated_size_bytes(data_url);
    let size_mb = size_bytes as f64 / BYTES_PER_MB;
    debug!("image upload: {:?}, {:.2}MB", format, size_mb);

    if size_bytes == 0 {
        return Err(PhotoAnalysisError::InvalidData);
    }
    if size_mb > max_mb {
        return Err(PhotoAnalysisError::TooLarge { size_mb, max_mb });
    }

    Ok(ImagePayload {
        format,
        size_bytes,
        size_mb,
    })
}

fn estimated_size_bytes(data_url: &str) -> u64 {
    let encoded = if data_url.contains(',') {
        data_url.split(',').nth(1).unwrap_or_default()
    } else {
        data_url
    };
    (encoded.len() as u64 * 3).div_ceil(4)
}

/// Prompt sent to the vision model with each upload.
pub fn analysis_prompt() -> String {
    sanitize_text(ANALYSIS_PROMPT)
}

impl PhotoAnalysis {
    /// Read a model answer in any of the shapes upstream has produced.
    ///
    /// Accepted: `{"output":{"text":..}}`, `{"choices":[{"message":{"content":..}}]}`,
    /// `{"suggestions":[..]}` and `{"content":[{"text":..}]}`. Text is
    /// sanitised; an answer with nothing left is malformed.
    pub fn from_upstream(value: &Value) -> Result<Self, PhotoAnalysisError> {
        let free_text = value
            .pointer("/output/text")
            .or_else(|| value.pointer("/choices/0/message/content"))
            .and_then(Value::as_str);

        let analysis = if let Some(text) = free_text {
            PhotoAnalysis::FreeText {
                text: sanitize_text(text),
            }
        } else if let Some(items) = value.get("suggestions").and_then(Value::as_array) {
            PhotoAnalysis::Structured {
                suggestions: collect_texts(items.iter().filter_map(Value::as_str)),
            }
        } else if let Some(items) = value.get("content").and_then(Value::as_array) {
            PhotoAnalysis::Structured {
                suggestions: collect_texts(
                    items
                        .iter()
                        .filter_map(|item| item.get("text").and_then(Value::as_str)),
                ),
            }
        } else {
            return Err(PhotoAnalysisError::MalformedResponse(
                "no recognised analysis field".to_string(),
            ));
        };

        if analysis.is_empty() {
            return Err(PhotoAnalysisError::MalformedResponse(
                "analysis is empty".to_string(),
            ));
        }
        Ok(analysis)
    }
}

fn collect_texts<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<String> {
    texts
        .map(sanitize_text)
        .filter(|t| !t.is_empty())
        .collect()
}
