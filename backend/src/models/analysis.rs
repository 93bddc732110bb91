use serde::{Deserialize, Serialize};

/// Critique returned for an uploaded astrophotograph.
///
/// Upstream has answered both with a list of suggestions and with one block
/// of prose; both shapes are kept distinct so the display layer can choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoAnalysis {
    Structured { suggestions: Vec<String> },
    FreeText { text: String },
}

impl PhotoAnalysis {
    /// Everything as one block of text, suggestions one per line.
    pub fn as_text(&self) -> String {
        match self {
            PhotoAnalysis::Structured { suggestions } => suggestions.join("\n"),
            PhotoAnalysis::FreeText { text } => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PhotoAnalysis::Structured { suggestions } => {
                suggestions.iter().all(|s| s.trim().is_empty())
            }
            PhotoAnalysis::FreeText { text } => text.trim().is_empty(),
        }
    }
}

/// Accepted image encodings for analysis uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }
}
