//! The captured generation request.

use crate::MediaKind;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Prompt and parameters for one generation call.
///
/// A request is captured at issue time: the orchestrator clones it into
/// every slot it issues, so later edits to the caller's prompt never leak
/// into in-flight or retried slots.
///
/// # Examples
///
/// ```
/// use atelier_core::{GenerationRequest, MediaKind};
///
/// let request = GenerationRequest::builder()
///     .prompt("a cat in a hat".to_string())
///     .kind(MediaKind::Image)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt, "a cat in a hat");
/// assert!(request.model.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct GenerationRequest {
    /// The prompt text sent to the provider
    pub prompt: String,
    /// Kind of media to generate
    #[builder(default = "MediaKind::Image")]
    pub kind: MediaKind,
    /// Model identifier to use
    #[builder(default)]
    pub model: Option<String>,
    /// Requested aspect ratio (e.g., "16:9")
    #[builder(default)]
    pub aspect_ratio: Option<String>,
    /// Requested clip duration for video output
    #[builder(default)]
    pub duration_seconds: Option<f32>,
}

impl GenerationRequest {
    /// Start building a request.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}
