//! Media kinds and generated payload references.

use serde::{Deserialize, Serialize};

/// Type of generated media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Still image output (PNG, JPEG, WebP, etc.)
    Image,
    /// Video shot output (MP4, WebM, etc.)
    Video,
}

impl MediaKind {
    /// Convert to string representation for storage and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(format!("Unknown media kind: {}", s)),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a generated artifact's content lives.
///
/// The orchestration core never touches the bytes; it records an opaque
/// reference handed back by the provider.
///
/// # Examples
///
/// ```
/// use atelier_core::MediaSource;
///
/// let url = MediaSource::Url("https://cdn.example.com/out/42.png".to_string());
/// let handle = MediaSource::Handle("blob:abc123".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Provider-side blob handle
    Handle(String),
}

/// Reference to one generated output, as returned by a provider.
///
/// This structure contains everything the store persists about the
/// content itself; retrieval goes through the source reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPayload {
    /// Type of media
    pub kind: MediaKind,
    /// Opaque reference to the content
    pub source: MediaSource,
    /// MIME type (e.g., "image/png", "video/mp4")
    pub mime_type: String,
    /// Image/video width in pixels
    pub width: Option<u32>,
    /// Image/video height in pixels
    pub height: Option<u32>,
    /// Video duration in seconds
    pub duration_seconds: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_str() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            let parsed: MediaKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("audio".parse::<MediaKind>().is_err());
    }
}
