use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named aesthetic preset steering the generated redesign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    /// Stable identifier (e.g., "avant-garde")
    pub id: &'static str,
    /// Display label (e.g., "Avant-Garde")
    pub label: &'static str,
    /// One-line description shown under the label
    pub description: &'static str,
}

/// The fixed style catalog, in display order.
pub const STYLE_CATALOG: [StyleOption; 4] = [
    StyleOption {
        id: "minimalist",
        label: "Quiet Luxury",
        description: "Sleek, refined, and understated",
    },
    StyleOption {
        id: "avant-garde",
        label: "Avant-Garde",
        description: "Bold structures and artistic flair",
    },
    StyleOption {
        id: "boho-chic",
        label: "Boho Chic",
        description: "Flowing shapes and relaxed patterns",
    },
    StyleOption {
        id: "streetwear",
        label: "Urban Edge",
        description: "Modern, modular, and functional",
    },
];

/// Identifier of the style preselected when the studio opens.
pub const DEFAULT_STYLE_ID: &str = "avant-garde";

impl StyleOption {
    /// Look up a catalog entry by identifier.
    pub fn find(id: &str) -> Option<&'static StyleOption> {
        STYLE_CATALOG.iter().find(|s| s.id == id)
    }

    /// The style preselected when a garment enters the studio.
    pub fn default_style() -> &'static StyleOption {
        // The catalog is a compile-time constant containing the default id.
        &STYLE_CATALOG[1]
    }

    /// All catalog entries, in display order.
    pub fn all() -> &'static [StyleOption] {
        &STYLE_CATALOG
    }
}

/// An image returned by the generation service, kept base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Media type declared by the service (default: "image/png")
    pub mime_type: String,
    /// Base64 payload exactly as returned by the service
    pub data: String,
}

impl GeneratedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Displayable `data:` URL for the generated image.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &self.data)
    }

    /// Decode the payload and write it to `path`.
    pub fn write_to(&self, path: &Path) -> crate::Result<()> {
        let bytes = self.decode()?;
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "generated image written");
        Ok(())
    }
}

/// Which of the three workflow screens is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Landing,
    Studio,
    Results,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_unique_ids() {
        let mut ids: Vec<&str> = STYLE_CATALOG.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn default_style_matches_default_id() {
        assert_eq!(StyleOption::default_style().id, DEFAULT_STYLE_ID);
        assert_eq!(StyleOption::default_style().label, "Avant-Garde");
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(StyleOption::find("minimalist").unwrap().label, "Quiet Luxury");
        assert_eq!(StyleOption::find("streetwear").unwrap().label, "Urban Edge");
        assert!(StyleOption::find("grunge").is_none());
    }

    #[test]
    fn generated_image_data_url() {
        let img = GeneratedImage::new("image/png", "aGVsbG8=");
        assert_eq!(img.data_url(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(img.decode().unwrap(), b"hello");
    }

    #[test]
    fn write_to_saves_decoded_bytes() {
        let path = std::env::temp_dir().join(format!("rethread-out-{}.png", std::process::id()));
        GeneratedImage::new("image/png", "aGVsbG8=").write_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_to_rejects_bad_payload() {
        let path = std::env::temp_dir().join("rethread-never-written.png");
        let err = GeneratedImage::new("image/png", "not base64!").write_to(&path).unwrap_err();
        assert!(matches!(err, crate::RethreadError::Decode(_)));
        assert!(!path.exists());
    }

    #[test]
    fn stage_kind_serialization() {
        let json = serde_json::to_string(&StageKind::Results).unwrap();
        assert_eq!(json, "\"results\"");
    }
}
