use crate::ingest::UploadedGarment;
use crate::types::StyleOption;
use serde::Serialize;

const REDESIGN_TEMPLATE: &str = "Redesign this garment into a {id} high-fashion masterpiece. \
Keep the same fabric texture, color palette, and patterns from the original. \
The new design should be an upcycled version that transforms the old silhouette \
into a modern, sophisticated {label} style. \
Professional fashion photography, white studio background, high detail.";

/// Render the redesign instruction for a style.
///
/// Names the target aesthetic, asks for the original fabric, colors and
/// patterns to be kept, and fixes the output framing.
pub fn render_instruction(style: &StyleOption) -> String {
    REDESIGN_TEMPLATE
        .replace("{id}", style.id)
        .replace("{label}", style.label)
}

/// One transform attempt: instruction text paired with the encoded garment.
///
/// Built fresh for every attempt and dropped once the call completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub instruction: String,
    pub style_id: &'static str,
    pub mime_type: String,
    pub image_b64: String,
}

impl TransformRequest {
    /// Build a request from a garment and a style. Pure function of its inputs.
    pub fn build(garment: &UploadedGarment, style: &StyleOption) -> Self {
        Self {
            instruction: render_instruction(style),
            style_id: style.id,
            mime_type: garment.mime_type().to_string(),
            image_b64: garment.encoded().to_string(),
        }
    }

    /// The `generateContent` JSON body for this request.
    pub fn to_body(&self) -> GenerateContentBody<'_> {
        GenerateContentBody {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: &self.instruction,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &self.mime_type,
                            data: &self.image_b64,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: &["TEXT", "IMAGE"],
            },
        }
    }
}

/// Request body for the `generateContent` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::STYLE_CATALOG;

    fn garment() -> UploadedGarment {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        UploadedGarment::from_bytes(png, 1024).unwrap()
    }

    #[test]
    fn instruction_names_label_and_preserves_fabric() {
        for style in &STYLE_CATALOG {
            let text = render_instruction(style);
            assert!(text.contains(style.label), "missing label for {}", style.id);
            assert!(text.contains(style.id));
            assert!(text.contains("Keep the same fabric texture, color palette, and patterns"));
            assert!(text.contains("white studio background"));
            assert!(!text.contains('{'));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let g = garment();
        let style = StyleOption::find("avant-garde").unwrap();
        let a = TransformRequest::build(&g, style);
        let b = TransformRequest::build(&g, style);
        assert_eq!(a, b);
        assert_eq!(a.instruction.as_bytes(), b.instruction.as_bytes());
    }

    #[test]
    fn build_pairs_instruction_with_image() {
        let g = garment();
        let req = TransformRequest::build(&g, StyleOption::find("boho-chic").unwrap());
        assert_eq!(req.style_id, "boho-chic");
        assert_eq!(req.mime_type, "image/png");
        assert_eq!(req.image_b64, g.encoded());
    }

    #[test]
    fn body_matches_wire_shape() {
        let req = TransformRequest::build(&garment(), StyleOption::default_style());
        let json = serde_json::to_value(req.to_body()).unwrap();

        let parts = json.pointer("/contents/0/parts").and_then(|v| v.as_array()).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["text"], req.instruction.as_str());
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], req.image_b64.as_str());
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
    }
}
