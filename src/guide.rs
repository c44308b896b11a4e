//! Static copy shown alongside a finished redesign.

use crate::types::StyleOption;
use serde::Serialize;

/// One step of the tailoring guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailoringStep {
    pub number: u8,
    pub title: &'static str,
    pub detail: String,
}

/// Fixed sustainability figures and copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SustainabilityFacts {
    pub water_saved_liters: u32,
    pub carbon_saved_kg: f32,
    pub quote: &'static str,
    pub tagline: &'static str,
}

pub const SUSTAINABILITY: SustainabilityFacts = SustainabilityFacts {
    water_saved_liters: 2_500,
    carbon_saved_kg: 12.4,
    quote: "Redesigning a single dress saves approximately 2,500 liters of water compared to buying new.",
    tagline: "The most sustainable garment is the one already in your closet.",
};

/// The three-step tailoring guide for a redesign in `style`.
pub fn tailoring_guide(style: &StyleOption) -> Vec<TailoringStep> {
    vec![
        TailoringStep {
            number: 1,
            title: "Deconstruct Seams",
            detail: "Carefully separate the side panels while preserving the fabric grain."
                .to_string(),
        },
        TailoringStep {
            number: 2,
            title: "Re-Draping",
            detail: format!(
                "Apply the new bias cut as shown in the AI silhouette for the {} effect.",
                style.id
            ),
        },
        TailoringStep {
            number: 3,
            title: "Finishing",
            detail: "Use invisible stitching on the hems to maintain the luxury finish.".to_string(),
        },
    ]
}
