//! Garment type inference from free text.

use crate::catalog::GARMENT_TYPES;

pub const DEFAULT_GARMENT: &str = "Dress";

/// Secondary keyword heuristics, consulted only when no catalog label matches.
const FALLBACKS: [(&str, &str); 4] = [
    ("top", "Blouse"),
    ("trouser", "Pants"),
    ("sweater", "Hoodie"),
    ("pullover", "Hoodie"),
];

/// Pick a garment label for a free-text description.
///
/// The first catalog label found as a case-insensitive substring wins, so
/// catalog order decides ties ("dog coat" resolves to "Coat").
pub fn infer_type(description: &str) -> &'static str {
    let text = description.to_lowercase();

    GARMENT_TYPES
        .iter()
        .find(|label| text.contains(&label.to_lowercase()))
        .or_else(|| {
            FALLBACKS
                .iter()
                .find(|(keyword, _)| text.contains(keyword))
                .map(|(_, label)| label)
        })
        .copied()
        .unwrap_or(DEFAULT_GARMENT)
}
