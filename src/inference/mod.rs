//! Garment Inference Engine
//!
//! Maps `(garment type, size system, size)` to a sewing recommendation.
//! The mapping is an ordered rule table (see [`rules`]); it never fails and
//! has no hidden state, so identical inputs always yield identical records.

pub mod description;
pub mod instructions;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::SizeSystem;

pub use description::infer_type;
pub use instructions::{generate_instructions, InstructionStep};
pub use rules::{Condition, Effect, Rule, RULES};

pub const DEFAULT_THREAD: &str = "Polyester all-purpose thread — colour-matched";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

/// Derived sewing recommendation for one garment.
///
/// `stitch_types` is positional: the first entry is the main construction
/// stitch, the second the seam finish, the last the hem stitch.
/// `notions` always starts with "Matching thread" and may hold duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentInference {
    pub garment_type: String,
    pub fabric_type: String,
    pub fabric_quantity_m: f64,
    pub needle_type: String,
    pub needle_size: String,
    pub stitch_types: Vec<String>,
    pub tension_range: String,
    pub seam_allowance_mm: u32,
    pub difficulty: Difficulty,
    pub notions: Vec<String>,
    pub interfacing: String,
    pub thread: String,
}

/// Keyword classification of a garment label, computed once per inference.
#[derive(Debug, Clone)]
pub struct Traits {
    pub lowered: String,
    pub knit: bool,
    pub outerwear: bool,
    pub animal: bool,
    pub small: bool,
}

const KNIT_KEYWORDS: [&str; 4] = ["t-shirt", "tank top", "hoodie", "romper"];
const OUTERWEAR_KEYWORDS: [&str; 4] = ["jacket", "coat", "hoodie", "cardigan"];

impl Traits {
    pub fn classify(garment_type: &str, size_system: SizeSystem) -> Self {
        let lowered = garment_type.to_lowercase();
        let knit = KNIT_KEYWORDS.iter().any(|k| lowered.contains(k));
        let outerwear = OUTERWEAR_KEYWORDS.iter().any(|k| lowered.contains(k));
        Self {
            lowered,
            knit,
            outerwear,
            animal: size_system.is_animal(),
            small: size_system.is_small(),
        }
    }

    pub fn mentions(&self, keyword: &str) -> bool {
        self.lowered.contains(keyword)
    }
}

/// Mutable accumulator the rule table is applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    pub fabric_type: &'static str,
    pub base_quantity_m: f64,
    pub needle_type: &'static str,
    pub needle_size: &'static str,
    pub stitch_types: Vec<&'static str>,
    pub tension_range: &'static str,
    pub difficulty: Difficulty,
    pub notions: Vec<&'static str>,
    pub interfacing: &'static str,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            fabric_type: "Cotton Poplin",
            base_quantity_m: 1.5,
            needle_type: "Universal",
            needle_size: "80/12",
            stitch_types: vec!["Straight stitch", "Zigzag (finishing)", "Topstitch"],
            tension_range: "4–5",
            difficulty: Difficulty::Beginner,
            notions: vec!["Matching thread"],
            interfacing: "None required",
        }
    }
}

/// Seam allowance baked into the printed pattern: 8mm for animal sizing,
/// 15mm otherwise. Independent of a project's configurable allowance.
pub fn seam_allowance_mm(size_system: SizeSystem) -> u32 {
    if size_system.is_animal() {
        8
    } else {
        15
    }
}

/// Round to the nearest 0.1 metre.
pub fn round_to_tenth(metres: f64) -> f64 {
    (metres * 10.0).round() / 10.0
}

/// Infer sewing parameters for a garment.
pub fn infer(garment_type: &str, size_system: SizeSystem, size: &str) -> GarmentInference {
    let traits = Traits::classify(garment_type, size_system);
    let acc = rules::apply_all(&traits, RULES);

    tracing::debug!(
        garment_type,
        size_system = size_system.code(),
        size,
        fabric = acc.fabric_type,
        difficulty = %acc.difficulty,
        "garment inferred"
    );

    GarmentInference {
        garment_type: garment_type.to_string(),
        fabric_type: acc.fabric_type.to_string(),
        fabric_quantity_m: round_to_tenth(acc.base_quantity_m),
        needle_type: acc.needle_type.to_string(),
        needle_size: acc.needle_size.to_string(),
        stitch_types: acc.stitch_types.iter().map(|s| s.to_string()).collect(),
        tension_range: acc.tension_range.to_string(),
        seam_allowance_mm: seam_allowance_mm(size_system),
        difficulty: acc.difficulty,
        notions: acc.notions.iter().map(|s| s.to_string()).collect(),
        interfacing: acc.interfacing.to_string(),
        thread: DEFAULT_THREAD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branch() {
        let rec = infer("Onesie", SizeSystem::AuWomen, "10");
        assert_eq!(rec.fabric_type, "Cotton Poplin");
        assert_eq!(rec.fabric_quantity_m, 1.5);
        assert_eq!(rec.difficulty, Difficulty::Beginner);
        assert_eq!(rec.needle_type, "Universal");
        assert_eq!(rec.needle_size, "80/12");
        assert_eq!(rec.tension_range, "4–5");
        assert_eq!(rec.notions, vec!["Matching thread"]);
        assert_eq!(rec.interfacing, "None required");
        assert_eq!(rec.thread, DEFAULT_THREAD);
    }

    #[test]
    fn test_dress_women() {
        let rec = infer("Dress", SizeSystem::AuWomen, "12");
        assert_eq!(rec.fabric_type, "Cotton Lawn");
        assert_eq!(rec.fabric_quantity_m, 2.5);
        assert_eq!(rec.difficulty, Difficulty::Intermediate);
        assert_eq!(rec.notions, vec!["Matching thread", "1× Invisible zipper (55cm)"]);
        assert_eq!(rec.interfacing, "Lightweight fusible — collar and facing");
        assert_eq!(rec.seam_allowance_mm, 15);
    }

    #[test]
    fn test_kids_scaling() {
        let rec = infer("Blouse", SizeSystem::AuKids, "4");
        assert_eq!(rec.fabric_quantity_m, 0.9);
        assert_eq!(rec.needle_size, "70/10");

        let pants = infer("Pants", SizeSystem::AuKids, "6");
        assert_eq!(pants.fabric_quantity_m, 1.2);
    }

    #[test]
    fn test_dog_rules() {
        let coat = infer("Dog Coat", SizeSystem::Dogs, "M");
        assert_eq!(coat.fabric_type, "Polar Fleece");
        assert_eq!(coat.fabric_quantity_m, 0.5);
        assert_eq!(coat.seam_allowance_mm, 8);
        assert_eq!(coat.needle_size, "70/10");
        assert_eq!(coat.difficulty, Difficulty::Advanced);

        let bandana = infer("Dog Bandana", SizeSystem::Dogs, "S");
        assert_eq!(bandana.fabric_type, "Cotton Quilting");
        assert_eq!(bandana.fabric_quantity_m, 0.3);
        assert_eq!(
            bandana.notions,
            vec!["Matching thread", "1× Snap button or velcro strip"]
        );
    }

    #[test]
    fn test_knit_tank() {
        let rec = infer("Tank Top", SizeSystem::AuMen, "L");
        assert_eq!(rec.fabric_type, "Cotton Jersey");
        assert_eq!(rec.fabric_quantity_m, 1.0);
        assert_eq!(rec.needle_type, "Ballpoint / Jersey");
        assert_eq!(rec.tension_range, "3–4");
        assert_eq!(rec.stitch_types, vec!["Stretch stitch", "Zigzag", "Twin needle hem"]);
    }

    #[test]
    fn test_notions_append_in_rule_order() {
        // pants and skirt share a single zipper rule
        let rec = infer("Pants Skirt", SizeSystem::AuWomen, "10");
        assert_eq!(
            rec.notions,
            vec!["Matching thread", "1× Zipper (20cm)"]
        );

        let combo = infer("Hoodie Dress", SizeSystem::AuWomen, "10");
        assert_eq!(combo.notions.first().map(String::as_str), Some("Matching thread"));
        assert!(combo.notions.contains(&"1× Drawcord (120cm)".to_string()));
        assert!(combo.notions.contains(&"1× Invisible zipper (55cm)".to_string()));
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(1.5 * 0.6), 0.9);
        assert_eq!(round_to_tenth(2.8), 2.8);
        assert_eq!(round_to_tenth(1.2 * 0.6), 0.7);
    }
}
