//! Ordered Inference Rules
//!
//! Classification is not mutually exclusive: several rules can match the
//! same garment label. Rules run top to bottom against one accumulator, so
//! for scalar fields the last matching rule wins. Table order IS precedence.

use super::{Accumulator, Difficulty, Traits};

/// When a rule fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Knit,
    Outerwear,
    Small,
    /// Small sizing that is not animal sizing (kids).
    Child,
    /// Label contains any of the keywords (lowercase).
    Mentions(&'static [&'static str]),
    /// Animal sizing and the label contains the keyword.
    AnimalWith(&'static str),
    /// Animal sizing and the label does not contain the keyword.
    AnimalWithout(&'static str),
    /// Outerwear, or the label contains any of the keywords.
    OuterwearOr(&'static [&'static str]),
}

impl Condition {
    pub fn holds(&self, traits: &Traits) -> bool {
        match self {
            Self::Knit => traits.knit,
            Self::Outerwear => traits.outerwear,
            Self::Small => traits.small,
            Self::Child => traits.small && !traits.animal,
            Self::Mentions(keywords) => keywords.iter().any(|k| traits.mentions(k)),
            Self::AnimalWith(keyword) => traits.animal && traits.mentions(keyword),
            Self::AnimalWithout(keyword) => traits.animal && !traits.mentions(keyword),
            Self::OuterwearOr(keywords) => {
                traits.outerwear || keywords.iter().any(|k| traits.mentions(k))
            }
        }
    }
}

/// What a rule does to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Fabric(&'static str),
    BaseQuantity(f64),
    ScaleQuantity(f64),
    NeedleType(&'static str),
    NeedleSize(&'static str),
    Stitches(&'static [&'static str]),
    AppendStitch(&'static str),
    Tension(&'static str),
    Difficulty(Difficulty),
    Notions(&'static [&'static str]),
    Interfacing(&'static str),
}

impl Effect {
    pub fn apply(&self, acc: &mut Accumulator) {
        match *self {
            Self::Fabric(fabric) => acc.fabric_type = fabric,
            Self::BaseQuantity(metres) => acc.base_quantity_m = metres,
            Self::ScaleQuantity(factor) => acc.base_quantity_m *= factor,
            Self::NeedleType(needle) => acc.needle_type = needle,
            Self::NeedleSize(size) => acc.needle_size = size,
            Self::Stitches(stitches) => acc.stitch_types = stitches.to_vec(),
            Self::AppendStitch(stitch) => acc.stitch_types.push(stitch),
            Self::Tension(range) => acc.tension_range = range,
            Self::Difficulty(level) => acc.difficulty = level,
            Self::Notions(notions) => acc.notions.extend_from_slice(notions),
            Self::Interfacing(interfacing) => acc.interfacing = interfacing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub when: Condition,
    pub then: Effect,
}

const fn rule(name: &'static str, when: Condition, then: Effect) -> Rule {
    Rule { name, when, then }
}

use Condition::*;

pub static RULES: &[Rule] = &[
    // fabric
    rule("knit-fabric", Knit, Effect::Fabric("Cotton Jersey")),
    rule("outerwear-fabric", Outerwear, Effect::Fabric("Wool Blend Suiting")),
    rule("lawn-fabric", Mentions(&["dress", "blouse"]), Effect::Fabric("Cotton Lawn")),
    rule("twill-fabric", Mentions(&["skirt"]), Effect::Fabric("Cotton Twill")),
    rule("dog-bandana-fabric", AnimalWith("bandana"), Effect::Fabric("Cotton Quilting")),
    rule("dog-fabric", AnimalWithout("bandana"), Effect::Fabric("Polar Fleece")),
    // quantity
    rule("outerwear-quantity", Outerwear, Effect::BaseQuantity(2.8)),
    rule("long-quantity", Mentions(&["dress", "jumpsuit"]), Effect::BaseQuantity(2.5)),
    rule("pants-quantity", Mentions(&["pants", "trousers"]), Effect::BaseQuantity(2.0)),
    rule("short-quantity", Mentions(&["shorts", "skirt"]), Effect::BaseQuantity(1.2)),
    rule("top-quantity", Mentions(&["blouse", "t-shirt"]), Effect::BaseQuantity(1.5)),
    rule("tank-quantity", Mentions(&["tank"]), Effect::BaseQuantity(1.0)),
    rule("vest-quantity", Mentions(&["vest"]), Effect::BaseQuantity(1.2)),
    rule("dog-bandana-quantity", AnimalWith("bandana"), Effect::BaseQuantity(0.3)),
    rule("dog-quantity", AnimalWithout("bandana"), Effect::BaseQuantity(0.5)),
    rule("child-scale", Child, Effect::ScaleQuantity(0.6)),
    // needle
    rule("knit-needle", Knit, Effect::NeedleType("Ballpoint / Jersey")),
    rule("small-needle", Small, Effect::NeedleSize("70/10")),
    // stitches
    rule(
        "knit-stitches",
        Knit,
        Effect::Stitches(&["Stretch stitch", "Zigzag", "Twin needle hem"]),
    ),
    rule("outerwear-hem", Outerwear, Effect::AppendStitch("Blind hem")),
    // tension
    rule("knit-tension", Knit, Effect::Tension("3–4")),
    // difficulty
    rule(
        "fitted-difficulty",
        Mentions(&["dress", "pants"]),
        Effect::Difficulty(Difficulty::Intermediate),
    ),
    rule(
        "structured-difficulty",
        OuterwearOr(&["jumpsuit"]),
        Effect::Difficulty(Difficulty::Advanced),
    ),
    // notions
    rule("zipper", Mentions(&["pants", "skirt"]), Effect::Notions(&["1× Zipper (20cm)"])),
    rule(
        "invisible-zipper",
        Mentions(&["dress"]),
        Effect::Notions(&["1× Invisible zipper (55cm)"]),
    ),
    rule(
        "outerwear-notions",
        Outerwear,
        Effect::Notions(&["5× Buttons", "1× Shoulder pads (optional)"]),
    ),
    rule(
        "hoodie-notions",
        Mentions(&["hoodie"]),
        Effect::Notions(&["1× Drawcord (120cm)", "2× Cord stops"]),
    ),
    rule(
        "bandana-closure",
        AnimalWith("bandana"),
        Effect::Notions(&["1× Snap button or velcro strip"]),
    ),
    // interfacing
    rule(
        "outerwear-interfacing",
        Outerwear,
        Effect::Interfacing("Medium-weight fusible — collars, cuffs, front facing"),
    ),
    rule(
        "light-interfacing",
        Mentions(&["blouse", "dress"]),
        Effect::Interfacing("Lightweight fusible — collar and facing"),
    ),
];

/// Apply `rules` in order to a fresh accumulator.
pub fn apply_all(traits: &Traits, rules: &[Rule]) -> Accumulator {
    let mut acc = Accumulator::default();
    for rule in rules {
        if rule.when.holds(traits) {
            tracing::trace!(rule = rule.name, "rule matched");
            rule.then.apply(&mut acc);
        }
    }
    acc
}

/// Names of the rules that fire for `traits`, in application order.
pub fn matching_rules(traits: &Traits) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| rule.when.holds(traits))
        .map(|rule| rule.name)
        .collect()
}
