//! Construction sequence for an inferred garment.

use serde::{Deserialize, Serialize};

use super::GarmentInference;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub step: String,
    pub detail: String,
}

impl InstructionStep {
    fn new(step: &str, detail: impl Into<String>) -> Self {
        Self {
            step: step.to_string(),
            detail: detail.into(),
        }
    }
}

const INTERFACED: [&str; 3] = ["dress", "blouse", "jacket"];
const CLOSED: [&str; 3] = ["dress", "skirt", "pants"];

/// Build the ordered construction steps for `inference`.
///
/// Fixed sequence: prepare, print, cut, [interfacing], main seams,
/// [closure], finish seams, hem, final press. Bracketed steps depend on
/// the garment label.
pub fn generate_instructions(inference: &GarmentInference) -> Vec<InstructionStep> {
    let gt = inference.garment_type.to_lowercase();
    let stitch = |index: usize| {
        inference
            .stitch_types
            .get(index)
            .map(String::as_str)
            .unwrap_or_default()
    };
    let hem_stitch = inference
        .stitch_types
        .last()
        .map(String::as_str)
        .unwrap_or_default();

    let mut steps = vec![
        InstructionStep::new(
            "Prepare your fabric",
            format!(
                "Pre-wash and press {}. Fold fabric with selvedges together, right sides facing.",
                inference.fabric_type
            ),
        ),
        InstructionStep::new(
            "Print and assemble pattern",
            "Print all pages at 100% scale. Verify the 5cm calibration square. \
             Tape pages together matching labels (1A→1B, etc).",
        ),
        InstructionStep::new(
            "Cut pattern pieces",
            format!(
                "Pin pattern to fabric, aligning grainline arrows with selvedge. Cut with {}mm \
                 seam allowance included. Transfer all notch marks.",
                inference.seam_allowance_mm
            ),
        ),
    ];

    if INTERFACED.iter().any(|k| gt.contains(k)) {
        steps.push(InstructionStep::new(
            "Apply interfacing",
            format!(
                "{}. Fuse with iron on medium heat, pressing for 10–15 seconds per section.",
                inference.interfacing
            ),
        ));
    }

    steps.push(InstructionStep::new(
        "Sew main seams",
        format!(
            "Using {} at tension {}, join main body pieces. Match notches for alignment. \
             Use {} needle ({}).",
            stitch(0),
            inference.tension_range,
            inference.needle_type,
            inference.needle_size
        ),
    ));

    if CLOSED.iter().any(|k| gt.contains(k)) {
        steps.push(InstructionStep::new(
            "Insert closure",
            "Install zipper using a zipper foot. For invisible zippers, sew close to the \
             coil with teeth unfolded.",
        ));
    }

    steps.push(InstructionStep::new(
        "Finish seams",
        format!(
            "Finish raw edges with {} or serger. Press seams open or to one side as directed.",
            stitch(1)
        ),
    ));
    steps.push(InstructionStep::new(
        "Hem and final details",
        format!(
            "Fold and press hem. Stitch using {}. Attach any buttons, snaps, or hardware.",
            hem_stitch
        ),
    ));
    steps.push(InstructionStep::new(
        "Final pressing and fitting",
        "Give the finished garment a thorough press. Try on and make any final adjustments to fit.",
    ));

    steps
}
