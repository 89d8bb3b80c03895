//! Pattern Piece Templates
//!
//! The fixed set of template pages appended to every pattern pack, with
//! the outline, grainline, notch and calibration geometry they share.

use serde::{Deserialize, Serialize};

use crate::print::{CALIBRATION_MM, CONTENT_W, MARGIN, PAGE_W};

/// One printable pattern-piece page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternTemplate {
    /// Tiling label, e.g. "1A". Printed large and used in the footer.
    pub label: &'static str,
    pub piece: &'static str,
}

pub const PATTERN_TEMPLATES: [PatternTemplate; 4] = [
    PatternTemplate { label: "1A", piece: "Front Bodice" },
    PatternTemplate { label: "1B", piece: "Back Bodice" },
    PatternTemplate { label: "2A", piece: "Sleeve" },
    PatternTemplate { label: "2B", piece: "Collar / Facing" },
];

/// Axis-aligned rectangle in millimetres, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectMm {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectMm {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Outline standing in for the drafted piece.
pub const OUTLINE: RectMm = RectMm::new(MARGIN, 40.0, CONTENT_W, 170.0);

pub const GRAINLINE_X: f32 = PAGE_W / 2.0;
/// Grainline stays 15mm clear of the outline's top and bottom edges.
pub const GRAINLINE_TOP: f32 = 55.0;
pub const GRAINLINE_BOTTOM: f32 = 195.0;
/// Arrowhead legs run back from the tip this far, spread sideways by the spread.
pub const ARROWHEAD_LEN: f32 = 5.0;
pub const ARROWHEAD_SPREAD: f32 = 3.0;

pub const NOTCH_LEN: f32 = 4.0;
pub const NOTCH_COUNT: usize = 4;

/// Notch heights, evenly dividing both vertical edges of the outline.
pub fn notch_positions() -> [f32; NOTCH_COUNT] {
    let step = OUTLINE.h / (NOTCH_COUNT as f32 + 1.0);
    let mut positions = [0.0; NOTCH_COUNT];
    for (i, y) in positions.iter_mut().enumerate() {
        *y = OUTLINE.y + step * (i as f32 + 1.0);
    }
    positions
}

/// Baseline of the seam-allowance / size annotation.
pub const ANNOTATION_Y: f32 = 218.0;

/// Calibration square on template pages: right-aligned to the margin and
/// fully above the footer.
pub const CALIBRATION_SQUARE: RectMm =
    RectMm::new(PAGE_W - MARGIN - CALIBRATION_MM, 224.0, CALIBRATION_MM, CALIBRATION_MM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notches_evenly_spaced() {
        assert_eq!(notch_positions(), [74.0, 108.0, 142.0, 176.0]);
    }

    #[test]
    fn test_calibration_square_is_50mm() {
        assert_eq!(CALIBRATION_SQUARE.w, 50.0);
        assert_eq!(CALIBRATION_SQUARE.h, 50.0);
        assert_eq!(CALIBRATION_SQUARE.right(), PAGE_W - MARGIN);
        assert!(CALIBRATION_SQUARE.bottom() < crate::print::FOOTER_Y);
    }

    #[test]
    fn test_four_templates() {
        let labels: Vec<_> = PATTERN_TEMPLATES.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["1A", "1B", "2A", "2B"]);
    }
}
