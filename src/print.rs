//! Print Geometry
//!
//! Physical page constants shared by every document. All layout happens in
//! millimetres; conversion to PDF points happens only at render time.

use serde::{Deserialize, Serialize};

pub const PAGE_W: f32 = 210.0;
pub const PAGE_H: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_W: f32 = PAGE_W - MARGIN * 2.0;

/// Lowest y a block may reach before the page must break.
pub const CONTENT_BOTTOM: f32 = PAGE_H - 30.0;
/// Baseline of the running footer.
pub const FOOTER_Y: f32 = PAGE_H - 12.0;

/// Edge length of the calibration square. Measured by the end user with a
/// ruler to confirm the print ran at 100%.
pub const CALIBRATION_MM: f32 = 50.0;
/// Tick spacing along each calibration edge.
pub const CALIBRATION_TICK_SPACING_MM: f32 = 10.0;
pub const CALIBRATION_TICK_LEN_MM: f32 = 2.0;

const POINTS_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// Page size in points, as written to the media box.
pub fn page_size_pt() -> (f32, f32) {
    (mm_to_pt(PAGE_W), mm_to_pt(PAGE_H))
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to the 0..1 range PDF colour operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

pub mod palette {
    use super::Rgb;

    pub const LAVENDER: Rgb = Rgb(178, 160, 210);
    pub const ROSE: Rgb = Rgb(210, 130, 155);
    pub const DARK: Rgb = Rgb(35, 35, 42);
    pub const GRAY: Rgb = Rgb(120, 120, 130);
    pub const INK: Rgb = Rgb(30, 30, 40);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUSH: Rgb = Rgb(250, 248, 252);
    pub const MIST: Rgb = Rgb(252, 250, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_pt_roundtrip() {
        let pt = mm_to_pt(CALIBRATION_MM);
        assert!((pt - 141.732).abs() < 0.001);
        assert!((pt_to_mm(pt) - CALIBRATION_MM).abs() < 1e-4);
    }

    #[test]
    fn test_a4_points() {
        let (w, h) = page_size_pt();
        assert!((w - 595.28).abs() < 0.01);
        assert!((h - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_unit_colour() {
        assert_eq!(palette::WHITE.unit(), [1.0, 1.0, 1.0]);
    }
}
