//! PDF read-back.
//!
//! Parses emitted bytes and recovers rectangle geometry and text in page
//! millimetres. Used to check the calibration square survives
//! serialization at its true physical size.

use lopdf::content::Content;
use lopdf::Document;

use super::fonts::decode_win_ansi;
use super::render::RenderError;
use crate::print::{pt_to_mm, CALIBRATION_MM, PAGE_H};
use crate::templates::RectMm;

/// Tolerance when matching recovered geometry, in millimetres.
pub const GEOMETRY_TOLERANCE_MM: f32 = 0.01;

#[derive(Debug, Clone, Default)]
pub struct InspectedPage {
    pub rects: Vec<RectMm>,
    pub texts: Vec<String>,
}

impl InspectedPage {
    /// Rectangles whose sides both measure `CALIBRATION_MM` within tolerance.
    pub fn calibration_squares(&self) -> Vec<RectMm> {
        self.rects
            .iter()
            .filter(|r| {
                (r.w - CALIBRATION_MM).abs() <= GEOMETRY_TOLERANCE_MM
                    && (r.h - CALIBRATION_MM).abs() <= GEOMETRY_TOLERANCE_MM
            })
            .copied()
            .collect()
    }
}

/// Parse every page of `bytes`.
pub fn inspect_pdf(bytes: &[u8]) -> Result<Vec<InspectedPage>, RenderError> {
    let doc = Document::load_mem(bytes)?;
    let mut pages = Vec::new();

    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id)?)?;
        let mut page = InspectedPage::default();

        for operation in &content.operations {
            match operation.operator.as_str() {
                "re" => {
                    let vals = operation
                        .operands
                        .iter()
                        .map(|o| o.as_float())
                        .collect::<Result<Vec<f32>, _>>()?;
                    if let [x, y, w, h] = vals[..] {
                        let (w_mm, h_mm) = (pt_to_mm(w), pt_to_mm(h));
                        page.rects.push(RectMm::new(
                            pt_to_mm(x),
                            PAGE_H - pt_to_mm(y) - h_mm,
                            w_mm,
                            h_mm,
                        ));
                    }
                }
                "Tj" => {
                    if let Some(text) = operation.operands.first() {
                        page.texts.push(decode_win_ansi(text.as_str()?));
                    }
                }
                _ => {}
            }
        }
        pages.push(page);
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::canvas::{Align, Canvas, Paint};
    use crate::document::render::render_pdf;

    #[test]
    fn test_recovers_rect_and_text() {
        let mut canvas = Canvas::new();
        canvas.rect(RectMm::new(140.0, 224.0, 50.0, 50.0), Paint::Stroke);
        canvas.text("5 cm", 165.0, 279.0, Align::Center);
        canvas.add_page();
        canvas.rect(RectMm::new(20.0, 40.0, 170.0, 170.0), Paint::Stroke);

        let bytes = render_pdf(&canvas, "inspect").unwrap();
        let pages = inspect_pdf(&bytes).unwrap();
        assert_eq!(pages.len(), 2);

        let squares = pages[0].calibration_squares();
        assert_eq!(squares.len(), 1);
        assert!((squares[0].x - 140.0).abs() < GEOMETRY_TOLERANCE_MM);
        assert!((squares[0].y - 224.0).abs() < GEOMETRY_TOLERANCE_MM);
        assert_eq!(pages[0].texts, vec!["5 cm"]);

        assert!(pages[1].calibration_squares().is_empty());
        assert!((pages[1].rects[0].w - 170.0).abs() < GEOMETRY_TOLERANCE_MM);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(inspect_pdf(b"not a pdf").is_err());
    }
}
