//! Page furniture shared by both document paths: borders, footers and the
//! calibration square.

use super::canvas::{Align, Canvas, Paint, RegionKind};
use super::fonts::FontWeight;
use crate::print::{
    palette, CALIBRATION_MM, CALIBRATION_TICK_LEN_MM, CALIBRATION_TICK_SPACING_MM, FOOTER_Y,
    MARGIN, PAGE_H, PAGE_W,
};
use crate::templates::RectMm;

/// Double lavender/rose frame used on the front-matter pages.
pub fn border(canvas: &mut Canvas) {
    canvas.set_draw_color(palette::LAVENDER);
    canvas.set_line_width(0.5);
    canvas.rect(RectMm::new(12.0, 12.0, PAGE_W - 24.0, PAGE_H - 24.0), Paint::Stroke);
    canvas.set_draw_color(palette::ROSE);
    canvas.set_line_width(0.3);
    canvas.rect(RectMm::new(13.0, 13.0, PAGE_W - 26.0, PAGE_H - 26.0), Paint::Stroke);
}

/// Running footer: page label, studio/title string and the page number.
pub fn footer(canvas: &mut Canvas, label: &str, studio: &str, title: &str) {
    canvas.set_font(7.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    canvas.text(label, MARGIN, FOOTER_Y, Align::Left);
    canvas.text(
        &format!("{} — {}", studio, title),
        PAGE_W / 2.0,
        FOOTER_Y,
        Align::Center,
    );
    let page = format!("Page {}", canvas.page_count());
    canvas.text(&page, PAGE_W - MARGIN, FOOTER_Y, Align::Right);
    canvas.set_page_label(label);
}

/// 50×50mm reference square with ticks every 10mm on each edge, a caption
/// above and "5 cm" dimension labels. `origin` is the square's top-left.
pub fn calibration_square(canvas: &mut Canvas, origin: (f32, f32)) -> RectMm {
    let square = RectMm::new(origin.0, origin.1, CALIBRATION_MM, CALIBRATION_MM);
    let (x, y) = origin;

    canvas.set_draw_color(palette::ROSE);
    canvas.set_line_width(0.5);
    canvas.rect(square, Paint::Stroke);

    canvas.set_line_width(0.2);
    let tick = CALIBRATION_TICK_LEN_MM;
    let mut offset = CALIBRATION_TICK_SPACING_MM;
    while offset < CALIBRATION_MM {
        canvas.line(x + offset, y, x + offset, y + tick);
        canvas.line(x + offset, y + CALIBRATION_MM - tick, x + offset, y + CALIBRATION_MM);
        canvas.line(x, y + offset, x + tick, y + offset);
        canvas.line(x + CALIBRATION_MM - tick, y + offset, x + CALIBRATION_MM, y + offset);
        offset += CALIBRATION_TICK_SPACING_MM;
    }

    canvas.set_font(7.0, FontWeight::Normal);
    canvas.set_text_color(palette::ROSE);
    canvas.text("CALIBRATION SQUARE — Print at 100%", x, y - 3.0, Align::Left);
    canvas.text("5 cm", x + CALIBRATION_MM / 2.0, y + CALIBRATION_MM + 4.5, Align::Center);
    canvas.text_rotated("5 cm", x - 3.0, y + CALIBRATION_MM / 2.0, 90.0);

    canvas.mark_region(RegionKind::CalibrationSquare, square);
    square
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::canvas::Mark;

    #[test]
    fn test_calibration_ticks() {
        let mut canvas = Canvas::new();
        let square = calibration_square(&mut canvas, (20.0, 100.0));
        assert_eq!(square.w, 50.0);

        let page = &canvas.pages()[0];
        let ticks = page
            .marks
            .iter()
            .filter(|m| matches!(m, Mark::Line { .. }))
            .count();
        // four ticks per edge at 10, 20, 30, 40mm
        assert_eq!(ticks, 16);
        assert_eq!(page.regions_of(RegionKind::CalibrationSquare).count(), 1);
    }

    #[test]
    fn test_footer_numbers_pages() {
        let mut canvas = Canvas::new();
        canvas.add_page();
        footer(&mut canvas, "Materials", "Signature Sewing Studio", "Dress");
        let page = &canvas.pages()[1];
        assert_eq!(page.label.as_deref(), Some("Materials"));
        assert!(page.texts().any(|t| t == "Page 2"));
        assert!(page.texts().any(|t| t == "Signature Sewing Studio — Dress"));
    }
}
