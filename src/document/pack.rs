//! Pattern Pack Layout
//!
//! Title page, materials page, instruction pages and the four pattern
//! template pages, in that order.

use super::canvas::{Align, Canvas, Paint, RegionKind};
use super::fonts::FontWeight;
use super::furniture::{border, calibration_square, footer};
use crate::catalog::SizeSystem;
use crate::inference::{GarmentInference, InstructionStep};
use crate::print::{palette, CONTENT_BOTTOM, CONTENT_W, MARGIN, PAGE_W};
use crate::templates::{
    notch_positions, PatternTemplate, RectMm, ANNOTATION_Y, ARROWHEAD_LEN, ARROWHEAD_SPREAD,
    CALIBRATION_SQUARE, GRAINLINE_BOTTOM, GRAINLINE_TOP, GRAINLINE_X, NOTCH_LEN, OUTLINE,
    PATTERN_TEMPLATES,
};

/// Everything the pattern pack is composed from.
#[derive(Debug, Clone, Copy)]
pub struct PackSpec<'a> {
    pub garment_type: &'a str,
    pub size_system: SizeSystem,
    pub size: &'a str,
    pub recommendations: &'a GarmentInference,
    pub instructions: &'a [InstructionStep],
}

/// Top of content on continuation pages.
pub const PAGE_TOP: f32 = 35.0;
/// Minimum vertical room reserved for a step before it may start on a page.
pub const STEP_FOOTPRINT_MM: f32 = 50.0;

const STEP_TITLE_ROW: f32 = 8.0;
const DETAIL_LEADING: f32 = 4.5;
const DETAIL_INDENT: f32 = 14.0;
const DIAGRAM_GAP: f32 = 2.0;
const DIAGRAM_W: f32 = 50.0;
const DIAGRAM_H: f32 = 25.0;
/// Gap between the bottom of a diagram and the next step's marker row.
const STEP_SPACING: f32 = 8.0;

/// Vertical space a step occupies given its wrapped detail line count.
pub fn step_height(detail_lines: usize) -> f32 {
    STEP_TITLE_ROW + detail_lines as f32 * DETAIL_LEADING + DIAGRAM_GAP + DIAGRAM_H + STEP_SPACING
}

/// Most detail lines a single step may carry and still fit a fresh page.
pub fn max_detail_lines() -> usize {
    let room = CONTENT_BOTTOM - PAGE_TOP - STEP_TITLE_ROW - DIAGRAM_GAP - DIAGRAM_H - STEP_SPACING;
    (room / DETAIL_LEADING).floor() as usize
}

fn section_heading(canvas: &mut Canvas, title: &str, rule_len: f32, y: &mut f32) {
    canvas.set_text_color(palette::DARK);
    canvas.set_font(22.0, FontWeight::Bold);
    canvas.text(title, MARGIN, *y, Align::Left);
    *y += 12.0;
    canvas.set_draw_color(palette::LAVENDER);
    canvas.set_line_width(0.4);
    canvas.line(MARGIN, *y, MARGIN + rule_len, *y);
}

pub fn layout_pack(spec: &PackSpec<'_>, studio: &str) -> Canvas {
    let mut canvas = Canvas::new();
    title_page(&mut canvas, spec, studio);

    canvas.add_page();
    materials_page(&mut canvas, spec, studio);

    canvas.add_page();
    instruction_pages(&mut canvas, spec, studio);

    for template in &PATTERN_TEMPLATES {
        canvas.add_page();
        pattern_page(&mut canvas, template, spec, studio);
    }

    canvas
}

fn title_page(canvas: &mut Canvas, spec: &PackSpec<'_>, studio: &str) {
    let center = PAGE_W / 2.0;
    border(canvas);

    canvas.set_text_color(palette::DARK);
    canvas.set_font(10.0, FontWeight::Normal);
    canvas.text(&studio.to_uppercase(), center, 50.0, Align::Center);

    canvas.set_font(36.0, FontWeight::Bold);
    canvas.text(spec.garment_type, center, 80.0, Align::Center);

    canvas.set_font(14.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    let size_label = format!("Size {} · {}", spec.size, spec.size_system.label());
    canvas.text(&size_label, center, 92.0, Align::Center);

    canvas.set_draw_color(palette::LAVENDER);
    canvas.set_line_width(0.3);
    canvas.set_fill_color(palette::BLUSH);
    canvas.rounded_rect(RectMm::new(55.0, 110.0, 100.0, 130.0), 4.0, Paint::FillStroke);
    canvas.set_font_size(10.0);
    canvas.set_text_color(palette::GRAY);
    canvas.text("[ Fashion Sketch ]", center, 178.0, Align::Center);

    canvas.set_text_color(palette::ROSE);
    canvas.set_font_size(9.0);
    let difficulty = format!("Difficulty: {}", spec.recommendations.difficulty);
    canvas.text(&difficulty, center, 255.0, Align::Center);

    footer(canvas, "Title", studio, spec.garment_type);
}

/// Break to a fresh bordered page when `needed` more millimetres won't fit.
fn ensure_room(canvas: &mut Canvas, y: &mut f32, needed: f32, label: &str, studio: &str, title: &str) {
    if *y + needed > CONTENT_BOTTOM && *y > PAGE_TOP {
        footer(canvas, label, studio, title);
        canvas.add_page();
        border(canvas);
        *y = PAGE_TOP;
    }
}

fn materials_page(canvas: &mut Canvas, spec: &PackSpec<'_>, studio: &str) {
    let rec = spec.recommendations;
    let title = spec.garment_type;
    border(canvas);

    let mut y = PAGE_TOP;
    section_heading(canvas, "Materials & Supplies", 60.0, &mut y);
    y += 10.0;

    let mut items = vec![
        ("Primary Fabric", format!("{} — {}m", rec.fabric_type, rec.fabric_quantity_m)),
        ("Thread", rec.thread.clone()),
        ("Needle", format!("{} ({})", rec.needle_type, rec.needle_size)),
        ("Interfacing", rec.interfacing.clone()),
    ];
    items.extend(rec.notions.iter().map(|n| ("Notion", n.clone())));

    for (label, value) in &items {
        ensure_room(canvas, &mut y, 14.0, "Materials", studio, title);
        canvas.set_font(8.0, FontWeight::Normal);
        canvas.set_text_color(palette::ROSE);
        canvas.text(&label.to_uppercase(), MARGIN, y, Align::Left);
        canvas.set_text_color(palette::DARK);
        canvas.set_font_size(10.0);
        canvas.text(value, MARGIN, y + 5.0, Align::Left);
        y += 14.0;
    }

    y += 10.0;
    ensure_room(canvas, &mut y, 5.0 + 6.0 * rec.stitch_types.len() as f32, "Materials", studio, title);
    canvas.set_font(8.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    canvas.text("STITCH TYPES", MARGIN, y, Align::Left);
    y += 5.0;
    canvas.set_font_size(10.0);
    canvas.set_text_color(palette::DARK);
    for stitch in &rec.stitch_types {
        canvas.text(&format!("• {}", stitch), MARGIN + 2.0, y, Align::Left);
        y += 6.0;
    }

    y += 6.0;
    ensure_room(canvas, &mut y, 10.0, "Materials", studio, title);
    canvas.set_font_size(8.0);
    canvas.set_text_color(palette::GRAY);
    canvas.text("TENSION", MARGIN, y, Align::Left);
    y += 5.0;
    canvas.set_font_size(10.0);
    canvas.set_text_color(palette::DARK);
    canvas.text(&rec.tension_range, MARGIN, y, Align::Left);

    footer(canvas, "Materials", studio, title);
}

/// Greedy pagination: a step starts on a new page whenever its footprint
/// would cross the content bottom. Steps are never split.
fn instruction_pages(canvas: &mut Canvas, spec: &PackSpec<'_>, studio: &str) {
    let title = spec.garment_type;
    border(canvas);

    let mut y = PAGE_TOP;
    section_heading(canvas, "Construction Instructions", 80.0, &mut y);
    y += 12.0;

    let text_x = MARGIN + DETAIL_INDENT;
    for (i, inst) in spec.instructions.iter().enumerate() {
        canvas.set_font(9.0, FontWeight::Normal);
        let mut lines = canvas.split_text_to_size(&inst.detail, CONTENT_W - DETAIL_INDENT);
        if lines.len() > max_detail_lines() {
            tracing::warn!(
                step = i + 1,
                lines = lines.len(),
                kept = max_detail_lines(),
                "instruction detail truncated to fit one page"
            );
            lines.truncate(max_detail_lines());
        }
        let height = step_height(lines.len());

        if y + height.max(STEP_FOOTPRINT_MM) > CONTENT_BOTTOM && y > PAGE_TOP {
            footer(canvas, "Instructions", studio, title);
            canvas.add_page();
            border(canvas);
            y = PAGE_TOP;
        }
        let top = y;

        canvas.set_fill_color(palette::LAVENDER);
        canvas.circle(MARGIN + 5.0, y + 1.0, 4.0, Paint::Fill);
        canvas.set_font(9.0, FontWeight::Bold);
        canvas.set_text_color(palette::WHITE);
        canvas.text(&(i + 1).to_string(), MARGIN + 5.0, y + 2.0, Align::Center);

        canvas.set_text_color(palette::DARK);
        canvas.set_font(11.0, FontWeight::Bold);
        canvas.text(&inst.step, text_x, y + 2.0, Align::Left);
        y += STEP_TITLE_ROW;

        canvas.set_font(9.0, FontWeight::Normal);
        canvas.set_text_color(palette::GRAY);
        canvas.text_lines(&lines, text_x, y, DETAIL_LEADING);
        y += lines.len() as f32 * DETAIL_LEADING;

        let diagram = RectMm::new(text_x, y + DIAGRAM_GAP, DIAGRAM_W, DIAGRAM_H);
        canvas.set_draw_color(palette::LAVENDER);
        canvas.set_line_width(0.2);
        canvas.set_fill_color(palette::MIST);
        canvas.rounded_rect(diagram, 2.0, Paint::FillStroke);
        canvas.set_font_size(7.0);
        canvas.set_text_color(palette::GRAY);
        canvas.text(
            "[ Diagram ]",
            text_x + DIAGRAM_W / 2.0,
            diagram.y + DIAGRAM_H / 2.0 + 1.0,
            Align::Center,
        );
        canvas.mark_region(RegionKind::Diagram(i), diagram);

        // marker circle reaches 3mm above the step origin
        let block_top = top - 3.0;
        canvas.mark_region(
            RegionKind::Step(i),
            RectMm::new(MARGIN, block_top, CONTENT_W, diagram.bottom() - block_top),
        );
        y = top + height;
    }

    footer(canvas, "Instructions", studio, title);
}

fn pattern_page(canvas: &mut Canvas, template: &PatternTemplate, spec: &PackSpec<'_>, studio: &str) {
    canvas.set_font(28.0, FontWeight::Bold);
    canvas.set_text_color(palette::LAVENDER);
    canvas.text(template.label, MARGIN, 30.0, Align::Left);

    canvas.set_font(12.0, FontWeight::Normal);
    canvas.set_text_color(palette::DARK);
    canvas.text(template.piece, MARGIN + 30.0, 28.0, Align::Left);

    canvas.set_draw_color(palette::INK);
    canvas.set_line_width(0.5);
    canvas.set_fill_color(palette::WHITE);
    canvas.rect(OUTLINE, Paint::Stroke);
    canvas.mark_region(RegionKind::PatternOutline, OUTLINE);

    let gx = GRAINLINE_X;
    canvas.set_draw_color(palette::DARK);
    canvas.set_line_width(0.4);
    canvas.line(gx, GRAINLINE_TOP, gx, GRAINLINE_BOTTOM);
    canvas.line(gx - ARROWHEAD_SPREAD, GRAINLINE_TOP + ARROWHEAD_LEN, gx, GRAINLINE_TOP);
    canvas.line(gx + ARROWHEAD_SPREAD, GRAINLINE_TOP + ARROWHEAD_LEN, gx, GRAINLINE_TOP);
    canvas.set_font(7.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    let grain_mid = (GRAINLINE_TOP + GRAINLINE_BOTTOM) / 2.0;
    canvas.text_rotated("GRAINLINE", gx + 4.0, grain_mid, 90.0);

    canvas.set_line_width(0.3);
    canvas.set_draw_color(palette::DARK);
    for ny in notch_positions() {
        canvas.line(OUTLINE.x, ny, OUTLINE.x + NOTCH_LEN, ny);
        canvas.line(OUTLINE.right() - NOTCH_LEN, ny, OUTLINE.right(), ny);
    }

    canvas.set_font(7.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    let allowance = format!(
        "Seam allowance: {}mm (included)",
        spec.recommendations.seam_allowance_mm
    );
    canvas.text(&allowance, MARGIN, ANNOTATION_Y, Align::Left);
    canvas.text(&format!("Size: {}", spec.size), MARGIN + 80.0, ANNOTATION_Y, Align::Left);

    calibration_square(canvas, (CALIBRATION_SQUARE.x, CALIBRATION_SQUARE.y));

    footer(canvas, template.label, studio, spec.garment_type);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::canvas::Mark;
    use crate::inference::{generate_instructions, infer};

    fn layout(garment: &str, system: SizeSystem, size: &str) -> Canvas {
        let rec = infer(garment, system, size);
        let steps = generate_instructions(&rec);
        let spec = PackSpec {
            garment_type: garment,
            size_system: system,
            size,
            recommendations: &rec,
            instructions: &steps,
        };
        layout_pack(&spec, "Signature Sewing Studio")
    }

    fn labels(canvas: &Canvas) -> Vec<String> {
        canvas
            .pages()
            .iter()
            .map(|p| p.label.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_page_sequence() {
        let canvas = layout("Dress", SizeSystem::AuWomen, "12");
        let labels = labels(&canvas);
        assert_eq!(labels[0], "Title");
        assert_eq!(labels[1], "Materials");
        assert!(labels[2..labels.len() - 4].iter().all(|l| l == "Instructions"));
        assert_eq!(&labels[labels.len() - 4..], &["1A", "1B", "2A", "2B"]);
    }

    #[test]
    fn test_every_page_has_footer_number() {
        let canvas = layout("Jacket", SizeSystem::AuMen, "L");
        for (i, page) in canvas.pages().iter().enumerate() {
            let expected = format!("Page {}", i + 1);
            assert!(page.texts().any(|t| t == expected), "missing {}", expected);
            assert!(page.label.is_some());
        }
    }

    #[test]
    fn test_title_page_content() {
        let canvas = layout("Dog Coat", SizeSystem::Dogs, "M");
        let title: Vec<_> = canvas.pages()[0].texts().collect();
        assert!(title.contains(&"SIGNATURE SEWING STUDIO"));
        assert!(title.contains(&"Dog Coat"));
        assert!(title.contains(&"Size M · Dogs"));
        assert!(title.contains(&"[ Fashion Sketch ]"));
        assert!(title.contains(&"Difficulty: Advanced"));
    }

    #[test]
    fn test_materials_page_lists_record() {
        let canvas = layout("Hoodie", SizeSystem::AuMen, "M");
        let texts: Vec<_> = canvas.pages()[1].texts().collect();
        assert!(texts.contains(&"Wool Blend Suiting — 2.8m"));
        assert!(texts.contains(&"Ballpoint / Jersey (80/12)"));
        assert!(texts.contains(&"• Blind hem"));
        assert!(texts.contains(&"3–4"));
        assert_eq!(texts.iter().filter(|t| **t == "NOTION").count(), 5);
    }

    #[test]
    fn test_nine_steps_paginate_without_split() {
        let canvas = layout("Dress", SizeSystem::AuWomen, "12");
        let mut seen = Vec::new();
        for page in canvas.pages() {
            for region in &page.regions {
                if let RegionKind::Step(i) = region.kind {
                    assert!(region.rect.bottom() <= CONTENT_BOTTOM);
                    let diagram = page.regions_of(RegionKind::Diagram(i)).next();
                    assert!(diagram.is_some(), "diagram for step {} not on its page", i);
                    seen.push(i);
                }
            }
        }
        assert_eq!(seen, (0..9).collect::<Vec<_>>());
        assert!(labels(&canvas).iter().filter(|l| *l == "Instructions").count() >= 2);
    }

    #[test]
    fn test_oversized_step_is_clamped_to_one_page() {
        let rec = infer("Dress", SizeSystem::AuWomen, "12");
        let instructions = vec![
            InstructionStep {
                step: "Hand-finish the lining".to_string(),
                detail: "slipstitch the lining to the seam allowance ".repeat(300),
            },
            InstructionStep {
                step: "Press".to_string(),
                detail: "Press from the wrong side.".to_string(),
            },
        ];
        let spec = PackSpec {
            garment_type: "Dress",
            size_system: SizeSystem::AuWomen,
            size: "12",
            recommendations: &rec,
            instructions: &instructions,
        };
        let canvas = layout_pack(&spec, "Signature Sewing Studio");

        for i in 0..instructions.len() {
            let holding: Vec<_> = canvas
                .pages()
                .iter()
                .filter(|p| p.regions_of(RegionKind::Step(i)).next().is_some())
                .collect();
            assert_eq!(holding.len(), 1, "step {} split or missing", i);

            let block = holding[0].regions_of(RegionKind::Step(i)).next().unwrap().rect;
            let diagram = holding[0].regions_of(RegionKind::Diagram(i)).next().unwrap().rect;
            assert!(block.bottom() <= CONTENT_BOTTOM, "step {} runs off the page", i);
            assert!(diagram.bottom() <= CONTENT_BOTTOM);
        }

        let kept = canvas
            .pages()
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.contains("slipstitch"))
            .count();
        assert_eq!(kept, max_detail_lines());
    }

    #[test]
    fn test_pattern_page_markings() {
        let canvas = layout("Skirt", SizeSystem::AuWomen, "8");
        let page = canvas.pages().last().unwrap();
        let texts: Vec<_> = page.texts().collect();
        assert!(texts.contains(&"2B"));
        assert!(texts.contains(&"Collar / Facing"));
        assert!(texts.contains(&"GRAINLINE"));
        assert!(texts.contains(&"Seam allowance: 15mm (included)"));
        assert!(texts.contains(&"Size: 8"));

        let square = page.regions_of(RegionKind::CalibrationSquare).next().unwrap();
        assert_eq!(square.rect, CALIBRATION_SQUARE);

        let rotated = page
            .marks
            .iter()
            .filter(|m| matches!(m, Mark::Text { angle, .. } if *angle == 90.0))
            .count();
        assert_eq!(rotated, 2);
    }
}
