//! Print Guide Layout
//!
//! The simpler document path for the configurable-parameters workflow.
//! Paginates on accumulated vertical offset only; there are no diagram
//! regions and list items may continue on the next page.

use super::canvas::{Align, Canvas};
use super::fonts::FontWeight;
use super::furniture::{calibration_square, footer};
use crate::print::{palette, CALIBRATION_MM, CONTENT_BOTTOM, CONTENT_W, MARGIN, PAGE_W};
use crate::project::{PrintGuide, Project};

/// Top of content on continuation pages.
pub const CONTINUATION_TOP: f32 = 30.0;
pub const SETTINGS_ROW_MM: f32 = 7.0;
/// Offset of the value column in the settings table.
pub const SETTINGS_VALUE_X: f32 = MARGIN + 45.0;

const LIST_LEADING: f32 = 5.0;
const ITEM_GAP: f32 = 2.0;
const LIST_INDENT: f32 = 7.0;
const FOOTER_LABEL: &str = "Guide";

struct Cursor<'a> {
    y: f32,
    studio: &'a str,
    title: &'a str,
}

impl Cursor<'_> {
    /// New page when `needed` more millimetres won't fit.
    fn ensure_room(&mut self, canvas: &mut Canvas, needed: f32) {
        if self.y + needed > CONTENT_BOTTOM {
            footer(canvas, FOOTER_LABEL, self.studio, self.title);
            canvas.add_page();
            self.y = CONTINUATION_TOP;
        }
    }
}

pub fn layout_guide(project: &Project, guide: &PrintGuide, studio: &str) -> Canvas {
    let mut canvas = Canvas::new();
    let mut cur = Cursor {
        y: 25.0,
        studio,
        title: &project.title,
    };

    canvas.set_font(9.0, FontWeight::Bold);
    canvas.set_text_color(palette::ROSE);
    canvas.text(&studio.to_uppercase(), MARGIN, cur.y, Align::Left);
    cur.y += 12.0;

    canvas.set_font(22.0, FontWeight::Bold);
    canvas.set_text_color(palette::DARK);
    let title_lines = canvas.split_text_to_size(&project.title, CONTENT_W);
    canvas.text_lines(&title_lines, MARGIN, cur.y, 9.0);
    cur.y += title_lines.len() as f32 * 9.0 - 1.0;

    canvas.set_font(11.0, FontWeight::Normal);
    canvas.set_text_color(palette::GRAY);
    let subtitle = format!("{} · Size {}", project.garment_type, project.size);
    canvas.text(&subtitle, MARGIN, cur.y, Align::Left);
    cur.y += 5.0;

    canvas.set_draw_color(palette::LAVENDER);
    canvas.set_line_width(0.4);
    canvas.line(MARGIN, cur.y, PAGE_W - MARGIN, cur.y);
    cur.y += 10.0;

    settings_table(&mut canvas, guide, &mut cur);

    // caption sits 3mm above the square, the "5 cm" label 4.5mm below it
    cur.y += 8.0;
    cur.ensure_room(&mut canvas, CALIBRATION_MM + 8.0);
    calibration_square(&mut canvas, (MARGIN + 4.0, cur.y));
    cur.y += CALIBRATION_MM + 14.0;

    numbered_list(&mut canvas, "MATERIALS", &guide.materials, &mut cur);
    cur.y += 6.0;
    numbered_list(&mut canvas, "ASSEMBLY STEPS", &guide.steps, &mut cur);

    footer(&mut canvas, FOOTER_LABEL, studio, &project.title);
    canvas
}

fn section_title(canvas: &mut Canvas, title: &str, cur: &mut Cursor<'_>) {
    canvas.set_font(10.0, FontWeight::Bold);
    canvas.set_text_color(palette::LAVENDER);
    canvas.text(title, MARGIN, cur.y, Align::Left);
    cur.y += 7.0;
}

fn settings_table(canvas: &mut Canvas, guide: &PrintGuide, cur: &mut Cursor<'_>) {
    section_title(canvas, "PROJECT SETTINGS", cur);

    for (key, value) in guide.settings.iter() {
        canvas.set_font(9.0, FontWeight::Bold);
        let lines = canvas.split_text_to_size(value, PAGE_W - MARGIN - SETTINGS_VALUE_X);
        let extra = lines.len().saturating_sub(1) as f32 * 4.5;
        cur.ensure_room(canvas, SETTINGS_ROW_MM + extra);

        canvas.set_font(9.0, FontWeight::Normal);
        canvas.set_text_color(palette::GRAY);
        canvas.text(key, MARGIN, cur.y, Align::Left);

        canvas.set_font(9.0, FontWeight::Bold);
        canvas.set_text_color(palette::DARK);
        canvas.text_lines(&lines, SETTINGS_VALUE_X, cur.y, 4.5);
        cur.y += SETTINGS_ROW_MM + extra;
    }
}

fn numbered_list(canvas: &mut Canvas, title: &str, items: &[String], cur: &mut Cursor<'_>) {
    // keep the heading with the first line
    cur.ensure_room(canvas, 7.0 + LIST_LEADING);
    section_title(canvas, title, cur);

    for (i, item) in items.iter().enumerate() {
        canvas.set_font(10.0, FontWeight::Normal);
        let lines = canvas.split_text_to_size(item, CONTENT_W - LIST_INDENT);

        for (n, line) in lines.iter().enumerate() {
            cur.ensure_room(canvas, LIST_LEADING);
            canvas.set_font(10.0, FontWeight::Normal);
            canvas.set_text_color(palette::DARK);
            if n == 0 {
                canvas.set_text_color(palette::ROSE);
                canvas.text(&format!("{}.", i + 1), MARGIN, cur.y, Align::Left);
                canvas.set_text_color(palette::DARK);
            }
            canvas.text(line, MARGIN + LIST_INDENT, cur.y, Align::Left);
            cur.y += LIST_LEADING;
        }
        cur.y += ITEM_GAP;
    }
}
