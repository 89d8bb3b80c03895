//! Recording Canvas
//!
//! A page-oriented drawing surface in millimetres with a top-left origin.
//! Drawing calls are recorded as [`Mark`]s with their style resolved, so
//! layouts can be inspected in tests before anything is serialized.

use serde::Serialize;

use super::fonts::{text_width_mm, wrap_text, FontWeight};
use crate::print::{palette, Rgb};
use crate::templates::RectMm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Paint {
    Stroke,
    Fill,
    FillStroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub stroke: Rgb,
    pub fill: Rgb,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Mark {
    Rect {
        rect: RectMm,
        paint: Paint,
        style: Style,
    },
    RoundedRect {
        rect: RectMm,
        radius: f32,
        paint: Paint,
        style: Style,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        paint: Paint,
        style: Style,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        style: Style,
    },
    /// `x`/`y` is the baseline origin after alignment.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        angle: f32,
    },
}

/// Tagged areas of a page, recorded by layouts for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    Step(usize),
    Diagram(usize),
    CalibrationSquare,
    PatternOutline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub rect: RectMm,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    /// Footer label, set once the footer is drawn.
    pub label: Option<String>,
    pub marks: Vec<Mark>,
    pub regions: Vec<Region>,
}

impl Page {
    pub fn regions_of(&self, kind: RegionKind) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pages: Vec<Page>,
    stroke: Rgb,
    fill: Rgb,
    text_color: Rgb,
    line_width: f32,
    font_size: f32,
    weight: FontWeight,
}

impl Canvas {
    /// New canvas holding one blank page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            stroke: palette::DARK,
            fill: palette::WHITE,
            text_color: palette::DARK,
            line_width: 0.2,
            font_size: 10.0,
            weight: FontWeight::Normal,
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn current(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn style(&self) -> Style {
        Style {
            stroke: self.stroke,
            fill: self.fill,
            line_width: self.line_width,
        }
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    pub fn set_line_width(&mut self, width_mm: f32) {
        self.line_width = width_mm;
    }

    pub fn set_font(&mut self, size_pt: f32, weight: FontWeight) {
        self.font_size = size_pt;
        self.weight = weight;
    }

    pub fn set_font_size(&mut self, size_pt: f32) {
        self.font_size = size_pt;
    }

    pub fn rect(&mut self, rect: RectMm, paint: Paint) {
        let style = self.style();
        self.current().marks.push(Mark::Rect { rect, paint, style });
    }

    pub fn rounded_rect(&mut self, rect: RectMm, radius: f32, paint: Paint) {
        let style = self.style();
        self.current().marks.push(Mark::RoundedRect {
            rect,
            radius,
            paint,
            style,
        });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, paint: Paint) {
        let style = self.style();
        self.current().marks.push(Mark::Circle {
            cx,
            cy,
            r,
            paint,
            style,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let style = self.style();
        self.current().marks.push(Mark::Line {
            from: (x1, y1),
            to: (x2, y2),
            style,
        });
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let width = self.text_width(text);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push_text(text, x, y, 0.0);
    }

    /// Text rotated counter-clockwise by `angle` degrees about its origin.
    pub fn text_rotated(&mut self, text: &str, x: f32, y: f32, angle: f32) {
        self.push_text(text, x, y, angle);
    }

    /// Draw pre-wrapped lines starting at baseline `y`, `leading` apart.
    pub fn text_lines(&mut self, lines: &[String], x: f32, y: f32, leading: f32) {
        for (i, line) in lines.iter().enumerate() {
            self.push_text(line, x, y + i as f32 * leading, 0.0);
        }
    }

    fn push_text(&mut self, text: &str, x: f32, y: f32, angle: f32) {
        let mark = Mark::Text {
            text: text.to_string(),
            x,
            y,
            size: self.font_size,
            weight: self.weight,
            color: self.text_color,
            angle,
        };
        self.current().marks.push(mark);
    }

    /// Width of `text` at the current font.
    pub fn text_width(&self, text: &str) -> f32 {
        text_width_mm(text, self.font_size, self.weight)
    }

    /// Wrap `text` to `max_width` at the current font.
    pub fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        wrap_text(text, max_width, self.font_size, self.weight)
    }

    pub fn mark_region(&mut self, kind: RegionKind, rect: RectMm) {
        self.current().regions.push(Region { kind, rect });
    }

    pub fn set_page_label(&mut self, label: &str) {
        self.current().label = Some(label.to_string());
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_go_to_current_page() {
        let mut canvas = Canvas::new();
        canvas.line(0.0, 0.0, 10.0, 10.0);
        canvas.add_page();
        canvas.rect(RectMm::new(1.0, 2.0, 3.0, 4.0), Paint::Stroke);
        canvas.rect(RectMm::new(1.0, 2.0, 3.0, 4.0), Paint::Fill);

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.pages()[0].marks.len(), 1);
        assert_eq!(canvas.pages()[1].marks.len(), 2);
    }

    #[test]
    fn test_style_captured_at_draw_time() {
        let mut canvas = Canvas::new();
        canvas.set_line_width(0.5);
        canvas.line(0.0, 0.0, 1.0, 0.0);
        canvas.set_line_width(0.1);

        match &canvas.pages()[0].marks[0] {
            Mark::Line { style, .. } => assert_eq!(style.line_width, 0.5),
            other => panic!("unexpected mark {:?}", other),
        }
    }

    #[test]
    fn test_center_alignment() {
        let mut canvas = Canvas::new();
        canvas.set_font(12.0, FontWeight::Bold);
        let width = canvas.text_width("Dress");
        canvas.text("Dress", 105.0, 80.0, Align::Center);

        match &canvas.pages()[0].marks[0] {
            Mark::Text { x, .. } => assert!((x - (105.0 - width / 2.0)).abs() < 1e-4),
            other => panic!("unexpected mark {:?}", other),
        }
    }
}
