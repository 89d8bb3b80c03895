//! PDF Emission
//!
//! Serializes a recorded [`Canvas`] into PDF bytes. Geometry is converted
//! from millimetres (top-left origin) to points (bottom-left origin) here
//! and nowhere else.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use super::canvas::{Canvas, Mark, Paint, Page, Style};
use super::fonts::{encode_win_ansi, FontWeight};
use crate::print::{mm_to_pt, page_size_pt, Rgb, PAGE_H};
use crate::templates::RectMm;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cubic Bézier control distance for quarter circles.
const KAPPA: f32 = 0.552_284_8;

fn num(v: f32) -> Object {
    Object::from((v * 1000.0).round() / 1000.0)
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

/// Page x in points.
fn px(x_mm: f32) -> f32 {
    mm_to_pt(x_mm)
}

/// Page y in points, flipped to the PDF bottom-left origin.
fn py(y_mm: f32) -> f32 {
    mm_to_pt(PAGE_H - y_mm)
}

fn color_op(operator: &str, color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    op(operator, vec![num(r), num(g), num(b)])
}

fn style_ops(ops: &mut Vec<Operation>, style: &Style) {
    ops.push(op("w", vec![num(mm_to_pt(style.line_width))]));
    ops.push(color_op("RG", style.stroke));
    ops.push(color_op("rg", style.fill));
}

fn paint_op(paint: Paint) -> Operation {
    match paint {
        Paint::Stroke => op("S", vec![]),
        Paint::Fill => op("f", vec![]),
        Paint::FillStroke => op("B", vec![]),
    }
}

fn rect_ops(ops: &mut Vec<Operation>, rect: &RectMm) {
    ops.push(op(
        "re",
        vec![
            num(px(rect.x)),
            num(py(rect.bottom())),
            num(mm_to_pt(rect.w)),
            num(mm_to_pt(rect.h)),
        ],
    ));
}

fn curve(ops: &mut Vec<Operation>, c1: (f32, f32), c2: (f32, f32), end: (f32, f32)) {
    ops.push(op(
        "c",
        vec![
            num(px(c1.0)),
            num(py(c1.1)),
            num(px(c2.0)),
            num(py(c2.1)),
            num(px(end.0)),
            num(py(end.1)),
        ],
    ));
}

fn move_to(ops: &mut Vec<Operation>, x: f32, y: f32) {
    ops.push(op("m", vec![num(px(x)), num(py(y))]));
}

fn line_to(ops: &mut Vec<Operation>, x: f32, y: f32) {
    ops.push(op("l", vec![num(px(x)), num(py(y))]));
}

fn rounded_rect_ops(ops: &mut Vec<Operation>, rect: &RectMm, radius: f32) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());

    move_to(ops, x0 + r, y0);
    line_to(ops, x1 - r, y0);
    curve(ops, (x1 - r + k, y0), (x1, y0 + r - k), (x1, y0 + r));
    line_to(ops, x1, y1 - r);
    curve(ops, (x1, y1 - r + k), (x1 - r + k, y1), (x1 - r, y1));
    line_to(ops, x0 + r, y1);
    curve(ops, (x0 + r - k, y1), (x0, y1 - r + k), (x0, y1 - r));
    line_to(ops, x0, y0 + r);
    curve(ops, (x0, y0 + r - k), (x0 + r - k, y0), (x0 + r, y0));
    ops.push(op("h", vec![]));
}

fn circle_ops(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    move_to(ops, cx + r, cy);
    curve(ops, (cx + r, cy + k), (cx + k, cy + r), (cx, cy + r));
    curve(ops, (cx - k, cy + r), (cx - r, cy + k), (cx - r, cy));
    curve(ops, (cx - r, cy - k), (cx - k, cy - r), (cx, cy - r));
    curve(ops, (cx + k, cy - r), (cx + r, cy - k), (cx + r, cy));
    ops.push(op("h", vec![]));
}

fn text_ops(
    ops: &mut Vec<Operation>,
    text: &str,
    origin: (f32, f32),
    size: f32,
    weight: FontWeight,
    color: Rgb,
    angle: f32,
) {
    let (sin, cos) = angle.to_radians().sin_cos();
    ops.push(op("BT", vec![]));
    ops.push(op(
        "Tf",
        vec![Object::Name(weight.resource().as_bytes().to_vec()), num(size)],
    ));
    ops.push(color_op("rg", color));
    ops.push(op(
        "Tm",
        vec![
            num(cos),
            num(sin),
            num(-sin),
            num(cos),
            num(px(origin.0)),
            num(py(origin.1)),
        ],
    ));
    ops.push(op(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(op("ET", vec![]));
}

/// Content-stream operations for one page.
pub fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for mark in &page.marks {
        match mark {
            Mark::Rect { rect, paint, style } => {
                style_ops(&mut ops, style);
                rect_ops(&mut ops, rect);
                ops.push(paint_op(*paint));
            }
            Mark::RoundedRect {
                rect,
                radius,
                paint,
                style,
            } => {
                style_ops(&mut ops, style);
                rounded_rect_ops(&mut ops, rect, *radius);
                ops.push(paint_op(*paint));
            }
            Mark::Circle {
                cx,
                cy,
                r,
                paint,
                style,
            } => {
                style_ops(&mut ops, style);
                circle_ops(&mut ops, *cx, *cy, *r);
                ops.push(paint_op(*paint));
            }
            Mark::Line { from, to, style } => {
                style_ops(&mut ops, style);
                move_to(&mut ops, from.0, from.1);
                line_to(&mut ops, to.0, to.1);
                ops.push(op("S", vec![]));
            }
            Mark::Text {
                text,
                x,
                y,
                size,
                weight,
                color,
                angle,
            } => text_ops(&mut ops, text, (*x, *y), *size, *weight, *color, *angle),
        }
    }
    ops
}

fn font_object(doc: &mut Document, weight: FontWeight) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => weight.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Serialize `canvas` to PDF bytes. Output is byte-for-byte reproducible
/// for identical canvases: no timestamps or random identifiers are written.
pub fn render_pdf(canvas: &Canvas, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = font_object(&mut doc, FontWeight::Normal);
    let bold = font_object(&mut doc, FontWeight::Bold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontWeight::Normal.resource() => regular,
            FontWeight::Bold.resource() => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(canvas.page_count());
    for page in canvas.pages() {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let (width, height) = page_size_pt();
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => canvas.page_count() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![num(0.0), num(0.0), num(width), num(height)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("sewstudio-core ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::canvas::Align;

    #[test]
    fn test_rect_flips_origin() {
        let mut canvas = Canvas::new();
        canvas.rect(RectMm::new(0.0, 0.0, 25.4, 25.4), Paint::Stroke);
        let ops = page_operations(&canvas.pages()[0]);
        let re = ops.iter().find(|o| o.operator == "re").unwrap();
        let vals: Vec<f32> = re.operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(vals[0], 0.0);
        assert!((vals[1] - (mm_to_pt(PAGE_H) - 72.0)).abs() < 0.01);
        assert!((vals[2] - 72.0).abs() < 0.001);
        assert!((vals[3] - 72.0).abs() < 0.001);
    }

    #[test]
    fn test_render_is_reproducible() {
        let mut canvas = Canvas::new();
        canvas.text("Materials & Supplies", 20.0, 35.0, Align::Left);
        canvas.circle(25.0, 60.0, 4.0, Paint::Fill);
        let a = render_pdf(&canvas, "Test").unwrap();
        let b = render_pdf(&canvas, "Test").unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_rotated_text_matrix() {
        let mut canvas = Canvas::new();
        canvas.text_rotated("GRAINLINE", 109.0, 140.0, 90.0);
        let ops = page_operations(&canvas.pages()[0]);
        let tm = ops.iter().find(|o| o.operator == "Tm").unwrap();
        let vals: Vec<f32> = tm.operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert!(vals[0].abs() < 1e-3);
        assert!((vals[1] - 1.0).abs() < 1e-3);
        assert!((vals[2] + 1.0).abs() < 1e-3);
    }
}
