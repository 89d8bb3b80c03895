//! Standard Helvetica metrics and WinAnsi text encoding.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for printable ASCII.

use serde::{Deserialize, Serialize};

use crate::print::pt_to_mm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Resource name the font is registered under in every page.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Normal => "F1",
            Self::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Normal => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// WinAnsi code points for the non-ASCII characters our copy uses.
const WIN_ANSI_EXTRAS: [(char, u8); 10] = [
    ('€', 0x80),
    ('…', 0x85),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('™', 0x99),
];

fn extra_width(byte: u8, weight: FontWeight) -> u16 {
    match (byte, weight) {
        (0x85 | 0x97, _) => 1000,
        (0x95, _) => 350,
        (0x96, _) => 556,
        (0x91 | 0x92, FontWeight::Normal) => 222,
        (0x91 | 0x92, FontWeight::Bold) => 278,
        (0x93 | 0x94, FontWeight::Normal) => 333,
        (0x93 | 0x94, FontWeight::Bold) => 500,
        (0x99, _) => 1000,
        (0xB7, _) => 278,
        (0xD7, _) => 584,
        (0xB0, _) => 400,
        _ => 556,
    }
}

/// Encode text as WinAnsi bytes. Arrows become "->"; anything else outside
/// the encoding becomes '?'.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c as u8),
            '→' => out.extend_from_slice(b"->"),
            '\u{A0}'..='\u{FF}' => out.push(c as u32 as u8),
            _ => match WIN_ANSI_EXTRAS.iter().find(|(ch, _)| *ch == c) {
                Some((_, byte)) => out.push(*byte),
                None => out.push(b'?'),
            },
        }
    }
    out
}

/// Inverse of [`encode_win_ansi`] for the code points it emits.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x20..=0x7E | 0xA0..=0xFF => b as char,
            _ => WIN_ANSI_EXTRAS
                .iter()
                .find(|(_, byte)| *byte == b)
                .map(|(ch, _)| *ch)
                .unwrap_or('?'),
        })
        .collect()
}

fn glyph_width(byte: u8, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    match byte {
        0x20..=0x7E => table[(byte - 0x20) as usize],
        _ => extra_width(byte, weight),
    }
}

/// Advance width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .iter()
        .map(|&b| glyph_width(b, weight) as u32)
        .sum();
    pt_to_mm(units as f32 / 1000.0 * size_pt)
}

/// Greedy word wrap to `max_width_mm`. Words wider than the limit get a
/// line of their own.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if text_width_mm(&candidate, size_pt, weight) <= max_width_mm {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_specials() {
        assert_eq!(encode_win_ansi("a—b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("1× Zip"), vec![b'1', 0xD7, b' ', b'Z', b'i', b'p']);
        assert_eq!(encode_win_ansi("1A→1B"), b"1A->1B".to_vec());
        assert_eq!(encode_win_ansi("✂"), b"?".to_vec());
    }

    #[test]
    fn test_decode_roundtrip() {
        let text = "Tension 3–4 · Wool — 5× Buttons";
        assert_eq!(decode_win_ansi(&encode_win_ansi(text)), text);
    }

    #[test]
    fn test_width() {
        // "Hi" = H(722) + i(222) at 1000pt -> 944pt
        let w = text_width_mm("Hi", 1000.0, FontWeight::Normal);
        assert!((w - pt_to_mm(944.0)).abs() < 1e-3);
        assert!(text_width_mm("Hi", 10.0, FontWeight::Bold) > text_width_mm("Hi", 10.0, FontWeight::Normal));
    }

    #[test]
    fn test_wrap() {
        let lines = wrap_text("one two three four five six", 15.0, 10.0, FontWeight::Normal);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 10.0, FontWeight::Normal) <= 15.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text("", 50.0, 9.0, FontWeight::Normal), vec![String::new()]);
    }
}
