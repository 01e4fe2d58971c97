//! Standard PDF font faces and their glyph metrics.
//!
//! Widths are the published advance widths of the base-14 Helvetica family
//! in 1/1000 em for the printable ASCII range (0x20..=0x7E). Anything outside
//! that range is drawn and measured as `?`.

const FIRST_CHAR: u8 = 0x20;
const LAST_CHAR: u8 = 0x7E;
const REPLACEMENT: u8 = b'?';

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0' .. '?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@' .. 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P' .. '_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`' .. 'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p' .. '~'
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0' .. '?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@' .. 'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P' .. '_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`' .. 'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p' .. '~'
];

/// The three faces a decision document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            // The oblique face shares the upright metrics.
            FontFace::Regular | FontFace::Italic => &HELVETICA_WIDTHS,
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of a single encoded byte in 1/1000 em.
    fn glyph_width(self, byte: u8) -> u16 {
        let byte = if (FIRST_CHAR..=LAST_CHAR).contains(&byte) {
            byte
        } else {
            REPLACEMENT
        };
        self.widths()[(byte - FIRST_CHAR) as usize]
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_text(text)
            .into_iter()
            .map(|b| u32::from(self.glyph_width(b)))
            .sum();
        units as f32 * size / 1000.0
    }

    pub fn at(self, size: f32) -> SizedFont {
        SizedFont { face: self, size }
    }
}

/// A face at a fixed point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedFont {
    pub face: FontFace,
    pub size: f32,
}

/// Encode text into the single-byte form drawn by the standard fonts.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_ascii() && (FIRST_CHAR..=LAST_CHAR).contains(&(c as u8)) {
                c as u8
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_known_widths() {
        // "A" = 667 units regular, 722 bold
        assert!(approx(FontFace::Regular.text_width("A", 1000.0), 667.0));
        assert!(approx(FontFace::Bold.text_width("A", 1000.0), 722.0));
        // space is 278 in every face
        for face in FontFace::ALL {
            assert!(approx(face.text_width(" ", 1000.0), 278.0));
        }
    }

    #[test]
    fn test_width_scales_with_size() {
        let w11 = FontFace::Regular.text_width("Stewards", 11.0);
        let w22 = FontFace::Regular.text_width("Stewards", 22.0);
        assert!(approx(w22, w11 * 2.0));
    }

    #[test]
    fn test_italic_matches_regular() {
        let text = "Discretionary Penalty: Yes";
        assert!(approx(
            FontFace::Italic.text_width(text, 11.0),
            FontFace::Regular.text_width(text, 11.0)
        ));
    }

    #[test]
    fn test_non_ascii_measured_as_replacement() {
        assert_eq!(encode_text("Pérez"), b"P?rez".to_vec());
        assert!(approx(
            FontFace::Regular.text_width("é", 10.0),
            FontFace::Regular.text_width("?", 10.0)
        ));
    }

    #[test]
    fn test_tables_cover_printable_ascii() {
        assert_eq!(HELVETICA_WIDTHS.len(), (LAST_CHAR - FIRST_CHAR + 1) as usize);
        assert_eq!(HELVETICA_BOLD_WIDTHS.len(), (LAST_CHAR - FIRST_CHAR + 1) as usize);
        assert_eq!(FontFace::Regular.glyph_width(b'~'), 584);
        assert_eq!(FontFace::Bold.glyph_width(b'z'), 500);
    }
}
