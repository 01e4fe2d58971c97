//! Fixed-size page canvas and its PDF serialization.
//!
//! Drawing is recorded as a list of primitives in absolute PDF coordinates
//! (origin bottom-left, points). Nothing is clipped or paginated here; content
//! placed outside the media box is simply not visible.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::fonts::{encode_text, FontFace};
use super::GeneratorError;

/// ISO A4 portrait in points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

/// A stroke colour and line width. Colours are gray levels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub gray: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        face: FontFace,
        size: f32,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<f32>,
        stroke: Option<Stroke>,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: f32,
    height: f32,
    title: String,
    ops: Vec<DrawOp>,
}

impl Canvas {
    pub fn a4(title: impl Into<String>) -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            title: title.into(),
            ops: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn text(&mut self, x: f32, y: f32, face: FontFace, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            face,
            size,
            text: text.into(),
        });
    }

    /// Draw `text` horizontally centred on the page.
    pub fn centered_text(&mut self, y: f32, face: FontFace, size: f32, text: impl Into<String>) {
        let text = text.into();
        let x = (self.width - face.text_width(&text, size)) / 2.0;
        self.text(x, y, face, size, text);
    }

    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<f32>,
        stroke: Option<Stroke>,
    ) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    /// Horizontal rule of `length` centred on the page at height `y`.
    pub fn centered_rule(&mut self, y: f32, length: f32, stroke: Stroke) {
        let x1 = (self.width - length) / 2.0;
        self.ops.push(DrawOp::Rule {
            x1,
            y1: y,
            x2: x1 + length,
            y2: y,
            stroke,
        });
    }

    /// Every text run in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn content_operations(&self) -> Vec<Operation> {
        let mut operations = Vec::new();

        for op in &self.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    face,
                    size,
                    text,
                } => {
                    operations.push(Operation::new("g", vec![Object::Real(0.0)]));
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new(
                        "Tf",
                        vec![face.resource_name().into(), Object::Real(*size)],
                    ));
                    operations.push(Operation::new(
                        "Td",
                        vec![Object::Real(*x), Object::Real(*y)],
                    ));
                    operations.push(Operation::new(
                        "Tj",
                        vec![Object::string_literal(encode_text(text))],
                    ));
                    operations.push(Operation::new("ET", vec![]));
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    operations.push(Operation::new("q", vec![]));
                    if let Some(gray) = fill {
                        operations.push(Operation::new("g", vec![Object::Real(*gray)]));
                    }
                    if let Some(stroke) = stroke {
                        operations.push(Operation::new("G", vec![Object::Real(stroke.gray)]));
                        operations.push(Operation::new("w", vec![Object::Real(stroke.width)]));
                    }
                    operations.push(Operation::new(
                        "re",
                        vec![
                            Object::Real(*x),
                            Object::Real(*y),
                            Object::Real(*width),
                            Object::Real(*height),
                        ],
                    ));
                    let paint = match (fill.is_some(), stroke.is_some()) {
                        (true, true) => "B",
                        (true, false) => "f",
                        (false, true) => "S",
                        (false, false) => "n",
                    };
                    operations.push(Operation::new(paint, vec![]));
                    operations.push(Operation::new("Q", vec![]));
                }
                DrawOp::Rule {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                } => {
                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new("G", vec![Object::Real(stroke.gray)]));
                    operations.push(Operation::new("w", vec![Object::Real(stroke.width)]));
                    operations.push(Operation::new("m", vec![Object::Real(*x1), Object::Real(*y1)]));
                    operations.push(Operation::new("l", vec![Object::Real(*x2), Object::Real(*y2)]));
                    operations.push(Operation::new("S", vec![]));
                    operations.push(Operation::new("Q", vec![]));
                }
            }
        }

        operations
    }

    /// Serialize the page into a single-page PDF.
    pub fn to_pdf(&self) -> Result<Vec<u8>, GeneratorError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let content = Content {
            operations: self.content_operations(),
        };
        let encoded = content
            .encode()
            .map_err(|e| GeneratorError::RenderFault(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.width),
                Object::Real(self.height),
            ],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(self.title.as_str()),
            "Producer" => Object::string_literal(concat!("stewards-decision-server ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| GeneratorError::RenderFault(format!("failed to serialize document: {e}")))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_text_is_symmetric() {
        let mut canvas = Canvas::a4("t");
        canvas.centered_text(100.0, FontFace::Bold, 24.0, "STEWARDS DECISION");
        match &canvas.ops()[0] {
            DrawOp::Text { x, .. } => {
                let w = FontFace::Bold.text_width("STEWARDS DECISION", 24.0);
                assert!((x + w / 2.0 - A4_WIDTH / 2.0).abs() < 1e-3);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_centered_rule_spans_length() {
        let mut canvas = Canvas::a4("t");
        let stroke = Stroke { gray: 0.0, width: 0.75 };
        canvas.centered_rule(50.0, 200.0, stroke);
        assert_eq!(
            canvas.ops()[0],
            DrawOp::Rule {
                x1: (A4_WIDTH - 200.0) / 2.0,
                y1: 50.0,
                x2: (A4_WIDTH - 200.0) / 2.0 + 200.0,
                y2: 50.0,
                stroke,
            }
        );
    }

    #[test]
    fn test_to_pdf_produces_single_page_document() {
        let mut canvas = Canvas::a4("Stewards Decision");
        canvas.text(50.0, 700.0, FontFace::Regular, 11.0, "Driver: (Lewis) Hamilton");
        canvas.rect(50.0, 680.0, 100.0, 20.0, Some(0.9), Some(Stroke { gray: 0.7, width: 0.5 }));
        let bytes = canvas.to_pdf().unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
