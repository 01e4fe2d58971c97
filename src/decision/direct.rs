//! In-process renderer: draws the decision straight onto an A4 canvas.
//!
//! The layout is a single page laid out top to bottom with a monotonically
//! decreasing cursor. There is no pagination; overlong content runs past the
//! bottom edge and is clipped by the page.

use async_trait::async_trait;

use super::canvas::{Canvas, Stroke};
use super::fonts::FontFace;
use super::layout::{wrap_multi_line, wrap_single_line};
use super::model::DecisionView;
use super::traits::DecisionRenderer;
use super::GeneratorError;

pub const DOCUMENT_TITLE: &str = "Stewards Decision";

const MARGIN: f32 = 50.0;
const TOP_OFFSET: f32 = 60.0;

const TITLE_SIZE: f32 = 24.0;
const HEADER_SIZE: f32 = 12.0;
const SECTION_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;

const ROW_HEIGHT: f32 = 20.0;
const ROW_BASELINE_OFFSET: f32 = 15.0;
const CELL_PADDING: f32 = 10.0;
const LABEL_COLUMN: f32 = 150.0;
const VALUE_INSET: f32 = 160.0;
const BODY_LINE_HEIGHT: f32 = 15.0;

const HEADER_FILL: f32 = 0.9;
const BORDER: Stroke = Stroke {
    gray: 0.7,
    width: 0.5,
};
const SIGNATURE_STROKE: Stroke = Stroke {
    gray: 0.0,
    width: 0.75,
};
const SIGNATURE_UNDERSCORES: usize = 50;

/// Renders decisions without any external process.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectRenderer;

impl DirectRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Lay the decision out on a fresh A4 canvas.
    pub fn compose(&self, view: &DecisionView) -> Canvas {
        let mut canvas = Canvas::a4(DOCUMENT_TITLE);
        let left = MARGIN;
        let content_width = canvas.width() - 2.0 * MARGIN;
        let mut y = canvas.height() - TOP_OFFSET;

        canvas.centered_text(y, FontFace::Bold, TITLE_SIZE, "STEWARDS DECISION");
        y -= 50.0;

        // Decision details table
        canvas.rect(
            left,
            y - ROW_BASELINE_OFFSET,
            content_width,
            ROW_HEIGHT,
            Some(HEADER_FILL),
            Some(BORDER),
        );
        canvas.text(left + CELL_PADDING, y, FontFace::Bold, HEADER_SIZE, "DECISION DETAILS");
        y -= ROW_HEIGHT;

        let value_font = FontFace::Regular.at(BODY_SIZE);
        let value_width = content_width - VALUE_INSET;
        let rows = [
            ("Driver:", &view.driver_name),
            ("Car Number:", &view.car_number),
            ("Team:", &view.team_name),
            ("Event:", &view.event_type),
            ("Track:", &view.track_name),
            ("Competition:", &view.competition_name),
        ];
        for (label, value) in rows {
            canvas.rect(
                left,
                y - ROW_BASELINE_OFFSET,
                content_width,
                ROW_HEIGHT,
                None,
                Some(BORDER),
            );
            canvas.text(left + CELL_PADDING, y, FontFace::Bold, BODY_SIZE, label);
            canvas.text(
                left + LABEL_COLUMN,
                y,
                FontFace::Regular,
                BODY_SIZE,
                wrap_single_line(value, &value_font, value_width),
            );
            y -= ROW_HEIGHT;
        }
        y -= 30.0;

        // Incident details
        canvas.text(left, y, FontFace::Bold, SECTION_SIZE, "INCIDENT DETAILS");
        y -= 25.0;
        canvas.text(left, y, FontFace::Bold, BODY_SIZE, "Cause:");
        y -= 20.0;
        for line in wrap_multi_line(&view.cause, &value_font, content_width) {
            canvas.text(left, y, FontFace::Regular, BODY_SIZE, line);
            y -= BODY_LINE_HEIGHT;
        }
        y -= 20.0;

        // Penalty
        canvas.text(left, y, FontFace::Bold, SECTION_SIZE, "PENALTY");
        y -= 25.0;
        canvas.text(left, y, FontFace::Bold, BODY_SIZE, "Penalty Imposed:");
        y -= 20.0;
        for line in wrap_multi_line(&view.penalty, &value_font, content_width) {
            canvas.text(left, y, FontFace::Regular, BODY_SIZE, line);
            y -= BODY_LINE_HEIGHT;
        }
        y -= 10.0;
        canvas.text(
            left,
            y,
            FontFace::Regular,
            BODY_SIZE,
            format!("Discretionary Penalty: {}", view.discretionary),
        );
        y -= 40.0;

        // Signature block
        let rule_length =
            FontFace::Regular.text_width(&"_".repeat(SIGNATURE_UNDERSCORES), BODY_SIZE);
        canvas.centered_rule(y, rule_length, SIGNATURE_STROKE);
        y -= 20.0;
        canvas.centered_text(y, FontFace::Italic, BODY_SIZE, "Stewards Signature");
        y -= 30.0;
        canvas.centered_text(
            y,
            FontFace::Regular,
            BODY_SIZE,
            format!("Date & Time: {}", view.created_at),
        );

        canvas
    }

    pub fn render_view(&self, view: &DecisionView) -> Result<Vec<u8>, GeneratorError> {
        self.compose(view).to_pdf()
    }
}

#[async_trait]
impl DecisionRenderer for DirectRenderer {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn render(&self, view: &DecisionView) -> Result<Vec<u8>, GeneratorError> {
        self.render_view(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::canvas::DrawOp;

    fn sample_view() -> DecisionView {
        DecisionView {
            driver_name: "Lewis Hamilton".into(),
            car_number: "#44".into(),
            team_name: "Mercedes".into(),
            event_type: "Race".into(),
            track_name: "Silverstone".into(),
            competition_name: "F1 World Championship".into(),
            cause: "Causing a collision".into(),
            penalty: "5-second time penalty".into(),
            discretionary: "No".into(),
            created_at: "July 6, 2025, 03:12 PM".into(),
        }
    }

    #[test]
    fn test_elements_are_drawn_in_order() {
        let canvas = DirectRenderer::new().compose(&sample_view());
        let texts: Vec<&str> = canvas.texts().collect();
        let expected = [
            "STEWARDS DECISION",
            "DECISION DETAILS",
            "Driver:",
            "Lewis Hamilton",
            "Car Number:",
            "#44",
            "Team:",
            "Mercedes",
            "Event:",
            "Race",
            "Track:",
            "Silverstone",
            "Competition:",
            "F1 World Championship",
            "INCIDENT DETAILS",
            "Cause:",
            "Causing a collision",
            "PENALTY",
            "Penalty Imposed:",
            "5-second time penalty",
            "Discretionary Penalty: No",
            "Stewards Signature",
            "Date & Time: July 6, 2025, 03:12 PM",
        ];
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_cursor_moves_monotonically_down() {
        let canvas = DirectRenderer::new().compose(&sample_view());
        let mut last_y = f32::MAX;
        for op in canvas.ops() {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y <= last_y);
                last_y = *y;
            }
        }
    }

    #[test]
    fn test_table_has_shaded_header_and_six_bordered_rows() {
        let canvas = DirectRenderer::new().compose(&sample_view());
        let rects: Vec<&DrawOp> = canvas
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .collect();
        assert_eq!(rects.len(), 7);
        assert!(matches!(rects[0], DrawOp::Rect { fill: Some(_), .. }));
        assert!(rects[1..]
            .iter()
            .all(|op| matches!(op, DrawOp::Rect { fill: None, stroke: Some(_), .. })));
    }

    #[test]
    fn test_long_table_value_is_truncated() {
        let mut view = sample_view();
        view.competition_name = "International Endurance Championship ".repeat(8);
        let canvas = DirectRenderer::new().compose(&view);
        let value = canvas
            .texts()
            .skip_while(|t| *t != "Competition:")
            .nth(1)
            .unwrap();
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_render_view_outputs_pdf() {
        let bytes = DirectRenderer::new().render_view(&sample_view()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
