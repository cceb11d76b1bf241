//! Page layout for the wellness report.
//!
//! The report is laid out into pages of positioned draw operations before
//! anything is serialized. A [`Composer`] carries the state: the pages
//! finished so far, the operations of the current page, the vertical cursor,
//! and the heading of the section being drawn. Guarded lines check the
//! cursor against a low-water mark first and, when it has been crossed,
//! close the page with its footer, open a new one, and repeat the section
//! heading with a "(continued)" suffix.

use chrono::NaiveDateTime;
use tracing::warn;

use super::font::Face;
use crate::interpret::ClusterInterpretation;
use crate::survey::{ResponseRecord, prettify_key};

/// US Letter width in points.
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter height in points.
pub const PAGE_HEIGHT: f32 = 792.0;
/// Left text margin.
pub const MARGIN_LEFT: f32 = 72.0;
/// Right text margin (footer alignment edge, rule end).
pub const MARGIN_RIGHT: f32 = PAGE_WIDTH - 72.0;
/// Cursor position at the top of every page.
pub const TOP: f32 = 750.0;
/// Baseline of the page footer.
pub const FOOTER_Y: f32 = 30.0;

/// Page break threshold while drawing suggestions.
pub const SUGGESTIONS_LOW_WATER: f32 = 120.0;
/// Page break threshold while drawing responses.
pub const RESPONSES_LOW_WATER: f32 = 100.0;

/// Report title.
pub const REPORT_TITLE: &str = "Mental Health Wellness Report";
/// Interpretation section heading.
pub const INTERPRETATION_HEADING: &str = "Interpretation";
/// Suggestions section heading.
pub const SUGGESTIONS_HEADING: &str = "Personalized Suggestions";
/// Responses section heading.
pub const RESPONSES_HEADING: &str = "Your Responses";

const TITLE_SIZE: f32 = 18.0;
const CLUSTER_SIZE: f32 = 14.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;
const META_SIZE: f32 = 10.0;

const HEADING_STEP: f32 = 20.0;
const SECTION_GAP: f32 = 10.0;
const INTERPRETATION_LEADING: f32 = 15.0;
const SUGGESTION_STEP: f32 = 18.0;
const RESPONSE_STEP: f32 = 16.0;
const BULLET_INDENT: f32 = 10.0;

/// Timestamp format shown under the title, e.g. `16/10/2026, 03:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %I:%M %p";

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text with its baseline at `y`.
    Text {
        /// Left edge.
        x: f32,
        /// Baseline.
        y: f32,
        /// Font face.
        face: Face,
        /// Font size in points.
        size: f32,
        /// Text content.
        text: String,
    },
    /// A horizontal rule.
    Rule {
        /// Start x.
        x1: f32,
        /// End x.
        x2: f32,
        /// Vertical position.
        y: f32,
    },
}

impl DrawOp {
    /// Text content, if this is a text operation.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Rule { .. } => None,
        }
    }
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Draw operations in drawing order, footer last.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text lines in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}

/// Everything the report shows.
#[derive(Debug, Clone, Copy)]
pub struct ReportContent<'a> {
    /// Interpretation of the assigned cluster.
    pub interpretation: &'a ClusterInterpretation,
    /// The submitted answers.
    pub answers: &'a ResponseRecord,
    /// Optional requester name; blank names are treated as absent.
    pub requester: Option<&'a str>,
    /// Render-time clock reading.
    pub generated_at: NaiveDateTime,
}

/// Split a description into display lines on `". "`.
///
/// Each piece is drawn as its own line ending in a single period. This is a
/// presentational re-wrap: a description with `". "` inside an abbreviation
/// is split there too.
#[must_use]
pub fn split_sentences(description: &str) -> Vec<String> {
    description
        .split(". ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s.trim_end_matches('.')))
        .collect()
}

/// Lay out the full report.
#[must_use]
pub fn layout_report(content: &ReportContent<'_>) -> Vec<Page> {
    let mut c = Composer::new();

    c.line(Face::Bold, TITLE_SIZE, REPORT_TITLE);
    c.advance(25.0);
    if let Some(name) = content.requester.map(str::trim).filter(|n| !n.is_empty()) {
        c.line(Face::Regular, 12.0, &format!("Prepared for: {name}"));
        c.advance(18.0);
    }
    let stamp = content.generated_at.format(TIMESTAMP_FORMAT).to_string();
    c.line(Face::Regular, META_SIZE, &format!("Generated on: {stamp}"));
    c.advance(30.0);

    c.line(
        Face::Bold,
        CLUSTER_SIZE,
        &format!("Cluster: {}", content.interpretation.title),
    );
    c.advance(8.0);
    c.rule();
    c.advance(24.0);

    c.heading(INTERPRETATION_HEADING);
    for sentence in split_sentences(&content.interpretation.description) {
        c.line(Face::Regular, BODY_SIZE, &sentence);
        c.advance(INTERPRETATION_LEADING);
    }
    c.advance(SECTION_GAP);

    c.heading(SUGGESTIONS_HEADING);
    for suggestion in &content.interpretation.suggestions {
        c.guarded(SUGGESTIONS_LOW_WATER);
        c.line_at(
            MARGIN_LEFT + BULLET_INDENT,
            Face::Regular,
            BODY_SIZE,
            &format!("\u{2022} {suggestion}"),
        );
        c.advance(SUGGESTION_STEP);
    }
    c.advance(SECTION_GAP);

    c.heading(RESPONSES_HEADING);
    for (question, value) in content.answers.iter() {
        c.guarded(RESPONSES_LOW_WATER);
        c.line(Face::Regular, BODY_SIZE, &format!("{}: {value}", prettify_key(question)));
        c.advance(RESPONSE_STEP);
    }

    c.finish()
}

struct Composer {
    pages: Vec<Page>,
    ops: Vec<DrawOp>,
    y: f32,
    section: Option<&'static str>,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: TOP,
            section: None,
        }
    }

    fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn line(&mut self, face: Face, size: f32, text: &str) {
        self.line_at(MARGIN_LEFT, face, size, text);
    }

    fn line_at(&mut self, x: f32, face: Face, size: f32, text: &str) {
        let width = face.text_width(text, size);
        if x + width > MARGIN_RIGHT {
            warn!(page = self.page_number(), width, text, "Line runs past the right margin");
        }
        self.ops.push(DrawOp::Text {
            x,
            y: self.y,
            face,
            size,
            text: text.to_string(),
        });
    }

    fn rule(&mut self) {
        self.ops.push(DrawOp::Rule {
            x1: MARGIN_LEFT,
            x2: MARGIN_RIGHT,
            y: self.y,
        });
    }

    fn heading(&mut self, title: &'static str) {
        self.section = Some(title);
        self.line(Face::Bold, HEADING_SIZE, title);
        self.advance(HEADING_STEP);
    }

    /// Break the page if the cursor is below `low_water`.
    fn guarded(&mut self, low_water: f32) {
        if self.y < low_water {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.close_page();
        self.y = TOP;
        if let Some(section) = self.section {
            self.line(Face::Bold, HEADING_SIZE, &format!("{section} (continued)"));
            self.advance(HEADING_STEP);
        }
    }

    fn close_page(&mut self) {
        let footer = format!("Page {}", self.page_number());
        let width = Face::Regular.text_width(&footer, META_SIZE);
        self.ops.push(DrawOp::Text {
            x: MARGIN_RIGHT - width,
            y: FOOTER_Y,
            face: Face::Regular,
            size: META_SIZE,
            text: footer,
        });
        let number = self.page_number();
        self.pages.push(Page {
            number,
            ops: std::mem::take(&mut self.ops),
        });
    }

    fn finish(mut self) -> Vec<Page> {
        self.close_page();
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn interpretation(suggestions: usize) -> ClusterInterpretation {
        ClusterInterpretation {
            id: 3,
            title: "Rising Stress Signals".to_string(),
            description: "A. B. C.".to_string(),
            suggestions: (1..=suggestions).map(|i| format!("Suggestion {i}")).collect(),
        }
    }

    fn answers(n: usize) -> ResponseRecord {
        (0..n).map(|i| (format!("question_{i}"), "Yes".to_string())).collect()
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(15, 5, 0)
            .unwrap()
    }

    fn render(interp: &ClusterInterpretation, answers: &ResponseRecord, requester: Option<&str>) -> Vec<Page> {
        layout_report(&ReportContent {
            interpretation: interp,
            answers,
            requester,
            generated_at: at(),
        })
    }

    #[test]
    fn test_split_sentences_quirk() {
        assert_eq!(split_sentences("A. B. C."), vec!["A.", "B.", "C."]);
        assert_eq!(split_sentences("See Dr. Smith today"), vec!["See Dr.", "Smith today."]);
        assert_eq!(split_sentences("No period"), vec!["No period."]);
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_single_page_layout() {
        let interp = interpretation(3);
        let pages = render(&interp, &answers(8), Some("Alex"));
        assert_eq!(pages.len(), 1);

        let lines: Vec<&str> = pages[0].lines().collect();
        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], "Prepared for: Alex");
        assert_eq!(lines[2], "Generated on: 16/10/2026, 03:05 PM");
        assert_eq!(lines[3], "Cluster: Rising Stress Signals");
        assert_eq!(lines[4], INTERPRETATION_HEADING);
        assert_eq!(&lines[5..8], ["A.", "B.", "C."]);
        assert_eq!(lines[8], SUGGESTIONS_HEADING);
        assert_eq!(lines[9], "\u{2022} Suggestion 1");
        assert!(lines.contains(&"Question 7: Yes"));
        assert_eq!(*lines.last().unwrap(), "Page 1");
        assert!(pages[0].ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn test_interpretation_lines_use_fixed_leading() {
        let interp = interpretation(1);
        let pages = render(&interp, &answers(1), None);
        let ys: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, text, .. } if text.len() == 2 => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 3);
        assert_eq!(ys[0] - ys[1], INTERPRETATION_LEADING);
        assert_eq!(ys[1] - ys[2], INTERPRETATION_LEADING);
    }

    #[test]
    fn test_blank_requester_omits_prepared_for() {
        let interp = interpretation(1);
        let pages = render(&interp, &answers(1), Some("   "));
        assert!(!pages[0].lines().any(|l| l.starts_with("Prepared for")));
    }

    #[test]
    fn test_suggestions_overflow_continues_section() {
        let interp = interpretation(40);
        let pages = render(&interp, &answers(2), None);
        assert!(pages.len() > 1);

        let second: Vec<&str> = pages[1].lines().collect();
        assert_eq!(second[0], "Personalized Suggestions (continued)");
        assert!(second.contains(&"\u{2022} Suggestion 40"));

        // Every suggestion on page 1 sits at or above the low-water mark.
        for op in &pages[0].ops {
            if let DrawOp::Text { y, text, .. } = op {
                if text.starts_with('\u{2022}') {
                    assert!(*y >= SUGGESTIONS_LOW_WATER);
                }
            }
        }
    }

    #[test]
    fn test_responses_overflow_continues_section() {
        let interp = interpretation(2);
        let pages = render(&interp, &answers(80), None);
        assert!(pages.len() > 1);
        for page in &pages[1..] {
            assert_eq!(page.lines().next(), Some("Your Responses (continued)"));
        }
        let total: usize = pages
            .iter()
            .map(|p| p.lines().filter(|l| l.starts_with("Question ")).count())
            .sum();
        assert_eq!(total, 80);
    }

    #[test]
    fn test_every_page_has_footer() {
        let interp = interpretation(40);
        let pages = render(&interp, &answers(80), None);
        for page in &pages {
            let footer = format!("Page {}", page.number);
            assert_eq!(page.lines().last(), Some(footer.as_str()));
            match page.ops.last() {
                Some(DrawOp::Text { x, y, face, size, text }) => {
                    assert_eq!(*y, FOOTER_Y);
                    let right = x + face.text_width(text, *size);
                    assert!((right - MARGIN_RIGHT).abs() < 0.01);
                }
                other => panic!("expected footer text, got {other:?}"),
            }
        }
    }
}
