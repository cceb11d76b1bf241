//! PDF wellness report.
//!
//! Rendering happens in two steps:
//!
//! - [`layout::layout_report`]: lays the content out into pages of
//!   positioned text lines and rules, handling page breaks
//! - [`pdf::write_pdf`]: serializes the pages with `pdf-writer`
//!
//! ## Example
//!
//! ```rust,ignore
//! use wellness_cluster::report;
//!
//! let doc = report::render(interpretation, &answers, Some("Alex"))?;
//! std::fs::write(report::report_file_name(Some("Alex")), doc.into_inner())?;
//! ```

pub mod font;
pub mod layout;
pub mod pdf;

use std::io::Cursor;

use chrono::NaiveDateTime;
use tracing::debug;

pub use layout::{DrawOp, Page, ReportContent};

use crate::error::Result;
use crate::interpret::ClusterInterpretation;
use crate::survey::ResponseRecord;

/// Render the report using the local clock for the timestamp.
pub fn render(
    interpretation: &ClusterInterpretation,
    answers: &ResponseRecord,
    requester: Option<&str>,
) -> Result<Cursor<Vec<u8>>> {
    render_at(interpretation, answers, requester, chrono::Local::now().naive_local())
}

/// Render the report with an explicit timestamp.
///
/// The returned buffer is positioned at offset 0.
pub fn render_at(
    interpretation: &ClusterInterpretation,
    answers: &ResponseRecord,
    requester: Option<&str>,
    generated_at: NaiveDateTime,
) -> Result<Cursor<Vec<u8>>> {
    let pages = layout::layout_report(&ReportContent {
        interpretation,
        answers,
        requester,
        generated_at,
    });
    let bytes = pdf::write_pdf(&pages)?;
    debug!(pages = pages.len(), bytes = bytes.len(), "Rendered report");
    Ok(Cursor::new(bytes))
}

/// Download name for a report: `Wellness_Report_<name>.pdf`.
///
/// Blank or missing names fall back to `User`. Path separators in the name
/// are replaced so the result is always a bare file name.
#[must_use]
pub fn report_file_name(requester: Option<&str>) -> String {
    let name = requester.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("User");
    let safe: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    format!("Wellness_Report_{safe}.pdf")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn interpretation() -> ClusterInterpretation {
        ClusterInterpretation {
            id: 0,
            title: "Steady and Resilient".to_string(),
            description: "Stable pattern. Few warning signs.".to_string(),
            suggestions: vec!["Keep regular sleep.".to_string()],
        }
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(Some("")), "Wellness_Report_User.pdf");
        assert_eq!(report_file_name(None), "Wellness_Report_User.pdf");
        assert_eq!(report_file_name(Some("  ")), "Wellness_Report_User.pdf");
        assert_eq!(report_file_name(Some("Alex")), "Wellness_Report_Alex.pdf");
        assert_eq!(report_file_name(Some("../etc")), "Wellness_Report_.._etc.pdf");
    }

    #[test]
    fn test_render_returns_buffer_at_start() {
        let answers = ResponseRecord::new().with("treatment", "No");
        let at = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let doc = render_at(&interpretation(), &answers, Some("Alex"), at).unwrap();

        assert_eq!(doc.position(), 0);
        assert!(!doc.get_ref().is_empty());
        let parsed = lopdf::Document::load_mem(doc.get_ref()).unwrap();
        assert!(!parsed.get_pages().is_empty());
    }

    #[test]
    fn test_render_uses_clock() {
        let answers = ResponseRecord::new().with("treatment", "No");
        let doc = render(&interpretation(), &answers, None).unwrap();
        assert_eq!(doc.position(), 0);
        assert!(doc.get_ref().starts_with(b"%PDF-"));
    }
}
