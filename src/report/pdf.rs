//! Serialize laid-out pages to PDF bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use super::font::{Face, encode_win_ansi};
use super::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, REPORT_TITLE};
use crate::error::{Error, Result};

const FACES: [Face; 2] = [Face::Regular, Face::Bold];

/// Write pages to a complete PDF document.
pub fn write_pdf(pages: &[Page]) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(Error::Render("document has no pages".to_string()));
    }

    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let tree_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<Ref> = FACES.iter().map(|_| alloc()).collect();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(i32::try_from(pages.len()).map_err(|_| Error::Render("too many pages".to_string()))?);
    pdf.document_info(info_id)
        .title(TextStr(REPORT_TITLE))
        .producer(TextStr(concat!("wellness-cluster ", env!("CARGO_PKG_VERSION"))));

    for (face, font_id) in FACES.iter().zip(&font_ids) {
        pdf.type1_font(*font_id)
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        writer.parent(tree_id);
        writer.contents(*content_id);
        {
            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for (face, font_id) in FACES.iter().zip(&font_ids) {
                fonts.pair(Name(face.resource_name()), *font_id);
            }
        }
        writer.finish();

        let content = page_content(page);
        pdf.stream(*content_id, &content);
    }

    Ok(pdf.finish())
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, face, size, text } => {
                let bytes = encode_win_ansi(text);
                content.begin_text();
                content.set_font(Name(face.resource_name()), *size);
                content.next_line(*x, *y);
                content.show(Str(&bytes));
                content.end_text();
            }
            DrawOp::Rule { x1, x2, y } => {
                content.set_line_width(0.75);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
        }
    }
    content.finish().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::font::Face;

    fn page(number: usize, text: &str) -> Page {
        Page {
            number,
            ops: vec![
                DrawOp::Text {
                    x: 72.0,
                    y: 750.0,
                    face: Face::Bold,
                    size: 13.0,
                    text: text.to_string(),
                },
                DrawOp::Rule { x1: 72.0, x2: 540.0, y: 700.0 },
            ],
        }
    }

    #[test]
    fn test_write_pdf_page_count() {
        let bytes = write_pdf(&[page(1, "First"), page(2, "Second (continued)")]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_content_stream_contains_text() {
        let content = page_content(&page(1, "Your Responses (continued)"));
        let haystack = String::from_utf8_lossy(&content);
        assert!(haystack.contains("Your Responses"));
        assert!(haystack.contains("continued"));
        assert!(haystack.contains("/F2 "));
        assert!(haystack.contains(" Tj"));
        assert!(haystack.contains(" l"));
    }

    #[test]
    fn test_write_pdf_rejects_empty() {
        assert!(matches!(write_pdf(&[]), Err(Error::Render(_))));
    }
}
