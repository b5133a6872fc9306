//! PDF Export functionality
//!
//! Renders a client report as a paginated document straight into an output
//! stream. Pages are written as they fill, so nothing is staged on disk.

pub mod layout;
mod writer;

use std::io::{self, Write};

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TimeEntry;
use crate::reports::ClientReport;

pub use layout::{place_row, DocumentLayout, LayoutCursor, RowPlacement};
use layout::truncate_description;
use writer::{Font, PageCanvas, PdfWriter};

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;

/// Column offsets from the left margin
const HOURS_COLUMN: f32 = 90.0;
const DESCRIPTION_COLUMN: f32 = 150.0;

/// Outcome of rendering a document
#[derive(Debug)]
pub struct RenderedDocument<W> {
    /// The output stream, flushed
    pub output: W,
    /// Number of pages written
    pub pages: usize,
    /// Total bytes written to the output
    pub bytes_written: u64,
    /// Row numbers (1-based) that were followed by a separator rule
    pub separators_after: Vec<usize>,
}

/// Render `report` as a PDF document into `out`
///
/// The document holds the title line, a summary block, the column header and
/// one row per entry. The column header is repeated on every continuation
/// page. Write failures are reported as [`TimesheetError::Render`]; bytes
/// already written to `out` stay there.
pub fn render_document<W: Write>(
    report: &ClientReport,
    layout: &DocumentLayout,
    out: W,
) -> TimesheetResult<RenderedDocument<W>> {
    layout.validate()?;
    write_document(report, layout, out).map_err(|e| {
        TimesheetError::Render(format!("Failed to write document: {}", e))
    })
}

fn write_document<W: Write>(
    report: &ClientReport,
    layout: &DocumentLayout,
    out: W,
) -> io::Result<RenderedDocument<W>> {
    let title = format!("Time Report: {}", report.client.name);
    let mut pdf = PdfWriter::start(
        out,
        layout.page_width,
        layout.page_height,
        title.as_str(),
        report.generated_at,
    )?;

    let mut page = PageCanvas::new(layout.page_height);
    let mut y = layout.top_margin;

    page.text(layout.left_margin, y, TITLE_SIZE, Font::Bold, &title);
    y += TITLE_SIZE + layout.line_height / 2.0;

    let summary = [
        format!("Total Hours: {}", report.total_hours),
        format!("Total Entries: {}", report.entry_count),
        format!(
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];
    for line in &summary {
        page.text(layout.left_margin, y, BODY_SIZE, Font::Regular, line);
        y += layout.line_height;
    }
    y += layout.line_height / 2.0;

    draw_header(&mut page, layout, y);
    let mut cursor = LayoutCursor::at(y + layout.header_height());
    let mut separators_after = Vec::new();

    let mut rows = report.entries.iter().peekable();
    while let Some(entry) = rows.next() {
        let placed = place_row(cursor, layout, rows.peek().is_some());

        if let Some(header_y) = placed.header_y {
            let full = std::mem::replace(&mut page, PageCanvas::new(layout.page_height));
            pdf.write_page(full)?;
            draw_header(&mut page, layout, header_y);
        }

        draw_row(&mut page, layout, placed.row_y, entry);

        if let Some(rule_y) = placed.separator_y {
            page.rule(
                layout.left_margin,
                layout.page_width - layout.left_margin,
                rule_y,
                0.5,
                0.75,
            );
            separators_after.push(placed.next.row_index);
        }

        cursor = placed.next;
    }

    pdf.write_page(page)?;
    let finished = pdf.finish()?;

    Ok(RenderedDocument {
        output: finished.output,
        pages: finished.pages,
        bytes_written: finished.bytes_written,
        separators_after,
    })
}

fn draw_header(page: &mut PageCanvas, layout: &DocumentLayout, top: f32) {
    let x = layout.left_margin;
    page.text(x, top, BODY_SIZE, Font::Bold, "Date");
    page.text(x + HOURS_COLUMN, top, BODY_SIZE, Font::Bold, "Hours");
    page.text(x + DESCRIPTION_COLUMN, top, BODY_SIZE, Font::Bold, "Description");
    page.rule(
        x,
        layout.page_width - x,
        top + layout.line_height,
        1.0,
        0.0,
    );
}

fn draw_row(page: &mut PageCanvas, layout: &DocumentLayout, top: f32, entry: &TimeEntry) {
    let x = layout.left_margin;
    page.text(
        x,
        top,
        BODY_SIZE,
        Font::Regular,
        &entry.date.format("%Y-%m-%d").to_string(),
    );
    page.text(
        x + HOURS_COLUMN,
        top,
        BODY_SIZE,
        Font::Regular,
        &entry.hours.to_string(),
    );
    page.text(
        x + DESCRIPTION_COLUMN,
        top,
        BODY_SIZE,
        Font::Regular,
        &truncate_description(entry.description_or_empty(), layout.description_max_chars),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientId, EntryId, Hours, OwnerScope};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn report(count: usize, description: &str) -> ClientReport {
        let client = Client::new(ClientId::new(3), "Acme (Intl)", OwnerScope::new("a@b.c"));
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let entries = (0..count)
            .map(|i| {
                TimeEntry::new(
                    EntryId::new(i as u64 + 1),
                    ClientId::new(3),
                    start + Duration::days(i as i64),
                    Hours::from_hundredths(150),
                    OwnerScope::new("a@b.c"),
                )
                .with_description(description)
            })
            .collect();
        let at = Utc.with_ymd_and_hms(2025, 5, 6, 7, 8, 9).unwrap();
        ClientReport::generated_at(&client, entries, at)
    }

    fn render(report: &ClientReport) -> (RenderedDocument<Vec<u8>>, String) {
        let rendered = render_document(report, &DocumentLayout::default(), Vec::new()).unwrap();
        let text = String::from_utf8_lossy(&rendered.output).to_string();
        (rendered, text)
    }

    #[test]
    fn test_few_entries_single_page() {
        let (rendered, text) = render(&report(3, "Work"));
        assert_eq!(rendered.pages, 1);
        assert_eq!(text.matches("/Type /Page /").count(), 1);
        assert!(text.contains("(Time Report: Acme \\(Intl\\)) Tj"));
        assert!(text.contains("(Total Hours: 4.50) Tj"));
        assert!(text.contains("(Total Entries: 3) Tj"));
        assert!(text.contains("(Generated: 2025-05-06 07:08:09 UTC) Tj"));
    }

    #[test]
    fn test_many_entries_paginate() {
        let (rendered, text) = render(&report(100, "Work"));
        assert!(rendered.pages > 1);
        assert_eq!(text.matches("/Type /Page /").count(), rendered.pages);
        // Column header on every page
        assert_eq!(text.matches("(Description) Tj").count(), rendered.pages);
        assert_eq!(text.matches("(1.50) Tj").count(), 100);
    }

    #[test]
    fn test_separators_after_every_fifth_row() {
        let (rendered, text) = render(&report(12, "Work"));
        assert_eq!(rendered.separators_after, vec![5, 10]);
        // Two separators plus one header underline
        assert_eq!(text.matches(" l S Q").count(), 3);
    }

    #[test]
    fn test_zero_entries_still_finalized() {
        let (rendered, text) = render(&report(0, ""));
        assert_eq!(rendered.pages, 1);
        assert!(rendered.separators_after.is_empty());
        assert!(rendered.output.starts_with(b"%PDF-"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("(Total Hours: 0.00) Tj"));
        assert!(text.contains("(Date) Tj"));
        assert_eq!(rendered.bytes_written as usize, rendered.output.len());
    }

    #[test]
    fn test_long_description_truncated() {
        let long = "x".repeat(300);
        let (_, text) = render(&report(1, &long));
        let expected = format!("({}...) Tj", "x".repeat(61));
        assert!(text.contains(&expected));
        assert!(!text.contains(&"x".repeat(65)));
    }

    #[test]
    fn test_invalid_layout_is_config_error() {
        let layout = DocumentLayout {
            separator_every: 0,
            ..DocumentLayout::default()
        };
        let err = render_document(&report(1, ""), &layout, Vec::new()).unwrap_err();
        assert!(matches!(err, TimesheetError::Config(_)));
    }

    #[derive(Debug)]
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_render_error() {
        let err = render_document(&report(2, ""), &DocumentLayout::default(), BrokenPipe)
            .unwrap_err();
        assert!(matches!(err, TimesheetError::Render(_)));
    }
}
