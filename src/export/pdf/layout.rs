//! Page geometry and row placement for document exports
//!
//! Distances are in points measured down from the top edge of the page.
//! Row placement is a pure function of the cursor and the layout, so the
//! pagination and separator rules can be checked without rendering.

use serde::{Deserialize, Serialize};

use crate::error::{TimesheetError, TimesheetResult};

/// Page geometry for the document exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    /// Where the first line of every page starts
    pub top_margin: f32,
    /// A row whose bottom would pass this line goes to the next page
    pub page_break_at: f32,
    pub line_height: f32,
    /// Vertical space taken by a separator rule
    pub separator_gap: f32,
    /// Draw a separator after every this many rows
    pub separator_every: usize,
    /// Longer descriptions are cut and end in `...`
    pub description_max_chars: usize,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        // US Letter
        Self {
            page_width: 612.0,
            page_height: 792.0,
            left_margin: 50.0,
            top_margin: 56.0,
            page_break_at: 740.0,
            line_height: 16.0,
            separator_gap: 6.0,
            separator_every: 5,
            description_max_chars: 64,
        }
    }
}

impl DocumentLayout {
    /// Height of the column header block, including its underline
    pub fn header_height(&self) -> f32 {
        self.line_height + 4.0
    }

    /// Check that a page can hold its header and at least one row
    pub fn validate(&self) -> TimesheetResult<()> {
        let values = [
            self.page_width,
            self.page_height,
            self.left_margin,
            self.top_margin,
            self.page_break_at,
            self.line_height,
            self.separator_gap,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid("dimensions must be finite and non-negative"));
        }
        if self.line_height <= 0.0 {
            return Err(invalid("line_height must be positive"));
        }
        if self.separator_every == 0 {
            return Err(invalid("separator_every must be at least 1"));
        }
        if self.description_max_chars < 4 {
            return Err(invalid("description_max_chars must be at least 4"));
        }
        if self.left_margin * 2.0 >= self.page_width {
            return Err(invalid("left_margin leaves no room for content"));
        }
        if self.page_break_at > self.page_height {
            return Err(invalid("page_break_at lies below the page"));
        }
        if self.top_margin + self.header_height() + self.line_height > self.page_break_at {
            return Err(invalid(
                "top_margin is too close to page_break_at to fit a header and a row",
            ));
        }
        Ok(())
    }

    /// Where rows start on a continuation page
    pub fn first_row_y(&self) -> f32 {
        self.top_margin + self.header_height()
    }
}

fn invalid(reason: &str) -> TimesheetError {
    TimesheetError::Config(format!("Invalid document layout: {}", reason))
}

/// Position of the next row to render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Top of the next row
    pub cursor_y: f32,
    /// Rows rendered so far
    pub row_index: usize,
}

impl LayoutCursor {
    /// Cursor for rows that start at `cursor_y`, before any row is drawn
    pub fn at(cursor_y: f32) -> Self {
        Self {
            cursor_y,
            row_index: 0,
        }
    }
}

/// Where one row and its decorations go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    /// Set when the row starts a new page; the column header goes here
    pub header_y: Option<f32>,
    /// Top of the row itself
    pub row_y: f32,
    /// Set when a separator rule follows the row
    pub separator_y: Option<f32>,
    /// Cursor for the row after this one
    pub next: LayoutCursor,
}

impl RowPlacement {
    pub fn breaks_page(&self) -> bool {
        self.header_y.is_some()
    }
}

/// Place the next row
///
/// A row that would end below `page_break_at` moves to a fresh page,
/// starting under a repeated column header. Every `separator_every`th row
/// is followed by a separator, but only when another row follows it.
pub fn place_row(cursor: LayoutCursor, layout: &DocumentLayout, has_next: bool) -> RowPlacement {
    let mut y = cursor.cursor_y;
    let mut header_y = None;

    if y + layout.line_height > layout.page_break_at {
        header_y = Some(layout.top_margin);
        y = layout.first_row_y();
    }

    let row_y = y;
    y += layout.line_height;

    let row_index = cursor.row_index + 1;
    let mut separator_y = None;
    if has_next && row_index % layout.separator_every == 0 {
        separator_y = Some(y + layout.separator_gap / 2.0);
        y += layout.separator_gap;
    }

    RowPlacement {
        header_y,
        row_y,
        separator_y,
        next: LayoutCursor {
            cursor_y: y,
            row_index,
        },
    }
}

/// Cut a description to at most `max_chars` characters
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> DocumentLayout {
        DocumentLayout {
            top_margin: 10.0,
            page_break_at: 60.0,
            line_height: 10.0,
            separator_gap: 4.0,
            separator_every: 2,
            ..DocumentLayout::default()
        }
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert!(DocumentLayout::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_cramped_page() {
        let layout = DocumentLayout {
            top_margin: 700.0,
            page_break_at: 600.0,
            ..DocumentLayout::default()
        };
        assert!(matches!(layout.validate(), Err(TimesheetError::Config(_))));

        let layout = DocumentLayout {
            separator_every: 0,
            ..DocumentLayout::default()
        };
        assert!(layout.validate().is_err());

        let layout = DocumentLayout {
            line_height: f32::NAN,
            ..DocumentLayout::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_rows_advance_then_break() {
        let layout = DocumentLayout {
            separator_every: 100,
            ..small_layout()
        };
        // Header occupies 10..24
        let mut cursor = LayoutCursor::at(layout.first_row_y());
        let mut tops = Vec::new();
        let mut breaks = Vec::new();

        for _ in 0..5 {
            let placed = place_row(cursor, &layout, true);
            tops.push(placed.row_y);
            breaks.push(placed.breaks_page());
            cursor = placed.next;
        }

        assert_eq!(tops, vec![24.0, 34.0, 44.0, 24.0, 34.0]);
        assert_eq!(breaks, vec![false, false, false, true, false]);
        assert_eq!(cursor.row_index, 5);
    }

    #[test]
    fn test_break_resets_to_top_margin() {
        let layout = small_layout();
        let placed = place_row(LayoutCursor::at(55.0), &layout, false);
        assert_eq!(placed.header_y, Some(layout.top_margin));
        assert_eq!(placed.row_y, layout.first_row_y());
    }

    #[test]
    fn test_separator_every_nth_row() {
        let layout = DocumentLayout::default();
        let mut cursor = LayoutCursor::at(layout.first_row_y());
        let mut after = Vec::new();

        let total = 12;
        for i in 0..total {
            let placed = place_row(cursor, &layout, i + 1 < total);
            if placed.separator_y.is_some() {
                after.push(placed.next.row_index);
            }
            cursor = placed.next;
        }

        assert_eq!(after, vec![5, 10]);
    }

    #[test]
    fn test_no_separator_after_last_row() {
        let layout = small_layout();
        let cursor = LayoutCursor {
            cursor_y: 24.0,
            row_index: 1,
        };
        assert!(place_row(cursor, &layout, false).separator_y.is_none());
        assert!(place_row(cursor, &layout, true).separator_y.is_some());
    }

    #[test]
    fn test_separator_survives_page_break() {
        let layout = small_layout();
        // Second row lands on a fresh page and still earns its separator
        let cursor = LayoutCursor {
            cursor_y: 55.0,
            row_index: 1,
        };
        let placed = place_row(cursor, &layout, true);
        assert!(placed.breaks_page());
        assert_eq!(placed.separator_y, Some(24.0 + 10.0 + 2.0));
        assert_eq!(placed.next.cursor_y, 24.0 + 10.0 + 4.0);
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short", 10), "short");
        assert_eq!(truncate_description("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_description("abcdefghijk", 8), "abcde...");
        assert_eq!(truncate_description("éééééééééé", 5), "éé...");
    }
}
