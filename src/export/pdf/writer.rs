//! Minimal streaming PDF 1.4 writer
//!
//! Pages are written to the output as soon as they are complete; only the
//! byte offsets of written objects are kept so the cross-reference table
//! can be emitted when the document is finished. Text uses the standard
//! Helvetica fonts, which every reader provides, so nothing is embedded.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FONT_REGULAR_ID: u32 = 3;
const FONT_BOLD_ID: u32 = 4;
const INFO_ID: u32 = 5;
const FIRST_FREE_ID: u32 = 6;

/// Font faces available on every page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Content stream for one page, addressed top-down in points
#[derive(Debug)]
pub struct PageCanvas {
    page_height: f32,
    content: Vec<u8>,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Vec::new(),
        }
    }

    /// Draw a line of text whose box starts `top` points below the page top
    pub fn text(&mut self, x: f32, top: f32, size: f32, font: Font, text: &str) {
        let baseline = self.page_height - top - size * 0.8;
        self.content.extend_from_slice(
            format!(
                "BT /{} {:.1} Tf {:.2} {:.2} Td ",
                font.resource_name(),
                size,
                x,
                baseline
            )
            .as_bytes(),
        );
        self.content.extend_from_slice(&encode_text(text));
        self.content.extend_from_slice(b" Tj ET\n");
    }

    /// Draw a horizontal rule `top` points below the page top
    pub fn rule(&mut self, x1: f32, x2: f32, top: f32, width: f32, gray: f32) {
        let y = self.page_height - top;
        self.content.extend_from_slice(
            format!(
                "q {:.2} G {:.2} w {:.2} {:.2} m {:.2} {:.2} l S Q\n",
                gray, width, x1, y, x2, y
            )
            .as_bytes(),
        );
    }

    fn into_content(self) -> Vec<u8> {
        self.content
    }
}

/// Encode text as a PDF literal string
///
/// Characters outside Latin-1 become `?`; control characters become spaces.
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            c if c.is_control() => out.push(b' '),
            c if (c as u32) < 0x100 => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out.push(b')');
    out
}

/// Counts bytes on their way to the underlying writer
struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// What remains after a document has been finished
#[derive(Debug)]
pub struct FinishedPdf<W> {
    pub output: W,
    pub pages: usize,
    pub bytes_written: u64,
}

/// Writes a PDF document object by object
pub struct PdfWriter<W: Write> {
    out: CountingWriter<W>,
    offsets: Vec<Option<u64>>,
    page_ids: Vec<u32>,
    next_id: u32,
    page_width: f32,
    page_height: f32,
    title: String,
    created_at: DateTime<Utc>,
}

impl<W: Write> PdfWriter<W> {
    /// Write the file header and shared resources
    pub fn start(
        out: W,
        page_width: f32,
        page_height: f32,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> io::Result<Self> {
        let mut writer = Self {
            out: CountingWriter {
                inner: out,
                written: 0,
            },
            offsets: Vec::new(),
            page_ids: Vec::new(),
            next_id: FIRST_FREE_ID,
            page_width,
            page_height,
            title: title.into(),
            created_at,
        };

        // Binary comment marks the file as binary for transfer tools
        writer.out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

        writer.write_object(
            FONT_REGULAR_ID,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        )?;
        writer.write_object(
            FONT_BOLD_ID,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        )?;

        Ok(writer)
    }

    /// Append a finished page
    pub fn write_page(&mut self, page: PageCanvas) -> io::Result<()> {
        let content = page.into_content();
        let content_id = self.allocate();
        let page_id = self.allocate();

        self.begin_object(content_id)?;
        write!(self.out, "<< /Length {} >>\nstream\n", content.len())?;
        self.out.write_all(&content)?;
        self.out.write_all(b"\nendstream\nendobj\n")?;

        let page = format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.0} {:.0}] \
             /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R >>",
            PAGES_ID,
            self.page_width,
            self.page_height,
            FONT_REGULAR_ID,
            FONT_BOLD_ID,
            content_id
        );
        self.write_object(page_id, page.as_bytes())?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Write the page tree, catalog, info and trailer, then flush
    ///
    /// Consumes the writer; nothing can be appended after `%%EOF`.
    pub fn finish(mut self) -> io::Result<FinishedPdf<W>> {
        let kids = self
            .page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        let pages = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            self.page_ids.len()
        );
        self.write_object(PAGES_ID, pages.as_bytes())?;

        let catalog = format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID);
        self.write_object(CATALOG_ID, catalog.as_bytes())?;

        let mut info = b"<< /Producer (timesheet-report) /Title ".to_vec();
        info.extend_from_slice(&encode_text(&self.title));
        info.extend_from_slice(
            format!(
                " /CreationDate (D:{}Z) >>",
                self.created_at.format("%Y%m%d%H%M%S")
            )
            .as_bytes(),
        );
        self.write_object(INFO_ID, &info)?;

        let xref_offset = self.out.written;
        let size = self.next_id;
        write!(self.out, "xref\n0 {}\n0000000000 65535 f \n", size)?;
        for id in 1..size {
            let offset = self.offsets.get(id as usize).copied().flatten().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("object {} was allocated but never written", id),
                )
            })?;
            write!(self.out, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.out,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, INFO_ID, xref_offset
        )?;
        self.out.flush()?;

        Ok(FinishedPdf {
            pages: self.page_ids.len(),
            bytes_written: self.out.written,
            output: self.out.inner,
        })
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn begin_object(&mut self, id: u32) -> io::Result<()> {
        let index = id as usize;
        if self.offsets.len() <= index {
            self.offsets.resize(index + 1, None);
        }
        self.offsets[index] = Some(self.out.written);
        write!(self.out, "{} 0 obj\n", id)
    }

    fn write_object(&mut self, id: u32, body: &[u8]) -> io::Result<()> {
        self.begin_object(id)?;
        self.out.write_all(body)?;
        self.out.write_all(b"\nendobj\n")
    }
}
