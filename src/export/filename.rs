//! Download filenames for export artifacts

use chrono::NaiveDate;

use super::ExportFormat;

/// Longest sanitized client name kept in a filename
const MAX_NAME_LEN: usize = 64;

/// Used when nothing printable survives sanitization
const FALLBACK_NAME: &str = "client";

/// Make a client name safe to embed in a filename and a header value
///
/// Drops path separators, control characters, quotes and characters that
/// are reserved on common filesystems, turns whitespace runs into a single
/// `-`, and strips leading dots so the result can never name a parent or
/// hidden path.
pub fn sanitize_client_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_control()
            || matches!(c, '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' | ';')
        {
            continue;
        }
        if c.is_whitespace() {
            pending_dash = !out.is_empty();
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.push(c);
    }

    let trimmed: String = out
        .trim_start_matches(|c: char| c == '.' || c == '-')
        .chars()
        .take(MAX_NAME_LEN)
        .collect();
    let trimmed = trimmed.trim_end_matches(|c: char| c == '.' || c == '-');

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{sanitized-client-name}-report-{YYYY-MM-DD}.{ext}`
pub fn report_filename(client_name: &str, generated_on: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}-report-{}.{}",
        sanitize_client_name(client_name),
        generated_on.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(sanitize_client_name("Acme"), "Acme");
        assert_eq!(sanitize_client_name("  Acme   Corp  "), "Acme-Corp");
    }

    #[test]
    fn test_strips_traversal() {
        assert_eq!(sanitize_client_name("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_client_name("..\\..\\win"), "win");
        assert_eq!(sanitize_client_name("...."), FALLBACK_NAME);
    }

    #[test]
    fn test_strips_header_injection() {
        let name = sanitize_client_name("Evil\"\r\nSet-Cookie: x=1");
        assert!(!name.contains('"'));
        assert!(!name.contains('\r'));
        assert!(!name.contains('\n'));
        assert!(!name.contains(':'));
        assert_eq!(name, "EvilSet-Cookie-x=1");
    }

    #[test]
    fn test_empty_and_control_only() {
        assert_eq!(sanitize_client_name(""), FALLBACK_NAME);
        assert_eq!(sanitize_client_name("\u{7}\u{1b}"), FALLBACK_NAME);
    }

    #[test]
    fn test_length_capped() {
        let long = "a".repeat(200);
        assert_eq!(sanitize_client_name(&long).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_unicode_kept() {
        assert_eq!(sanitize_client_name("Café Noël"), "Café-Noël");
    }

    #[test]
    fn test_report_filename() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(
            report_filename("Acme Corp", day, ExportFormat::Csv),
            "Acme-Corp-report-2025-06-01.csv"
        );
        assert_eq!(
            report_filename("Acme/Corp", day, ExportFormat::Pdf),
            "AcmeCorp-report-2025-06-01.pdf"
        );
    }
}
