use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::{ReportError, ReportResult};

#[derive(Debug, Clone)]
pub(crate) struct SourceText {
    /// Everything after the skipped preamble, header row first.
    pub(crate) body: String,
    /// Lines discarded before `body` starts.
    pub(crate) skipped_lines: u64,
}

pub(crate) fn read_source(path: &Path, header_rows_to_skip: usize) -> ReportResult<SourceText> {
    let content = fs::read_to_string(path).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ReportError::file_not_found(path),
        _ => ReportError::unreadable_input(path, &error.to_string()),
    })?;

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let (body, skipped_lines) = skip_lines(content, header_rows_to_skip);

    Ok(SourceText {
        body: body.to_string(),
        skipped_lines,
    })
}

fn skip_lines(content: &str, count: usize) -> (&str, u64) {
    let mut rest = content;
    let mut skipped = 0u64;

    for _ in 0..count {
        match rest.find('\n') {
            Some(position) => {
                rest = &rest[position + 1..];
                skipped += 1;
            }
            None => {
                if !rest.is_empty() {
                    skipped += 1;
                }
                return ("", skipped);
            }
        }
    }

    (rest, skipped)
}
