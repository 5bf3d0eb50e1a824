use std::collections::HashMap;

use crate::load::input::SourceText;
use crate::{ReportConfig, ReportError, ReportResult};

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    pub(crate) line: u64,
    pub(crate) date: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) category: Option<String>,
}

pub(crate) fn parse_rows(source: &SourceText, config: &ReportConfig) -> ReportResult<Vec<RawRow>> {
    let delimiter = delimiter_byte(config.field_delimiter)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(source.body.as_bytes());

    let headers = reader
        .headers()
        .map(|record| {
            record
                .iter()
                .map(|value| value.trim().to_string())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();

    let expected = vec![
        config.date_column.clone(),
        config.amount_column.clone(),
        config.category_column.clone(),
    ];
    if expected.iter().any(|name| !headers.contains(name)) {
        return Err(ReportError::schema_mismatch(
            config.header_rows_to_skip,
            expected,
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for result_row in reader.records() {
        let record = result_row.map_err(|error| {
            ReportError::unreadable_input(&config.data_path(), &error.to_string())
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let line_in_body = record.position().map(|position| position.line()).unwrap_or(0);
        rows.push(RawRow {
            line: source.skipped_lines + line_in_body,
            date: value_for(&record, &index_by_name, &config.date_column),
            amount: value_for(&record, &index_by_name, &config.amount_column),
            category: value_for(&record, &index_by_name, &config.category_column),
        });
    }

    Ok(rows)
}

// Config files are checked on load; this catches configs built in code.
fn delimiter_byte(delimiter: char) -> ReportResult<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            ReportError::invalid_config_value(
                "field_delimiter",
                &format!("`{delimiter}` is not a single ASCII character such as `;` or `,`"),
            )
        })
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}
