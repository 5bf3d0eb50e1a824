use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| {
            format!(
                "{padding}{}  {value}",
                pad(label, label_width, Align::Left)
            )
        })
        .collect()
}

pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = natural_column_widths(columns, rows);
    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(format_row(
        columns,
        &columns
            .iter()
            .map(|column| column.name.to_string())
            .collect::<Vec<_>>(),
        &widths,
    ));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }

    output
}

fn natural_column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = *widths.get(index).unwrap_or(&0);
        let value = cells.get(index).map(String::as_str).unwrap_or("");
        pieces.push(pad(value, width, column.align));
    }

    let line = format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)));
    line.trim_end().to_string()
}

// Category labels are often non-ASCII, so widths count chars rather than bytes.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn pad(value: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    match align {
        Align::Left => format!("{value}{fill}"),
        Align::Right => format!("{fill}{value}"),
    }
}
