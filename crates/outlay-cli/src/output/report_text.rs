use std::io;

use outlay_core::render::table::key_value_rows;
use serde_json::Value;

pub fn render_report_run(data: &Value) -> io::Result<String> {
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if dry_run {
        let body = data
            .get("report_text")
            .and_then(Value::as_str)
            .ok_or_else(|| io::Error::other("report output requires report_text"))?;
        return Ok(body.trim_end().to_string());
    }

    let report_path = required_str(data, "report_path")?;
    let report_directory = required_str(data, "report_directory")?;

    let mut lines = vec![
        format!("Report saved to {report_path}"),
        format!("Figures saved in {report_directory}"),
    ];
    let charts = data
        .get("chart_paths")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for chart in charts.iter().filter_map(Value::as_str) {
        lines.push(format!("  {chart}"));
    }

    if let Some(summary) = data.get("summary") {
        lines.push(String::new());
        lines.push("Summary:".to_string());
        let entries = [
            ("Transactions:", number(data, "transactions")),
            ("Total:", money(summary, "total_expenditure")),
            ("Per day:", money(summary, "average_per_day")),
            ("Days:", number(summary, "day_count")),
        ];
        lines.extend(key_value_rows(&entries, 2));
    }

    Ok(lines.join("\n"))
}

fn required_str<'a>(data: &'a Value, key: &str) -> io::Result<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other(format!("report output requires {key}")))
}

fn number(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

fn money(data: &Value, key: &str) -> String {
    format!("{:.2}", data.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}
