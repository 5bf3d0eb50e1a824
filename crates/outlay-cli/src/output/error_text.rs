use outlay_core::ReportError;

pub fn render_error(error: &ReportError) -> String {
    let mut lines = vec![
        "The report could not be produced.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];
    if let Some(line) = error.data.as_ref().and_then(|data| data.get("line")) {
        lines.push(format!("  Line:     {line}"));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Rerun with OUTLAY_LOG=debug and check the log on stderr.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}
