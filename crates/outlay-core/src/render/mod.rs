pub mod chart;
pub mod report_text;
pub mod table;

pub use chart::{ChartKind, chart_kinds, render_chart};
pub use report_text::render_report;
