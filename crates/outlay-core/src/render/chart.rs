use std::f64::consts::TAU;
use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::ChartFormat;
use crate::model::{CategoryBreakdown, ReportSummary, Window};
use crate::render::report_text::format_display_date;
use crate::{ReportConfig, ReportError, ReportResult};

const FONT_FAMILY: &str = "sans-serif";
// DejaVu Sans covers Latin and Greek labels; license in assets/.
static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

const BAR_CHART_SIZE: (u32, u32) = (1000, 600);
const PIE_CHART_SIZE: (u32, u32) = (1000, 800);
const BAR_HALF_WIDTH: f64 = 0.25;
const PIE_START_DEGREES: f64 = 140.0;
const EMPTY_WINDOW_NOTE: &str = "No expenditure in this window";

const TOTAL_BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const AVERAGE_BAR_COLOR: RGBColor = RGBColor(144, 238, 144);
const MEAN_LINE_COLOR: RGBColor = RGBColor(214, 39, 40);
const PIE_PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    MonthlyTotal,
    MonthlyAverage,
    Categories(Window),
}

impl ChartKind {
    pub fn file_stem(self) -> String {
        match self {
            Self::MonthlyTotal => "monthly_expenditure_total".to_string(),
            Self::MonthlyAverage => "monthly_expenditure_average".to_string(),
            Self::Categories(Window::All) => "expenditure_per_category".to_string(),
            Self::Categories(Window::LastMonths(1)) => {
                "expenditure_per_category_last_month".to_string()
            }
            Self::Categories(Window::LastMonths(3)) => {
                "expenditure_per_category_last_three_months".to_string()
            }
            Self::Categories(Window::LastMonths(months)) => {
                format!("expenditure_per_category_last_{months}_months")
            }
        }
    }

    pub fn file_name(self, format: ChartFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }
}

/// Every chart a run produces, in output order.
pub fn chart_kinds(summary: &ReportSummary) -> Vec<ChartKind> {
    let mut kinds = vec![ChartKind::MonthlyTotal, ChartKind::MonthlyAverage];
    kinds.extend(
        summary
            .categories
            .iter()
            .map(|breakdown| ChartKind::Categories(breakdown.window)),
    );
    kinds
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

impl BarChart {
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title_lines: Vec<String>,
    pub slices: Vec<(String, f64)>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|(_, value)| *value).sum()
    }

    /// `<category> (<share>%)` for each slice, share to one decimal place.
    pub fn slice_labels(&self) -> Vec<String> {
        let total = self.total();
        self.slices
            .iter()
            .map(|(label, value)| {
                let share = if total > 0.0 {
                    value / total * 100.0
                } else {
                    0.0
                };
                format!("{label} ({share:.1}%)")
            })
            .collect()
    }
}

pub fn monthly_bar_chart(
    kind: ChartKind,
    summary: &ReportSummary,
    config: &ReportConfig,
) -> BarChart {
    let range = format!(
        "{} to {}",
        format_display_date(summary.date_range.start, config),
        format_display_date(summary.date_range.end, config)
    );
    let labels = summary
        .monthly
        .iter()
        .map(|bucket| bucket.month.to_string())
        .collect::<Vec<String>>();

    if kind == ChartKind::MonthlyAverage {
        return BarChart {
            title: format!("Average Daily Expenditure ({range})"),
            y_label: format!("Average Expenditure ({})", config.currency_symbol),
            labels,
            values: summary.monthly.iter().map(|bucket| bucket.average).collect(),
            color: AVERAGE_BAR_COLOR,
        };
    }

    BarChart {
        title: format!("Total Monthly Expenditure ({range})"),
        y_label: format!("Total Expenditure ({})", config.currency_symbol),
        labels,
        values: summary.monthly.iter().map(|bucket| bucket.total).collect(),
        color: TOTAL_BAR_COLOR,
    }
}

pub fn category_pie_chart(breakdown: &CategoryBreakdown, config: &ReportConfig) -> PieChart {
    let span = match breakdown.span {
        Some(span) => format!(
            "{} to {}",
            format_display_date(span.start, config),
            format_display_date(span.end, config)
        ),
        None => "no data".to_string(),
    };

    PieChart {
        title_lines: vec![
            format!("{}: {span}", breakdown.window.label()),
            format!(
                "Total Expenditure: {}{:.2}",
                config.currency_symbol, breakdown.total
            ),
        ],
        slices: breakdown
            .buckets
            .iter()
            .map(|bucket| (bucket.category.clone(), bucket.total))
            .collect(),
    }
}

/// Draws `kind` for `summary` and writes it to `path`.
pub fn render_chart(
    kind: ChartKind,
    summary: &ReportSummary,
    config: &ReportConfig,
    path: &Path,
) -> ReportResult<()> {
    match kind {
        ChartKind::MonthlyTotal | ChartKind::MonthlyAverage => {
            let chart = monthly_bar_chart(kind, summary, config);
            write_bar_chart(&chart, path, config.chart_format)
        }
        ChartKind::Categories(window) => {
            let empty;
            let breakdown = match summary.breakdown(window) {
                Some(value) => value,
                None => {
                    empty = CategoryBreakdown {
                        window,
                        span: None,
                        total: 0.0,
                        buckets: Vec::new(),
                    };
                    &empty
                }
            };
            let chart = category_pie_chart(breakdown, config);
            write_pie_chart(&chart, path, config.chart_format)
        }
    }
}

/// Registers the bundled font with plotters once per process. Every title,
/// axis label and slice label is laid out with it, for SVG and PNG alike.
fn ensure_chart_font(path: &Path) -> ReportResult<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());
    if registered {
        Ok(())
    } else {
        Err(ReportError::write_failed(
            path,
            "the bundled chart font could not be loaded",
        ))
    }
}

pub fn write_bar_chart(chart: &BarChart, path: &Path, format: ChartFormat) -> ReportResult<()> {
    ensure_chart_font(path)?;
    let drawn = match format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
            draw_bar_chart(&root, chart).map_err(|error| error.to_string())
        }
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
            draw_bar_chart(&root, chart).map_err(|error| error.to_string())
        }
    };
    drawn.map_err(|detail| ReportError::write_failed(path, &detail))
}

pub fn write_pie_chart(chart: &PieChart, path: &Path, format: ChartFormat) -> ReportResult<()> {
    ensure_chart_font(path)?;
    let drawn = match format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, PIE_CHART_SIZE).into_drawing_area();
            draw_pie_chart(&root, chart).map_err(|error| error.to_string())
        }
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, PIE_CHART_SIZE).into_drawing_area();
            draw_pie_chart(&root, chart).map_err(|error| error.to_string())
        }
    };
    drawn.map_err(|detail| ReportError::write_failed(path, &detail))
}

fn draw_bar_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &BarChart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mean = chart.mean();
    let slots = chart.values.len().max(1) as f64;
    let peak = chart.values.iter().copied().fold(mean, f64::max);
    let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };

    let mut cartesian = ChartBuilder::on(root)
        .caption(&chart.title, (FONT_FAMILY, 24).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(slots - 0.5), 0f64..y_max)?;

    let labels = &chart.labels;
    cartesian
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| slot_label(labels, *x))
        .x_desc("Month")
        .y_desc(chart.y_label.as_str())
        .draw()?;

    cartesian.draw_series(chart.values.iter().enumerate().map(|(index, value)| {
        let center = index as f64;
        Rectangle::new(
            [(center - BAR_HALF_WIDTH, 0.0), (center + BAR_HALF_WIDTH, *value)],
            chart.color.filled(),
        )
    }))?;

    let average_label = format!("Average: {mean:.2}");
    cartesian
        .draw_series(LineSeries::new(
            vec![(-0.5, mean), (slots - 0.5, mean)],
            MEAN_LINE_COLOR.stroke_width(2),
        ))?
        .label(average_label.clone())
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], MEAN_LINE_COLOR.stroke_width(2))
        });
    cartesian.draw_series(std::iter::once(Text::new(
        average_label,
        (slots - 0.5, mean),
        (FONT_FAMILY, 14)
            .into_font()
            .color(&MEAN_LINE_COLOR)
            .pos(Pos::new(HPos::Right, VPos::Bottom)),
    )))?;

    cartesian
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()
}

fn draw_pie_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &PieChart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let center_x = i32::try_from(width / 2).unwrap_or(0);
    let title_style = (FONT_FAMILY, 22)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (index, line) in chart.title_lines.iter().enumerate() {
        let y = 16 + 30 * i32::try_from(index).unwrap_or(0);
        root.draw(&Text::new(line.as_str(), (center_x, y), title_style.clone()))?;
    }

    let center = (center_x, i32::try_from(height / 2 + 30).unwrap_or(0));
    let total = chart.total();
    if chart.slices.is_empty() || total <= 0.0 {
        root.draw(&Text::new(
            EMPTY_WINDOW_NOTE,
            center,
            (FONT_FAMILY, 20)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        return root.present();
    }

    let radius = f64::from(width.min(height)) * 0.3;
    let labels = chart.slice_labels();
    let mut angle = PIE_START_DEGREES.to_radians();
    for (index, ((_, value), label)) in chart.slices.iter().zip(labels).enumerate() {
        let sweep = value / total * TAU;
        let color = PIE_PALETTE[index % PIE_PALETTE.len()];
        root.draw(&Polygon::new(
            slice_points(center, radius, angle, sweep),
            color.filled(),
        ))?;

        let middle = angle + sweep / 2.0;
        let anchor = if middle.cos() >= 0.0 {
            HPos::Left
        } else {
            HPos::Right
        };
        root.draw(&Text::new(
            label,
            polar_point(center, radius * 1.08, middle),
            (FONT_FAMILY, 15)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(anchor, VPos::Center)),
        ))?;
        angle += sweep;
    }

    root.present()
}

fn slot_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// Counter-clockwise from `start`, screen y grows downward.
fn slice_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep.to_degrees().ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * (step as f64 / steps as f64);
        points.push(polar_point(center, radius, angle));
    }
    points
}

fn polar_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}
