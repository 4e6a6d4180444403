// Axis labels - Value ticks for the Y axis and timestamp ticks for the X axis
use super::mapping::ChartLayout;
use super::scaling::ValueRange;
use super::window::Window;
use chrono::{DateTime, NaiveDateTime};

pub const Y_LABEL_COUNT: usize = 6;
pub const X_LABEL_COUNT: usize = 5;

const X_LABEL_FORMAT: &str = "%m/%d %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    /// Offset along the axis in chart space
    pub position: f64,
}

/// Fixed-point text used for every value readout
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

/// Six evenly spaced value labels from `range.min` to `range.max`
pub fn y_labels(range: ValueRange, layout: &ChartLayout) -> Vec<AxisLabel> {
    let range = range.normalized();
    let steps = (Y_LABEL_COUNT - 1) as f64;

    (0..Y_LABEL_COUNT)
        .map(|i| {
            let fraction = i as f64 / steps;
            AxisLabel {
                text: format_value(range.value_at(fraction)),
                position: layout.y_at(fraction),
            }
        })
        .collect()
}

/// Store index labelled by the `i`-th X tick
pub fn x_label_index(window: Window, i: usize) -> usize {
    let steps = (X_LABEL_COUNT - 1) as f64;
    let span = (window.end() - window.start()) as f64;
    window.start() + (span * i as f64 / steps).round() as usize
}

/// Up to five timestamp labels spread across the window.
///
/// A tick whose index falls outside `timestamps` is left out.
pub fn x_labels(window: Window, timestamps: &[String], layout: &ChartLayout) -> Vec<AxisLabel> {
    let steps = (X_LABEL_COUNT - 1) as f64;

    (0..X_LABEL_COUNT)
        .filter_map(|i| {
            let timestamp = timestamps.get(x_label_index(window, i))?;
            Some(AxisLabel {
                text: format_timestamp(timestamp),
                position: layout.x_at(i as f64 / steps),
            })
        })
        .collect()
}

/// Render a source timestamp as `MM/dd HH:mm`; unparseable input is shown as-is
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|t| t.format(X_LABEL_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.naive_local());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
