// Coordinate mapping - Window-relative samples to chart-space points
use super::scaling::ValueRange;

/// Chart area size and the inset kept free on each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub x_padding: f64,
    pub y_padding: f64,
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.x_padding
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.y_padding
    }

    /// X position of `fraction` along the plot area
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.x_padding + self.plot_width() * fraction
    }

    /// Y position of `fraction` along the plot area, measured from the bottom
    pub fn y_at(&self, fraction: f64) -> f64 {
        self.y_padding + self.plot_height() * fraction
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            x_padding: 50.0,
            y_padding: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Map one sample to chart space
pub fn map_point(
    index_in_window: usize,
    value: f64,
    range: ValueRange,
    window_len: usize,
    layout: &ChartLayout,
) -> ChartPoint {
    let x_fraction = if window_len > 1 {
        index_in_window as f64 / (window_len - 1) as f64
    } else {
        0.0
    };

    ChartPoint {
        x: layout.x_at(x_fraction),
        y: layout.y_at(range.fraction_of(value)),
    }
}

/// Map a window slice of values, in index order
pub fn map_series(values: &[f64], range: ValueRange, layout: &ChartLayout) -> Vec<ChartPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| map_point(i, value, range, values.len(), layout))
        .collect()
}
