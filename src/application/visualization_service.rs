// Visualization service - Turns the current store and view state into chart geometry
use crate::domain::labels::{AxisLabel, format_value, x_labels, y_labels};
use crate::domain::mapping::{ChartPoint, map_series};
use crate::domain::palette::color_for;
use crate::domain::scaling::{ValueRange, compute_range};
use crate::domain::store::TimeSeriesStore;
use crate::domain::time_frame::TimeFrame;
use crate::domain::view::ViewState;
use crate::domain::window::Window;
use crate::infrastructure::config::ChartSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub parameter: String,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
}

/// Everything a host needs to draw one chart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartFrame {
    pub title: String,
    pub window: Option<Window>,
    pub range: Option<ValueRange>,
    pub lines: Vec<SeriesLine>,
    pub y_labels: Vec<AxisLabel>,
    pub x_labels: Vec<AxisLabel>,
    pub min_text: Option<String>,
    pub max_text: Option<String>,
}

impl ChartFrame {
    /// Nothing to draw: no data, an empty window or no selected parameter
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Visualizer {
    view: ViewState,
    settings: ChartSettings,
}

impl Visualizer {
    pub fn new(view: ViewState, settings: ChartSettings) -> Self {
        Self { view, settings }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn set_kind(&mut self, kind: &str) {
        self.view.selected_kind = kind.to_string();
    }

    pub fn set_time_frame(&mut self, time_frame: TimeFrame) {
        self.view.selected_time_frame = time_frame;
    }

    /// Parameters offered for selection
    pub fn parameters(&self, store: &TimeSeriesStore) -> Vec<String> {
        store.parameters().map(str::to_string).collect()
    }

    pub fn on_data_loaded(&mut self, store: &TimeSeriesStore) {
        self.view.sync_with(store, self.settings.page_size);
    }

    /// Select a parameter of the current store. Unknown names are ignored.
    pub fn select_parameter(&mut self, store: &TimeSeriesStore, parameter: &str) -> bool {
        if !store.contains(parameter) {
            tracing::warn!("Ignoring unknown parameter {}", parameter);
            return false;
        }
        self.view.selected_parameter = Some(parameter.to_string());
        true
    }

    pub fn set_multi_series(&mut self, on: bool) {
        self.view.multi_series = on;
    }

    pub fn page_forward(&mut self) -> bool {
        self.view.page_forward(self.settings.page_size)
    }

    pub fn page_backward(&mut self, store: &TimeSeriesStore) -> bool {
        self.view.page_backward(store.len(), self.settings.page_size)
    }

    pub fn title(&self, store: &TimeSeriesStore) -> String {
        let (kind, time_frame) = match store.source() {
            Some(source) => (source.kind.to_uppercase(), source.time_frame),
            None => (
                self.view.selected_kind.to_uppercase(),
                self.view.selected_time_frame,
            ),
        };

        if self.view.multi_series {
            return format!("{} Data - {} - All Parameters", kind, time_frame);
        }
        match &self.view.selected_parameter {
            Some(parameter) => format!("{} - {} - {}", kind, parameter, time_frame),
            None => format!("{} - {}", kind, time_frame),
        }
    }

    pub fn render(&self, store: &TimeSeriesStore) -> ChartFrame {
        let title = self.title(store);

        let Some(window) = self.view.window(store, self.settings.page_size) else {
            return ChartFrame {
                title,
                ..ChartFrame::default()
            };
        };

        let parameters = self.view.visible_parameters(store);
        let Some(range) = compute_range(store, parameters.iter().copied(), window) else {
            return ChartFrame {
                title,
                window: Some(window),
                ..ChartFrame::default()
            };
        };

        let layout = self.settings.layout();
        let lines = parameters
            .iter()
            .filter_map(|&parameter| {
                let values = window.slice(store.series(parameter)?);
                Some(SeriesLine {
                    parameter: parameter.to_string(),
                    color: color_for(parameter),
                    points: map_series(values, range, &layout),
                })
            })
            .collect();

        ChartFrame {
            title,
            window: Some(window),
            range: Some(range),
            lines,
            y_labels: y_labels(range, &layout),
            x_labels: x_labels(window, store.timestamps(), &layout),
            min_text: Some(format_value(range.min)),
            max_text: Some(format_value(range.max)),
        }
    }
}
