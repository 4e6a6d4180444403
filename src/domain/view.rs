// View state - User selections driving one chart
use super::store::TimeSeriesStore;
use super::time_frame::TimeFrame;
use super::window::{self, Window};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_kind: String,
    pub selected_time_frame: TimeFrame,
    pub selected_parameter: Option<String>,
    pub multi_series: bool,
    /// Samples between the newest sample and the right edge of the chart
    pub scroll_offset: usize,
}

impl ViewState {
    pub fn new(kind: impl Into<String>, time_frame: TimeFrame) -> Self {
        Self {
            selected_kind: kind.into(),
            selected_time_frame: time_frame,
            selected_parameter: None,
            multi_series: false,
            scroll_offset: 0,
        }
    }

    pub fn window(&self, store: &TimeSeriesStore, page_size: usize) -> Option<Window> {
        window::compute_window(store.len(), page_size, self.scroll_offset)
    }

    /// Move toward newer samples. Returns whether the offset changed.
    pub fn page_forward(&mut self, page_size: usize) -> bool {
        let before = self.scroll_offset;
        self.scroll_offset = window::advance(self.scroll_offset, page_size);
        self.scroll_offset != before
    }

    /// Move toward older samples. Returns whether the offset changed.
    pub fn page_backward(&mut self, series_len: usize, page_size: usize) -> bool {
        let before = self.scroll_offset;
        self.scroll_offset = window::retreat(self.scroll_offset, series_len, page_size);
        self.scroll_offset != before
    }

    /// Re-align selections with a freshly loaded store
    pub fn sync_with(&mut self, store: &TimeSeriesStore, page_size: usize) {
        let keep = self
            .selected_parameter
            .as_deref()
            .is_some_and(|p| store.contains(p));
        if !keep {
            self.selected_parameter = store.parameters().next().map(str::to_string);
        }
        self.scroll_offset = self
            .scroll_offset
            .min(window::max_offset(store.len(), page_size));
    }

    /// Parameters drawn under the current mode
    pub fn visible_parameters<'a>(&'a self, store: &'a TimeSeriesStore) -> Vec<&'a str> {
        if self.multi_series {
            return store.parameters().collect();
        }
        self.selected_parameter
            .as_deref()
            .filter(|p| store.contains(p))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{StoreBuilder, StoreSource};

    fn store(kind: &str, parameters: &[&str], rows: usize) -> TimeSeriesStore {
        let source = StoreSource {
            kind: kind.to_string(),
            time_frame: TimeFrame::new(2024, 10).unwrap(),
        };
        let mut builder = StoreBuilder::new(source, parameters.iter().copied());
        for i in 0..rows {
            let values = vec![i as f64; parameters.len()];
            builder.push_row(format!("2024-10-01 00:00:{:02}", i % 60), &values);
        }
        builder.build()
    }

    #[test]
    fn test_sync_resets_missing_parameter() {
        let mut view = ViewState::new("dht21", TimeFrame::new(2024, 10).unwrap());
        view.sync_with(&store("dht21", &["humidity", "temperature"], 3), 50);
        assert_eq!(view.selected_parameter.as_deref(), Some("humidity"));

        view.selected_parameter = Some("temperature".to_string());
        view.sync_with(&store("dht21", &["humidity", "temperature"], 3), 50);
        assert_eq!(view.selected_parameter.as_deref(), Some("temperature"));

        view.sync_with(&store("ph", &["v_ph", "ph"], 3), 50);
        assert_eq!(view.selected_parameter.as_deref(), Some("v_ph"));
    }

    #[test]
    fn test_sync_clamps_offset_to_new_length() {
        let mut view = ViewState::new("ph", TimeFrame::new(2024, 10).unwrap());
        view.scroll_offset = 70;
        view.sync_with(&store("ph", &["ph"], 80), 50);
        assert_eq!(view.scroll_offset, 30);
        view.sync_with(&store("ph", &["ph"], 0), 50);
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn test_paging() {
        let mut view = ViewState::new("ph", TimeFrame::new(2024, 10).unwrap());
        assert!(!view.page_forward(50));
        assert!(view.page_backward(200, 50));
        assert_eq!(view.scroll_offset, 25);
        assert!(view.page_forward(50));
        assert_eq!(view.scroll_offset, 0);
        assert!(!view.page_backward(40, 50));
    }

    #[test]
    fn test_visible_parameters() {
        let store = store("pzem017", &["voltage", "current"], 2);
        let mut view = ViewState::new("pzem017", TimeFrame::new(2024, 10).unwrap());
        assert!(view.visible_parameters(&store).is_empty());

        view.sync_with(&store, 50);
        assert_eq!(view.visible_parameters(&store), vec!["voltage"]);

        view.multi_series = true;
        assert_eq!(view.visible_parameters(&store), vec!["voltage", "current"]);
    }
}
