// Time-series store - Column store produced by one ingestion cycle
use super::time_frame::TimeFrame;

/// Which selection a store was loaded for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSource {
    pub kind: String,
    pub time_frame: TimeFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One shared timestamp column plus one value column per chart parameter.
///
/// Columns are only ever appended through [`StoreBuilder`], which keeps every
/// value column the same length as `timestamps`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesStore {
    source: Option<StoreSource>,
    timestamps: Vec<String>,
    series: Vec<ParameterSeries>,
}

impl TimeSeriesStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<&StoreSource> {
        self.source.as_ref()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    /// Parameter names in schema order
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    pub fn series(&self, parameter: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == parameter)
            .map(|s| s.values.as_slice())
    }

    pub fn contains(&self, parameter: &str) -> bool {
        self.series.iter().any(|s| s.name == parameter)
    }
}

#[derive(Debug)]
pub struct StoreBuilder {
    store: TimeSeriesStore,
}

impl StoreBuilder {
    pub fn new<I, S>(source: StoreSource, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let series = parameters
            .into_iter()
            .map(|name| ParameterSeries {
                name: name.into(),
                values: Vec::new(),
            })
            .collect();

        Self {
            store: TimeSeriesStore {
                source: Some(source),
                timestamps: Vec::new(),
                series,
            },
        }
    }

    pub fn with_capacity(mut self, records: usize) -> Self {
        self.store.timestamps.reserve(records);
        for s in &mut self.store.series {
            s.values.reserve(records);
        }
        self
    }

    /// Append one row. `values` must follow the parameter order given to [`StoreBuilder::new`].
    pub fn push_row(&mut self, timestamp: String, values: &[f64]) {
        debug_assert_eq!(values.len(), self.store.series.len());
        self.store.timestamps.push(timestamp);
        for (series, value) in self.store.series.iter_mut().zip(values) {
            series.values.push(*value);
        }
    }

    pub fn build(self) -> TimeSeriesStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> StoreSource {
        StoreSource {
            kind: "ph".to_string(),
            time_frame: TimeFrame::new(2024, 10).unwrap(),
        }
    }

    #[test]
    fn test_builder_keeps_columns_aligned() {
        let mut builder = StoreBuilder::new(source(), ["v_ph", "ph"]).with_capacity(2);
        builder.push_row("2024-10-01 00:00:00".to_string(), &[2.5, 7.1]);
        builder.push_row("2024-10-01 00:05:00".to_string(), &[2.4, 7.0]);
        let store = builder.build();

        assert_eq!(store.len(), 2);
        for parameter in store.parameters() {
            assert_eq!(store.series(parameter).unwrap().len(), store.timestamps().len());
        }
        assert_eq!(store.series("ph"), Some(&[7.1, 7.0][..]));
        assert_eq!(store.parameters().collect::<Vec<_>>(), vec!["v_ph", "ph"]);
        assert_eq!(store.source().unwrap().kind, "ph");
    }

    #[test]
    fn test_empty_store() {
        let store = TimeSeriesStore::empty();
        assert!(store.is_empty());
        assert!(store.source().is_none());
        assert!(store.series("ph").is_none());

        let store = StoreBuilder::new(source(), ["ph"]).build();
        assert!(store.is_empty());
        assert!(store.contains("ph"));
        assert_eq!(store.series("ph"), Some(&[][..]));
    }
}
