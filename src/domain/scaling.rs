// Scaling - Shared Y range over the visible part of one or more parameters
use super::store::TimeSeriesStore;
use super::window::Window;

/// Fraction of the raw span added below the minimum and above the maximum
pub const RANGE_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Half the span, finite for any finite bounds
    fn half_span(&self) -> f64 {
        self.max * 0.5 - self.min * 0.5
    }

    /// Widen symmetrically by [`RANGE_PADDING`] of the span, saturating at the finite extremes
    pub fn padded(&self) -> Self {
        let pad = self.half_span() * (2.0 * RANGE_PADDING);
        Self::new((self.min - pad).max(f64::MIN), (self.max + pad).min(f64::MAX))
    }

    /// A zero-width range becomes a unit range centred on its value
    pub fn normalized(&self) -> Self {
        if self.half_span() > 0.0 {
            return *self;
        }
        let mid = self.min;
        // Beyond 2^53 a half unit is lost to rounding
        let half = (mid.abs() * f64::EPSILON).max(0.5);
        Self::new((mid - half).max(f64::MIN), (mid + half).min(f64::MAX))
    }

    /// Position of `value` inside the range, 0.0 at `min` and 1.0 at `max`
    pub fn fraction_of(&self, value: f64) -> f64 {
        let range = self.normalized();
        (value * 0.5 - range.min * 0.5) / range.half_span()
    }

    /// Value sitting at `fraction` of the range
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min * (1.0 - fraction) + self.max * fraction
    }
}

/// Raw extrema over every listed parameter inside `window`
pub fn raw_range<'a, I>(store: &TimeSeriesStore, parameters: I, window: Window) -> Option<ValueRange>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut extrema: Option<ValueRange> = None;

    for parameter in parameters {
        let Some(values) = store.series(parameter) else {
            continue;
        };
        for &value in window.slice(values) {
            if !value.is_finite() {
                continue;
            }
            extrema = Some(match extrema {
                Some(r) => ValueRange::new(r.min.min(value), r.max.max(value)),
                None => ValueRange::new(value, value),
            });
        }
    }

    extrema
}

/// Padded range shared by every listed parameter inside `window`.
///
/// Returns `None` when none of the parameters has a value in the window.
pub fn compute_range<'a, I>(store: &TimeSeriesStore, parameters: I, window: Window) -> Option<ValueRange>
where
    I: IntoIterator<Item = &'a str>,
{
    raw_range(store, parameters, window).map(|r| r.padded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{StoreBuilder, StoreSource};
    use crate::domain::window::compute_window;
    use proptest::prelude::*;

    fn store(rows: &[(f64, f64)]) -> TimeSeriesStore {
        let source = StoreSource {
            kind: "pzem017".to_string(),
            time_frame: "2024-10".parse().unwrap(),
        };
        let mut builder = StoreBuilder::new(source, ["voltage", "current"]);
        for (i, (voltage, current)) in rows.iter().enumerate() {
            builder.push_row(format!("2024-10-01 00:{:02}:00", i), &[*voltage, *current]);
        }
        builder.build()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_multi_series_range_is_shared() {
        let store = store(&[(10.0, 1.0), (15.0, 1.5), (20.0, 2.0)]);
        let window = compute_window(store.len(), 50, 0).unwrap();

        let raw = raw_range(&store, ["voltage", "current"], window).unwrap();
        assert_eq!(raw, ValueRange::new(1.0, 20.0));

        let padded = compute_range(&store, ["voltage", "current"], window).unwrap();
        assert_close(padded.min, -0.9);
        assert_close(padded.max, 21.9);
    }

    #[test]
    fn test_single_parameter_range_ignores_others() {
        let store = store(&[(10.0, 1.0), (20.0, 2.0)]);
        let window = compute_window(store.len(), 50, 0).unwrap();

        let range = compute_range(&store, ["current"], window).unwrap();
        assert_close(range.min, 0.9);
        assert_close(range.max, 2.1);
    }

    #[test]
    fn test_range_only_looks_inside_window() {
        let store = store(&[(100.0, 0.0), (10.0, 1.0), (12.0, 1.0)]);
        let window = compute_window(store.len(), 2, 0).unwrap();

        let raw = raw_range(&store, ["voltage"], window).unwrap();
        assert_eq!(raw, ValueRange::new(10.0, 12.0));
    }

    #[test]
    fn test_flat_series() {
        let store = store(&[(5.0, 0.0), (5.0, 0.0)]);
        let window = compute_window(store.len(), 50, 0).unwrap();

        let range = compute_range(&store, ["voltage"], window).unwrap();
        assert_eq!(range, ValueRange::new(5.0, 5.0));
        assert_eq!(range.normalized(), ValueRange::new(4.5, 5.5));
        assert_close(range.fraction_of(5.0), 0.5);
    }

    #[test]
    fn test_extreme_values_stay_finite() {
        let range = ValueRange::new(-f64::MAX, f64::MAX).padded();
        assert_eq!(range, ValueRange::new(f64::MIN, f64::MAX));
        assert_close(range.fraction_of(0.0), 0.5);
        assert_close(range.fraction_of(f64::MAX), 1.0);
        assert_eq!(range.value_at(0.5), 0.0);

        let flat = ValueRange::new(f64::MAX, f64::MAX).normalized();
        assert!(flat.min < flat.max);
        assert_close(flat.fraction_of(f64::MAX), 1.0);
    }

    #[test]
    fn test_unknown_parameter_has_no_range() {
        let store = store(&[(1.0, 2.0)]);
        let window = compute_window(store.len(), 50, 0).unwrap();
        assert_eq!(compute_range(&store, ["energy"], window), None);
    }

    fn finite() -> impl Strategy<Value = f64> {
        use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
        prop_oneof![-1000.0..1000.0f64, POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO]
    }

    proptest! {
        #[test]
        fn test_padded_range_contains_window(
            rows in prop::collection::vec((finite(), finite()), 1..60),
            page in 1..80usize,
            offset in 0..80usize,
        ) {
            let store = store(&rows);
            let Some(window) = compute_window(store.len(), page, offset) else {
                return Ok(());
            };
            let raw = raw_range(&store, ["voltage", "current"], window).unwrap();
            let padded = compute_range(&store, ["voltage", "current"], window).unwrap();

            prop_assert!(padded.min.is_finite() && padded.max.is_finite());
            prop_assert!(padded.min <= raw.min && padded.max >= raw.max);
            for parameter in ["voltage", "current"] {
                for &value in window.slice(store.series(parameter).unwrap()) {
                    let fraction = padded.fraction_of(value);
                    prop_assert!((0.0..=1.0).contains(&fraction), "{value} -> {fraction}");
                }
            }
        }
    }
}
