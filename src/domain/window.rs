// Windowing - Which slice of the store is currently in view

/// Inclusive index bounds into the store. Only constructed non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: usize,
    end: usize,
}

impl Window {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of samples covered, always at least one
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    /// The part of `values` covered by this window, clipped to what exists
    pub fn slice<'a, T>(&self, values: &'a [T]) -> &'a [T] {
        if self.start >= values.len() {
            return &[];
        }
        let end = self.end.min(values.len() - 1);
        &values[self.start..=end]
    }
}

/// Compute the visible window. `offset` counts backward from the newest sample.
///
/// Returns `None` when there is nothing to show: an empty series, or an offset
/// that scrolls past the oldest sample.
pub fn compute_window(series_len: usize, page_size: usize, offset: usize) -> Option<Window> {
    let last = series_len.checked_sub(1)?.checked_sub(offset)?;
    let start = series_len.saturating_sub(page_size).saturating_sub(offset);
    let end = last.min(start.saturating_add(page_size));

    if end < start {
        return None;
    }

    Some(Window { start, end })
}

/// Largest offset that still keeps a full page in view
pub fn max_offset(series_len: usize, page_size: usize) -> usize {
    series_len.saturating_sub(page_size)
}

/// Offset after paging toward newer samples
pub fn advance(offset: usize, page_size: usize) -> usize {
    offset.saturating_sub(page_size / 2)
}

/// Offset after paging toward older samples, clamped to [`max_offset`]
pub fn retreat(offset: usize, series_len: usize, page_size: usize) -> usize {
    offset.saturating_add(page_size / 2).min(max_offset(series_len, page_size))
}
