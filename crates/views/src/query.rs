//! Client-side list narrowing: search, status, sort and paging.

use core::cmp::Ordering;
use core::ops::Range;

use tradedesk_core::{Record, SortValue};

/// Rows per page unless a module overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Case-insensitive substring match against a record's search fields.
/// Only the empty query matches everything; whitespace is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Exact status match; `None`, blank or "All" accept every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter(Option<String>);

impl StatusFilter {
    pub fn new(status: &str) -> Self {
        let status = status.trim();
        if status.is_empty() || status.eq_ignore_ascii_case("all") {
            Self(None)
        } else {
            Self(Some(status.to_string()))
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match &self.0 {
            None => true,
            Some(wanted) => record.status() == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Stable sort of `rows` by this field.
    ///
    /// Records without a value for the field keep their position; only the
    /// records that have one are reordered among their own slots.
    pub fn sort<R: Record>(&self, rows: &mut [&R]) {
        let mut keyed: Vec<(usize, SortValue)> = rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.sort_value(&self.field).map(|v| (i, v)))
            .collect();
        let slots: Vec<usize> = keyed.iter().map(|(i, _)| *i).collect();
        keyed.sort_by(|a, b| self.direction.apply(a.1.compare(&b.1)));

        let ordered: Vec<&R> = keyed.iter().map(|(i, _)| rows[*i]).collect();
        for (slot, row) in slots.into_iter().zip(ordered) {
            rows[slot] = row;
        }
    }
}

/// 1-based page cursor. The number never drops below 1 and the size is
/// at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl Page {
    pub fn first(size: usize) -> Self {
        Self {
            number: 1,
            size: size.max(1),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.number = 1;
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }

    /// `[(k-1)*P, min(k*P, N))`, empty past the end.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.number - 1).saturating_mul(self.size).min(total);
        let end = self.number.saturating_mul(self.size).min(total);
        start..end
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.number < self.page_count(total)
    }

    /// Move to `number`, clamped to the pages that exist.
    pub fn go_to(&mut self, number: usize, total: usize) {
        self.number = number.clamp(1, self.page_count(total).max(1));
    }

    pub fn next(&mut self, total: usize) {
        if self.has_next(total) {
            self.number += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.number -= 1;
        }
    }
}
