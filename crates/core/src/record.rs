//! Record contract: identity, searchable text and tabular presentation.

use core::cmp::Ordering;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::DomainResult;
use crate::id::RecordId;

/// A typed backend record listed and mutated through one collection endpoint.
///
/// Implementors describe how the generic table pipeline sees them: which text
/// participates in search, which date the range filter uses, and which fields
/// can be sorted.
pub trait Record: Clone + core::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Short lowercase noun used in log lines and notices (e.g. `"client"`).
    const KIND: &'static str;

    /// Server-assigned identifier (`None` until persisted).
    fn id(&self) -> Option<&RecordId>;

    /// Text fields matched by the case-insensitive search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Raw date used by the date-range filter, if the record has one.
    fn record_date(&self) -> Option<&str> {
        None
    }

    /// Status label used by the status filter, if the record has one.
    fn status(&self) -> Option<&str> {
        None
    }

    /// Value of a sortable field by its wire name.
    fn sort_value(&self, _field: &str) -> Option<SortValue> {
        None
    }

    /// Client-side checks run before a create/update request is sent.
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// Rows and headers for CSV/PDF/print output.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;

    fn cells(&self) -> Vec<String>;
}

/// A comparable field value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text compares lexically, numbers numerically. Numbers order before text
    /// so that mixed columns still sort deterministically.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for SortValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        let a = SortValue::Number(9.0);
        let b = SortValue::Number(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn text_compares_lexically() {
        let a = SortValue::text("10");
        let b = SortValue::text("9");
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn mixed_values_are_ordered_consistently() {
        let n = SortValue::Number(1.0);
        let t = SortValue::text("a");
        assert_eq!(n.compare(&t), Ordering::Less);
        assert_eq!(t.compare(&n), Ordering::Greater);
    }
}
