//! Inclusive date ranges used by list and report filters.

use chrono::NaiveDate;

use crate::error::DomainResult;
use crate::value::{parse_date, parse_optional_date};

/// Inclusive `[from, to]` range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Build from raw filter inputs (blank means open).
    pub fn parse(from: &str, to: &str) -> DomainResult<Self> {
        Ok(Self {
            from: parse_optional_date(from)?,
            to: parse_optional_date(to)?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Match a raw record date.
    ///
    /// An open range accepts everything; a bounded range rejects missing or
    /// unparseable dates.
    pub fn contains_raw(&self, raw: Option<&str>) -> bool {
        if self.is_open() {
            return true;
        }
        raw.and_then(|r| parse_date(r).ok())
            .is_some_and(|date| self.contains(date))
    }
}
