//! Accounting: per-party ledger reports.
//!
//! Pure domain logic only: totals are derived from the filtered entry list on
//! demand and never stored.

pub mod ledger;

pub use ledger::{
    filter_names, report_file_name, EntryType, Ledger, LedgerEntry, LedgerFilter, LedgerName,
    LedgerSummary, TypeFilter,
};
