//! `tradedesk-core`: shared building blocks for every record module.
//!
//! This crate contains **pure** primitives (no HTTP, no rendering): identifiers,
//! the record/draft contracts, and value coercion used at the form boundary.

pub mod choice;
pub mod error;
pub mod form;
pub mod id;
pub mod period;
pub mod record;
pub mod value;

pub use error::{DomainError, DomainResult};
pub use form::{Draft, FormFields};
pub use id::RecordId;
pub use period::DateRange;
pub use record::{Record, SortValue, Tabular};
