//! `tradedesk-export`: offline renderings of table data.
//!
//! Everything here works on an in-memory [`ReportTable`]; nothing touches the
//! network.

pub mod csv;
pub mod error;
pub mod html;
pub mod pdf;
pub mod report;

pub use error::ExportError;
pub use html::{InvoiceDocument, PrintTemplate};
pub use report::ReportTable;
