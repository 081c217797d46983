//! Purchasing: purchase orders raised against suppliers.

pub mod order;

pub use order::{line_total, PurchaseOrder, PurchaseOrderDraft};
