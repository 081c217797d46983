//! Invoicing: issued invoices and incoming payment entries.

pub mod invoice;
pub mod payment;

pub use invoice::{Invoice, InvoiceItem};
pub use payment::{PaymentEntry, PaymentEntryDraft, PaymentMethod};
