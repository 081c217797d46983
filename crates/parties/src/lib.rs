//! Parties: the ERP's clients and the supplier portal's vendors.
//!
//! Plain typed records plus their form drafts (no IO, no HTTP, no storage).

pub mod client;
pub mod vendor;

pub use client::{Client, ClientDraft, ClientType};
pub use vendor::{Vendor, VendorDraft};
