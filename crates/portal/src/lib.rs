//! Supplier portal records.
//!
//! Orders and delivery schedules, shipments with their ASN/ASBN paperwork,
//! agreements, consigned stock, supplier invoices/payments, the company
//! profile and the dashboard summary. No IO here; `tradedesk-client` moves
//! these over the wire.

pub mod agreements;
pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod orders;
pub mod profile;
pub mod shipments;

pub use agreements::{Agreement, AgreementDraft, AgreementStatus};
pub use dashboard::{DashboardSummary, InventoryLevel, MonthlyShipments, StatusCount};
pub use finance::{SupplierInvoice, SupplierInvoiceDraft, SupplierPayment, SupplierPaymentDraft};
pub use inventory::{ConsignedInventory, ConsignedInventoryDraft};
pub use orders::{Order, OrderDraft, OrderStatus, Schedule, ScheduleDraft, ScheduleStatus};
pub use profile::{Profile, ProfileDraft};
pub use shipments::{
    Asbn, AsbnDraft, Asn, AsnDraft, AsnFile, Receipt, ReturnDraft, ReturnRequest, Shipment,
    ShipmentDraft, ShipmentStatus,
};
