//! Product catalog and stock movements.
//!
//! Stock in/out entries are recorded by the backend; the client only lists
//! them (optionally filtered server-side) and posts new movements.

pub mod product;
pub mod stock;

pub use product::{Product, ProductDraft};
pub use stock::{StockIn, StockInDraft, StockOut, StockOutDraft, StockQuery};
