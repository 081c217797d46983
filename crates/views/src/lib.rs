//! `tradedesk-views`: view-models for the record screens.
//!
//! A [`ResourceTable`] holds one module's records with its search, status,
//! date, sort, page, selection and edit state; a [`TableController`] moves it
//! through a [`ResourceService`](tradedesk_client::ResourceService). The ledger
//! report and the tabbed shells live alongside.

pub mod controller;
pub mod ledger;
pub mod query;
pub mod selection;
pub mod table;
pub mod tabs;

pub use controller::{Confirm, TableController};
pub use ledger::{LedgerController, LedgerView};
pub use query::{Page, SortDirection, SortSpec, StatusFilter, TextFilter, DEFAULT_PAGE_SIZE};
pub use selection::{ExportScope, SelectScope, Selection};
pub use table::{Notice, NoticeKind, ResourceTable};
pub use tabs::{shells, ErrorBoundary, TabShell, TabEntry, TabView};
