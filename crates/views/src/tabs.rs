//! Tabbed shells and the per-tab error boundary.

use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tradedesk_auth::Role;

pub const TAB_NOT_FOUND: &str = "Tab not found.";
pub const TAB_LOAD_FAILED: &str = "Something went wrong loading this tab.";

const EVERYONE: &[Role] = &[Role::Admin, Role::Vendor];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// One tab and the roles that may see it (empty: no gating).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEntry {
    pub name: &'static str,
    pub roles: &'static [Role],
}

impl TabEntry {
    pub const fn open(name: &'static str) -> Self {
        Self { name, roles: &[] }
    }

    pub const fn restricted(name: &'static str, roles: &'static [Role]) -> Self {
        Self { name, roles }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.is_empty() || role.is_allowed(self.roles)
    }
}

/// What a shell shows for its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabView<'a> {
    /// No tab chosen yet.
    Dashboard,
    Tab(&'a str),
    NotFound,
}

impl TabView<'_> {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TabView::NotFound => Some(TAB_NOT_FOUND),
            _ => None,
        }
    }
}

/// A fixed list of tabs with an optional active one.
#[derive(Debug, Clone)]
pub struct TabShell {
    title: &'static str,
    tabs: Vec<TabEntry>,
    role: Role,
    active: Option<String>,
}

impl TabShell {
    /// Shell opened on its first visible tab.
    pub fn new(title: &'static str, tabs: &[TabEntry], role: Role) -> Self {
        let mut shell = Self::with_dashboard(title, tabs, role);
        shell.active = shell.visible().first().map(|t| t.name.to_string());
        shell
    }

    /// Shell that starts with no active tab (dashboard shown instead).
    pub fn with_dashboard(title: &'static str, tabs: &[TabEntry], role: Role) -> Self {
        Self {
            title,
            tabs: tabs.to_vec(),
            role,
            active: None,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Apply a newly established role; an active tab the role may not see
    /// falls back to the dashboard.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        if let Some(active) = &self.active {
            if !self.visible().iter().any(|t| t.name == active.as_str()) {
                self.active = None;
            }
        }
    }

    pub fn visible(&self) -> Vec<&TabEntry> {
        self.tabs.iter().filter(|t| t.allows(self.role)).collect()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make `name` the active tab. Names that are not visible are kept so
    /// [`TabShell::view`] can report them as not found.
    pub fn select(&mut self, name: &str) {
        self.active = Some(name.to_string());
    }

    pub fn show_dashboard(&mut self) {
        self.active = None;
    }

    pub fn view(&self) -> TabView<'_> {
        match &self.active {
            None => TabView::Dashboard,
            Some(name) => match self.visible().into_iter().find(|t| t.name == name.as_str()) {
                Some(tab) => TabView::Tab(tab.name),
                None => TabView::NotFound,
            },
        }
    }

    fn position(&self) -> Option<usize> {
        let active = self.active.as_deref()?;
        self.visible().iter().position(|t| t.name == active)
    }

    fn step(&mut self, forward: bool) {
        let visible: Vec<&'static str> = self.visible().iter().map(|t| t.name).collect();
        if visible.is_empty() {
            return;
        }
        let len = visible.len();
        let next = match (self.position(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.active = Some(visible[next].to_string());
    }

    /// Right arrow: next tab, wrapping around.
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Left arrow: previous tab, wrapping around.
    pub fn prev(&mut self) {
        self.step(false);
    }
}

/// Runs tab content and turns failures into a fixed message.
#[derive(Debug, Clone)]
pub struct ErrorBoundary {
    fallback: String,
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new(TAB_LOAD_FAILED)
    }
}

impl ErrorBoundary {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    /// Run `content`; an error or a panic yields the fallback message.
    pub fn render<T, E, F>(&self, content: F) -> Result<T, String>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        match catch_unwind(AssertUnwindSafe(content)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!("Tab failed to render: {}", e);
                Err(self.fallback.clone())
            }
            Err(_) => {
                tracing::error!("Tab panicked while rendering");
                Err(self.fallback.clone())
            }
        }
    }
}

/// The application's shells.
pub mod shells {
    use super::*;

    pub const SUPPLIER_PORTAL: &[TabEntry] = &[
        TabEntry::restricted("Orders", EVERYONE),
        TabEntry::restricted("Agreements", EVERYONE),
        TabEntry::restricted("Shipments", EVERYONE),
        TabEntry::restricted("Consigned Inventory", EVERYONE),
        TabEntry::restricted("Invoices & Payments", ADMIN_ONLY),
        TabEntry::restricted("Company Profile", ADMIN_ONLY),
    ];

    pub const ORDERS: &[TabEntry] = &[
        TabEntry::open("Manage Orders"),
        TabEntry::open("Manage Schedules"),
        TabEntry::open("Acknowledge Schedules"),
        TabEntry::open("Orders View"),
    ];

    pub const SHIPMENTS: &[TabEntry] = &[
        TabEntry::open("Manage Shipments"),
        TabEntry::open("Create ASN"),
        TabEntry::open("Upload ASN"),
        TabEntry::open("Create ASBN"),
        TabEntry::open("Returns"),
        TabEntry::open("View Receipts"),
    ];

    pub const INVOICES_PAYMENTS: &[TabEntry] = &[
        TabEntry::open("Create Invoice (No PO)"),
        TabEntry::open("View Invoices"),
        TabEntry::open("View Payments"),
    ];

    pub const ERP_MODULES: &[TabEntry] = &[
        TabEntry::open("Dashboard"),
        TabEntry::open("Product & Stock Management"),
        TabEntry::open("Stock In"),
        TabEntry::open("Stock Out"),
        TabEntry::open("Clients Management"),
        TabEntry::open("Vendor Management"),
        TabEntry::open("Invoices"),
        TabEntry::open("Purchase Orders"),
        TabEntry::open("Payment Entries"),
        TabEntry::open("Reports"),
        TabEntry::open("Supplier Portal"),
    ];

    /// Opens on the dashboard; tabs are gated by `role`.
    pub fn supplier_portal(role: Role) -> TabShell {
        TabShell::with_dashboard("Supplier Portal", SUPPLIER_PORTAL, role)
    }

    pub fn orders() -> TabShell {
        TabShell::new("Orders", ORDERS, Role::least_privileged())
    }

    pub fn shipments() -> TabShell {
        TabShell::new("Shipments", SHIPMENTS, Role::least_privileged())
    }

    pub fn invoices_payments() -> TabShell {
        TabShell::new("Invoices & Payments", INVOICES_PAYMENTS, Role::least_privileged())
    }

    pub fn erp_dashboard() -> TabShell {
        TabShell::new("ERP Dashboard", ERP_MODULES, Role::least_privileged())
    }
}
