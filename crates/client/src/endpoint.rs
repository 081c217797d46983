//! Collection endpoints of both backends.

/// Which API root a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Erp,
    Portal,
}

/// Whether requests carry the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Bearer,
}

/// A REST collection: `GET {path}` lists, `POST {path}` creates,
/// `PUT/DELETE {path}/{id}` mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub backend: Backend,
    pub path: &'static str,
    /// Listing path when it differs from `path`.
    pub list_path: Option<&'static str>,
    pub access: Access,
}

impl Endpoint {
    pub const fn erp(path: &'static str) -> Self {
        Self {
            backend: Backend::Erp,
            path,
            list_path: None,
            access: Access::Public,
        }
    }

    pub const fn portal(path: &'static str) -> Self {
        Self {
            backend: Backend::Portal,
            path,
            list_path: None,
            access: Access::Bearer,
        }
    }

    pub const fn portal_public(path: &'static str) -> Self {
        Self {
            backend: Backend::Portal,
            path,
            list_path: None,
            access: Access::Public,
        }
    }

    pub const fn listed_at(mut self, list_path: &'static str) -> Self {
        self.list_path = Some(list_path);
        self
    }

    pub fn collection_path(&self) -> &'static str {
        match self.list_path {
            Some(path) => path,
            None => self.path,
        }
    }
}

pub mod endpoints {
    use super::Endpoint;

    // ERP
    pub const CLIENTS: Endpoint = Endpoint::erp("clients");
    pub const PRODUCTS: Endpoint = Endpoint::erp("products");
    pub const STOCK_IN: Endpoint = Endpoint::erp("stockin");
    pub const STOCK_OUT: Endpoint = Endpoint::erp("stock-out");
    pub const PURCHASE_ORDERS: Endpoint = Endpoint::erp("purchaseOrders");
    pub const PAYMENT_ENTRIES: Endpoint = Endpoint::erp("payments");
    pub const INVOICES: Endpoint = Endpoint::erp("invoice").listed_at("invoice/view");
    pub const REPORT: Endpoint = Endpoint::erp("report");

    // Supplier portal
    pub const VENDORS: Endpoint = Endpoint::portal_public("vendors");
    pub const ORDERS: Endpoint = Endpoint::portal("orders");
    pub const SCHEDULES: Endpoint = Endpoint::portal("schedules");
    pub const SHIPMENTS: Endpoint = Endpoint::portal("shipments");
    pub const AGREEMENTS: Endpoint = Endpoint::portal("agreements");
    pub const RETURNS: Endpoint = Endpoint::portal("returns");
    pub const ASNS: Endpoint = Endpoint::portal("asns");
    pub const ASN_FILES: Endpoint = Endpoint::portal_public("asn").listed_at("asn/all");
    pub const ASN_UPLOAD: Endpoint = Endpoint::portal_public("asn/upload");
    pub const ASBNS: Endpoint = Endpoint::portal("asbns");
    pub const CONSIGNED_INVENTORY: Endpoint = Endpoint::portal("consignedInventory");
    pub const RECEIPTS: Endpoint = Endpoint::portal_public("receipts");
    pub const SUPPLIER_INVOICES: Endpoint = Endpoint::portal("invoices");
    pub const SUPPLIER_INVOICES_NO_PO: Endpoint =
        Endpoint::portal("invoices/no-po").listed_at("invoices");
    pub const SUPPLIER_PAYMENTS: Endpoint = Endpoint::portal("payments");
    pub const PROFILE: Endpoint = Endpoint::portal("profile");
    pub const PROFILE_PASSWORD: Endpoint = Endpoint::portal("profile/password");
    pub const DASHBOARD_SUMMARY: Endpoint = Endpoint::portal("dashboard/summary");
    pub const AUTH_LOGIN: Endpoint = Endpoint::portal_public("auth/login");
    pub const AUTH_ME: Endpoint = Endpoint::portal("auth/me");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoices_list_and_mutate_on_different_paths() {
        assert_eq!(endpoints::INVOICES.collection_path(), "invoice/view");
        assert_eq!(endpoints::INVOICES.path, "invoice");
        assert_eq!(endpoints::CLIENTS.collection_path(), "clients");
    }

    #[test]
    fn portal_endpoints_require_bearer_except_public_ones() {
        assert_eq!(endpoints::ORDERS.access, Access::Bearer);
        assert_eq!(endpoints::AUTH_LOGIN.access, Access::Public);
        assert_eq!(endpoints::RECEIPTS.access, Access::Public);
        assert_eq!(endpoints::CLIENTS.backend, Backend::Erp);
        assert_eq!(endpoints::VENDORS.backend, Backend::Portal);
    }
}
