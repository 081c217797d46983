use std::time::Duration;

pub const DEFAULT_ERP_URL: &str = "https://back-8.onrender.com/api";
pub const DEFAULT_PORTAL_URL: &str = "https://back-7-9sog.onrender.com/api";
pub const DEFAULT_UPLOADS_URL: &str = "https://back-7-9sog.onrender.com/uploads";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the two backends live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// ERP API root (clients, products, stock, invoices, payments, reports).
    pub erp_url: String,
    /// Supplier-portal API root (vendors, orders, shipments, auth, ...).
    pub portal_url: String,
    /// Static file root of the portal (uploaded ASN documents).
    pub uploads_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            erp_url: DEFAULT_ERP_URL.to_string(),
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            uploads_url: DEFAULT_UPLOADS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Both APIs served from one origin under `/api` (local backends, tests).
    pub fn single_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            erp_url: format!("{origin}/api"),
            portal_url: format!("{origin}/api"),
            uploads_url: format!("{origin}/uploads"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
