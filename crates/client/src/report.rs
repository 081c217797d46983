use tradedesk_accounting::{Ledger, LedgerName};

use crate::endpoint::endpoints;
use crate::error::ApiError;
use crate::http::ApiClient;

/// Read-only access to the ledger report endpoint.
#[derive(Debug, Clone)]
pub struct ReportService {
    client: ApiClient,
}

impl ReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Names of every client/vendor that has a ledger.
    pub async fn names(&self) -> Result<Vec<String>, ApiError> {
        let names: Vec<LedgerName> = self
            .client
            .get_json(&endpoints::REPORT, endpoints::REPORT.path, None, &[])
            .await?;
        tracing::info!("Fetched {} ledger names", names.len());
        Ok(names.into_iter().map(|n| n.name).collect())
    }

    /// Full ledger of one party. The name is sent as an encoded path segment.
    pub async fn ledger(&self, name: &str) -> Result<Ledger, ApiError> {
        let ledger: Ledger = self
            .client
            .get_json(&endpoints::REPORT, "report/name", Some(name), &[])
            .await?;
        tracing::info!("Fetched ledger for {} ({} entries)", ledger.name, ledger.entries.len());
        Ok(ledger)
    }
}
