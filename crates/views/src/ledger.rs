//! Ledger report screen: name lookup, filters, paging, totals and the PDF
//! report table.

use std::future::Future;

use tradedesk_accounting::{
    filter_names, Ledger, LedgerEntry, LedgerFilter, LedgerSummary, TypeFilter,
};
use tradedesk_client::{ApiError, ReportService, RequestSequence, Ticket};
use tradedesk_core::DateRange;
use tradedesk_export::ReportTable;

use crate::query::{Page, DEFAULT_PAGE_SIZE};
use crate::table::Notice;

pub const NAMES_FAILED: &str = "Failed to fetch clients/vendors. Check backend or CORS.";
pub const LEDGER_INVALID: &str = "Selected ledger data invalid.";
pub const LEDGER_FAILED: &str = "Failed to fetch ledger for selected name.";
pub const SELECT_FIRST: &str = "Select a client/vendor first.";

#[derive(Debug, Clone)]
pub struct LedgerView {
    names: Vec<String>,
    name_query: String,
    ledger: Option<Ledger>,
    filter: LedgerFilter,
    page: Page,
    notice: Option<Notice>,
}

impl Default for LedgerView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl LedgerView {
    pub fn new(page_size: usize) -> Self {
        Self {
            names: Vec::new(),
            name_query: String::new(),
            ledger: None,
            filter: LedgerFilter::default(),
            page: Page::first(page_size),
            notice: None,
        }
    }

    pub fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn set_name_query(&mut self, query: &str) {
        self.name_query = query.to_string();
    }

    /// Known names containing the lookup text (case-insensitive).
    pub fn matching_names(&self) -> Vec<&str> {
        filter_names(&self.names, &self.name_query)
    }

    pub fn set_ledger(&mut self, ledger: Ledger) {
        self.ledger = Some(ledger);
        self.page.reset();
    }

    pub fn clear_ledger(&mut self) {
        self.ledger = None;
        self.page.reset();
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    pub fn filter(&self) -> &LedgerFilter {
        &self.filter
    }

    pub fn set_type_filter(&mut self, entry_type: TypeFilter) {
        self.filter.entry_type = entry_type;
        self.page.reset();
    }

    pub fn set_date_range(&mut self, dates: DateRange) {
        self.filter.dates = dates;
        self.page.reset();
    }

    /// Filtered entries of the selected ledger (empty when none is selected).
    pub fn entries(&self) -> Vec<&LedgerEntry> {
        self.ledger
            .as_ref()
            .map(|l| l.filtered(&self.filter))
            .unwrap_or_default()
    }

    /// Totals over the filtered entries, recomputed on every call.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_entries(self.entries())
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn page_rows(&self) -> Vec<&LedgerEntry> {
        let entries = self.entries();
        let range = self.page.range(entries.len());
        entries[range].to_vec()
    }

    pub fn go_to_page(&mut self, number: usize) {
        let total = self.entries().len();
        self.page.go_to(number, total);
    }

    pub fn has_prev(&self) -> bool {
        self.page.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.page.has_next(self.entries().len())
    }

    /// Report table for the PDF export; `None` until a ledger is selected.
    pub fn report(&self) -> Option<ReportTable> {
        let ledger = self.ledger.as_ref()?;
        Some(
            ReportTable::from_records(format!("Ledger Report - {}", ledger.name), self.entries())
                .with_lines(self.filter.describe())
                .with_footer(self.summary().lines()),
        )
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

/// Loads names and ledgers into a [`LedgerView`].
#[derive(Debug)]
pub struct LedgerController {
    service: ReportService,
    view: LedgerView,
    sequence: RequestSequence,
}

impl LedgerController {
    pub fn new(service: ReportService, view: LedgerView) -> Self {
        Self {
            service,
            view,
            sequence: RequestSequence::new(),
        }
    }

    pub fn view(&self) -> &LedgerView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut LedgerView {
        &mut self.view
    }

    pub async fn load_names(&mut self) -> Result<(), ApiError> {
        match self.service.names().await {
            Ok(names) => {
                self.view.set_names(names);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch ledger names: {}", e);
                self.view.set_notice(Notice::error(NAMES_FAILED));
                Err(e)
            }
        }
    }

    /// Start fetching the ledger of `name`.
    pub fn begin_select(
        &self,
        name: &str,
    ) -> (
        Ticket,
        impl Future<Output = Result<Ledger, ApiError>> + Send + use<>,
    ) {
        let ticket = self.sequence.begin();
        let service = self.service.clone();
        let name = name.trim().to_string();
        (ticket, async move { service.ledger(&name).await })
    }

    /// Apply a finished fetch unless a newer selection superseded it.
    pub fn apply_select(
        &mut self,
        ticket: Ticket,
        result: Result<Ledger, ApiError>,
    ) -> Result<bool, ApiError> {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Discarding stale ledger (ticket {})", ticket.value());
            return Ok(false);
        }
        match result {
            Ok(ledger) => {
                self.view.clear_notice();
                self.view.set_ledger(ledger);
                Ok(true)
            }
            Err(e) => {
                let message = match &e {
                    ApiError::Parse(_) => LEDGER_INVALID,
                    _ => LEDGER_FAILED,
                };
                tracing::error!("Failed to fetch ledger: {}", e);
                self.view.clear_ledger();
                self.view.set_notice(Notice::error(message));
                Err(e)
            }
        }
    }

    /// Select a party by name. A blank name clears the selection.
    pub async fn select(&mut self, name: &str) -> Result<(), ApiError> {
        if name.trim().is_empty() {
            self.sequence.begin();
            self.view.clear_ledger();
            return Ok(());
        }
        let (ticket, fetch) = self.begin_select(name);
        let result = fetch.await;
        self.apply_select(ticket, result).map(|_| ())
    }

    /// Report table for the selected ledger, or a notice asking for a
    /// selection first.
    pub fn report(&mut self) -> Option<ReportTable> {
        let report = self.view.report();
        if report.is_none() {
            self.view.set_notice(Notice::error(SELECT_FIRST));
        }
        report
    }
}
