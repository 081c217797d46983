use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_number, format_number};
use tradedesk_core::{DateRange, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    /// Side of a ledger movement.
    pub enum EntryType for "type" {
        Purchase => "Purchase",
        Payment => "Payment",
    }
    default Purchase
}

tradedesk_core::choice_enum! {
    /// Entry-type selector of the report filter.
    pub enum TypeFilter for "filter" {
        All => "All",
        Purchase => "Purchase",
        Payment => "Payment",
    }
    default All
}

impl TypeFilter {
    pub fn matches(&self, entry_type: EntryType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Purchase => entry_type == EntryType::Purchase,
            TypeFilter::Payment => entry_type == EntryType::Payment,
        }
    }
}

/// One dated movement in a party's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(deserialize_with = "de_number")]
    pub amount: f64,
}

impl Record for LedgerEntry {
    const KIND: &'static str = "ledger entry";

    fn id(&self) -> Option<&RecordId> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.entry_type.as_str()]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "date" => Some((&self.date).into()),
            "type" => Some(self.entry_type.as_str().into()),
            "amount" => Some(self.amount.into()),
            _ => None,
        }
    }
}

impl Tabular for LedgerEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Type", "Amount"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.entry_type.to_string(),
            format_number(self.amount),
        ]
    }
}

/// Entry in the list of known ledger names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerName {
    pub name: String,
}

/// A client's or vendor's full ledger as returned by the report endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    /// Required: a payload without an entry array is not a ledger.
    pub entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn filtered(&self, filter: &LedgerFilter) -> Vec<&LedgerEntry> {
        filter.apply(&self.entries)
    }

    pub fn summary(&self, filter: &LedgerFilter) -> LedgerSummary {
        LedgerSummary::from_entries(self.filtered(filter))
    }
}

/// Type and date-range filter of the ledger report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub entry_type: TypeFilter,
    pub dates: DateRange,
}

impl LedgerFilter {
    pub fn includes(&self, entry: &LedgerEntry) -> bool {
        self.entry_type.matches(entry.entry_type) && self.dates.contains_raw(Some(&entry.date))
    }

    pub fn apply<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        entries.iter().filter(|e| self.includes(e)).collect()
    }

    /// Header lines printed above the report table.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!("Filter: {}", self.entry_type)];
        if let Some(from) = self.dates.from {
            lines.push(format!("From: {}", from.format("%Y-%m-%d")));
        }
        if let Some(to) = self.dates.to {
            lines.push(format!("To: {}", to.format("%Y-%m-%d")));
        }
        lines
    }
}

/// Derived ledger totals; `balance = total_purchase - total_payment`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerSummary {
    pub total_purchase: f64,
    pub total_payment: f64,
    pub balance: f64,
}

impl LedgerSummary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let (total_purchase, total_payment) =
            entries
                .into_iter()
                .fold((0.0, 0.0), |(purchase, payment), e| match e.entry_type {
                    EntryType::Purchase => (purchase + e.amount, payment),
                    EntryType::Payment => (purchase, payment + e.amount),
                });
        Self {
            total_purchase,
            total_payment,
            balance: total_purchase - total_payment,
        }
    }

    /// Footer lines printed below the report table.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Total Purchases: {}", format_number(self.total_purchase)),
            format!("Total Payments: {}", format_number(self.total_payment)),
            format!("Balance: {}", format_number(self.balance)),
        ]
    }
}

/// Case-insensitive name lookup over the known ledger names.
pub fn filter_names<'a>(names: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    names
        .iter()
        .filter(|n| needle.is_empty() || n.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// File name for a saved ledger PDF (`ledger_report_Ali_Traders.pdf`).
pub fn report_file_name(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("ledger_report_{stem}.pdf")
}
