use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, de_number, format_number, parse_date, require, require_number};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    pub enum PaymentMethod for "method" {
        Cash => "Cash",
        BankTransfer => "Bank Transfer",
        Cheque => "Cheque",
        Other => "Other",
    }
    default Cash
}

/// Money received from a payer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub payer: String,
    #[serde(deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    pub date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
}

impl Record for PaymentEntry {
    const KIND: &'static str = "payment";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.payer]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "payer" => Some((&self.payer).into()),
            "amount" => Some(self.amount.into()),
            "method" => Some(self.method.as_str().into()),
            "date" => Some((&self.date).into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("payer", &self.payer)?;
        require("date", &self.date)?;
        parse_date(&self.date).map(|_| ())
    }
}

impl Tabular for PaymentEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Payer", "Amount", "Method", "Date", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.payer.clone(),
            format_number(self.amount),
            self.method.to_string(),
            self.date.clone(),
            self.notes.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEntryDraft {
    pub payer: String,
    pub amount: String,
    pub method: String,
    pub date: String,
    pub notes: String,
}

impl Default for PaymentEntryDraft {
    fn default() -> Self {
        Self {
            payer: String::new(),
            amount: String::new(),
            method: PaymentMethod::default().to_string(),
            date: String::new(),
            notes: String::new(),
        }
    }
}

tradedesk_core::form_fields!(PaymentEntryDraft {
    "payer" => payer,
    "amount" => amount,
    "method" => method,
    "date" => date,
    "notes" => notes,
});

impl Draft for PaymentEntryDraft {
    type Record = PaymentEntry;

    fn to_record(&self) -> DomainResult<PaymentEntry> {
        require("payer", &self.payer)?;
        let entry = PaymentEntry {
            id: None,
            payer: self.payer.trim().to_string(),
            amount: require_number("amount", &self.amount)?,
            method: self.method.parse()?,
            date: self.date.trim().to_string(),
            notes: self.notes.trim().to_string(),
        };
        entry.validate()?;
        Ok(entry)
    }

    fn from_record(record: &PaymentEntry) -> Self {
        Self {
            payer: record.payer.clone(),
            amount: format_number(record.amount),
            method: record.method.to_string(),
            date: record.date.clone(),
            notes: record.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_method_is_cash_and_amount_is_numeric() {
        let mut draft = PaymentEntryDraft::default();
        draft
            .apply([("payer", "Hamza Stores"), ("amount", "2500"), ("date", "2024-04-01")])
            .unwrap();
        let entry = draft.to_record().unwrap();
        assert_eq!(entry.method, PaymentMethod::Cash);
        let payload = serde_json::to_value(&entry).unwrap();
        assert_eq!(payload["amount"], 2500.0);
        assert_eq!(payload["method"], "Cash");
    }

    #[test]
    fn bank_transfer_label_round_trips() {
        let entry: PaymentEntry = serde_json::from_str(
            r#"{"_id":"p9","payer":"X","amount":10,"method":"Bank Transfer","date":"2024-04-02"}"#,
        )
        .unwrap();
        assert_eq!(entry.method, PaymentMethod::BankTransfer);
        assert_eq!(PaymentEntryDraft::from_record(&entry).method, "Bank Transfer");
    }
}
