use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, de_number, format_number, parse_date, require, require_number};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

/// Server-side filter for the stock movement endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockQuery {
    pub search: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl StockQuery {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Query-string pairs (`search`, `dateFrom`, `dateTo`); unset bounds are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if let Some(from) = self.date_from {
            params.push(("dateFrom", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            params.push(("dateTo", to.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

macro_rules! stock_movement {
    (
        $(#[$meta:meta])*
        $record:ident, $draft:ident, kind = $kind:literal,
        counterparty = $party:ident ($party_wire:literal, $party_header:literal)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $record {
            #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
            pub id: Option<RecordId>,
            pub product_name: String,
            #[serde(deserialize_with = "de_number")]
            pub quantity: f64,
            #[serde(default, deserialize_with = "de_null_default")]
            pub $party: String,
            pub date: String,
            #[serde(default, deserialize_with = "de_null_default")]
            pub notes: String,
        }

        impl Record for $record {
            const KIND: &'static str = $kind;

            fn id(&self) -> Option<&RecordId> {
                self.id.as_ref()
            }

            fn search_fields(&self) -> Vec<&str> {
                vec![&self.product_name, &self.$party]
            }

            fn record_date(&self) -> Option<&str> {
                Some(&self.date)
            }

            fn sort_value(&self, field: &str) -> Option<SortValue> {
                match field {
                    "productName" => Some((&self.product_name).into()),
                    "quantity" => Some(self.quantity.into()),
                    $party_wire => Some((&self.$party).into()),
                    "date" => Some((&self.date).into()),
                    _ => None,
                }
            }

            fn validate(&self) -> DomainResult<()> {
                require("productName", &self.product_name)?;
                require("date", &self.date)?;
                parse_date(&self.date).map(|_| ())
            }
        }

        impl Tabular for $record {
            fn headers() -> Vec<&'static str> {
                vec!["Product", "Quantity", $party_header, "Date", "Notes"]
            }

            fn cells(&self) -> Vec<String> {
                vec![
                    self.product_name.clone(),
                    format_number(self.quantity),
                    self.$party.clone(),
                    self.date.clone(),
                    self.notes.clone(),
                ]
            }
        }

        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $draft {
            pub product_name: String,
            pub quantity: String,
            pub $party: String,
            pub date: String,
            pub notes: String,
        }

        tradedesk_core::form_fields!($draft {
            "productName" => product_name,
            "quantity" => quantity,
            $party_wire => $party,
            "date" => date,
            "notes" => notes,
        });

        impl Draft for $draft {
            type Record = $record;

            fn to_record(&self) -> DomainResult<$record> {
                require("productName", &self.product_name)?;
                let entry = $record {
                    id: None,
                    product_name: self.product_name.trim().to_string(),
                    quantity: require_number("quantity", &self.quantity)?,
                    $party: self.$party.trim().to_string(),
                    date: self.date.trim().to_string(),
                    notes: self.notes.trim().to_string(),
                };
                entry.validate()?;
                Ok(entry)
            }

            fn from_record(record: &$record) -> Self {
                Self {
                    product_name: record.product_name.clone(),
                    quantity: format_number(record.quantity),
                    $party: record.$party.clone(),
                    date: record.date.clone(),
                    notes: record.notes.clone(),
                }
            }
        }
    };
}

stock_movement! {
    /// Goods received into stock.
    StockIn, StockInDraft, kind = "stock-in",
    counterparty = supplier ("supplier", "Supplier")
}

stock_movement! {
    /// Goods issued out of stock.
    StockOut, StockOutDraft, kind = "stock-out",
    counterparty = recipient ("recipient", "Recipient")
}
