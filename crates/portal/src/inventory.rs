use serde::{Deserialize, Serialize};

use tradedesk_core::value::{coerce_number, de_null_default, de_number, format_number, require};
use tradedesk_core::{Draft, DomainError, DomainResult, Record, RecordId, SortValue, Tabular};

/// Vendor-owned stock held at the buyer's site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsignedInventory {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub product: String,
    #[serde(default, deserialize_with = "de_number")]
    pub total_qty: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub consumed: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub unit: String,
    /// Last-updated date as reported by the backend.
    #[serde(default, deserialize_with = "de_null_default")]
    pub updated: String,
}

impl ConsignedInventory {
    pub fn remaining(&self) -> f64 {
        self.total_qty - self.consumed
    }

    /// Share of the consigned quantity already consumed, in percent.
    pub fn consumption_percent(&self) -> f64 {
        if self.total_qty <= 0.0 {
            0.0
        } else {
            (self.consumed / self.total_qty) * 100.0
        }
    }
}

impl Record for ConsignedInventory {
    const KIND: &'static str = "consigned item";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.product]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.updated)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "product" => Some((&self.product).into()),
            "totalQty" => Some(self.total_qty.into()),
            "consumed" => Some(self.consumed.into()),
            "remaining" => Some(self.remaining().into()),
            "updated" => Some((&self.updated).into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("product", &self.product)?;
        if self.consumed < 0.0 || self.total_qty < 0.0 {
            return Err(DomainError::validation("quantities cannot be negative"));
        }
        if self.consumed > self.total_qty {
            return Err(DomainError::validation(
                "consumed quantity exceeds the consigned total",
            ));
        }
        Ok(())
    }
}

impl Tabular for ConsignedInventory {
    fn headers() -> Vec<&'static str> {
        vec!["Product", "Total Qty", "Consumed", "Remaining", "Unit", "Updated"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product.clone(),
            format_number(self.total_qty),
            format_number(self.consumed),
            format_number(self.remaining()),
            self.unit.clone(),
            self.updated.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsignedInventoryDraft {
    pub product: String,
    pub total_qty: String,
    pub consumed: String,
    pub unit: String,
    pub updated: String,
}

tradedesk_core::form_fields!(ConsignedInventoryDraft {
    "product" => product,
    "totalQty" => total_qty,
    "consumed" => consumed,
    "unit" => unit,
    "updated" => updated,
});

impl Draft for ConsignedInventoryDraft {
    type Record = ConsignedInventory;

    fn to_record(&self) -> DomainResult<ConsignedInventory> {
        let item = ConsignedInventory {
            id: None,
            product: self.product.trim().to_string(),
            total_qty: coerce_number("totalQty", &self.total_qty)?,
            consumed: coerce_number("consumed", &self.consumed)?,
            unit: self.unit.trim().to_string(),
            updated: self.updated.trim().to_string(),
        };
        item.validate()?;
        Ok(item)
    }

    fn from_record(record: &ConsignedInventory) -> Self {
        Self {
            product: record.product.clone(),
            total_qty: format_number(record.total_qty),
            consumed: format_number(record.consumed),
            unit: record.unit.clone(),
            updated: record.updated.clone(),
        }
    }
}
