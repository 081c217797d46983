use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, de_number, format_number};
use tradedesk_core::{Record, RecordId, SortValue, Tabular};

/// One billed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    #[serde(default, deserialize_with = "de_number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub price: f64,
}

impl InvoiceItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

/// An invoice issued to a client.
///
/// The listing endpoint reports `createdAt`/`totalAmount`; both spellings are
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub client_name: String,
    pub invoice_number: String,
    #[serde(default, alias = "createdAt", deserialize_with = "de_null_default")]
    pub date: String,
    #[serde(default, alias = "totalAmount", deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub items: Vec<InvoiceItem>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub description: String,
}

impl Invoice {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(InvoiceItem::line_total).sum()
    }

    /// Billed total: the sum of the lines when the invoice has any, otherwise
    /// the stored amount.
    pub fn grand_total(&self) -> f64 {
        if self.items.is_empty() {
            self.amount
        } else {
            self.items_total()
        }
    }

    /// Date part of `date`/`createdAt` for display.
    pub fn display_date(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

impl Record for Invoice {
    const KIND: &'static str = "invoice";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.client_name, &self.invoice_number]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "clientName" => Some((&self.client_name).into()),
            "invoiceNumber" => Some((&self.invoice_number).into()),
            "date" | "createdAt" => Some((&self.date).into()),
            "amount" | "totalAmount" => Some(self.grand_total().into()),
            _ => None,
        }
    }
}

impl Tabular for Invoice {
    fn headers() -> Vec<&'static str> {
        vec!["Invoice #", "Client", "Date", "Items", "Total"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.invoice_number.clone(),
            self.client_name.clone(),
            self.display_date().to_string(),
            self.items.len().to_string(),
            format_number(self.grand_total()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_listing_field_names() {
        let json = r#"{
            "_id": "inv1",
            "clientName": "Ali Builders",
            "invoiceNumber": "INV-0042",
            "createdAt": "2024-02-10T08:30:00.000Z",
            "totalAmount": 900,
            "items": [
                {"name": "Cement", "quantity": 2, "price": 300},
                {"name": "Sand", "quantity": "3", "price": 100}
            ]
        }"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.display_date(), "2024-02-10");
        assert_eq!(invoice.amount, 900.0);
        assert_eq!(invoice.items_total(), 900.0);
        assert_eq!(invoice.cells(), vec!["INV-0042", "Ali Builders", "2024-02-10", "2", "900"]);
    }

    #[test]
    fn grand_total_falls_back_to_amount_without_items() {
        let invoice: Invoice =
            serde_json::from_str(r#"{"invoiceNumber":"INV-1","amount":120.5,"items":null}"#).unwrap();
        assert_eq!(invoice.grand_total(), 120.5);
        assert!(invoice.id.is_none());
    }
}
