use serde::{Deserialize, Serialize};

use tradedesk_core::value::{
    coerce_number, de_null_default, de_number, format_number, parse_date, require, require_number,
};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

/// Order total for a single line.
///
/// The only place the total is computed: add form, edit form and table cell
/// all go through here.
pub fn line_total(quantity: f64, price: f64) -> f64 {
    quantity * price
}

/// A purchase order for one product from one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub supplier: String,
    pub product: String,
    #[serde(deserialize_with = "de_number")]
    pub quantity: f64,
    #[serde(deserialize_with = "de_number")]
    pub price: f64,
    /// Sent to the backend for its convenience; never trusted on read.
    #[serde(default, deserialize_with = "de_number")]
    total: f64,
    pub order_date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub delivery_date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        line_total(self.quantity, self.price)
    }
}

impl Record for PurchaseOrder {
    const KIND: &'static str = "purchase order";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.supplier, &self.product]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.order_date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "supplier" => Some((&self.supplier).into()),
            "product" => Some((&self.product).into()),
            "quantity" => Some(self.quantity.into()),
            "price" => Some(self.price.into()),
            "total" => Some(self.total().into()),
            "orderDate" => Some((&self.order_date).into()),
            "deliveryDate" => Some((&self.delivery_date).into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("supplier", &self.supplier)?;
        require("product", &self.product)?;
        require("orderDate", &self.order_date)?;
        parse_date(&self.order_date)?;
        if !self.delivery_date.trim().is_empty() {
            parse_date(&self.delivery_date)?;
        }
        Ok(())
    }
}

impl Tabular for PurchaseOrder {
    fn headers() -> Vec<&'static str> {
        vec!["Supplier", "Product", "Quantity", "Price", "Total", "Order Date", "Delivery Date"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.supplier.clone(),
            self.product.clone(),
            format_number(self.quantity),
            format!("Rs {}", format_number(self.price)),
            format!("Rs {}", format_number(self.total())),
            self.order_date.clone(),
            self.delivery_date.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderDraft {
    pub supplier: String,
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub order_date: String,
    pub delivery_date: String,
    pub notes: String,
}

tradedesk_core::form_fields!(PurchaseOrderDraft {
    "supplier" => supplier,
    "product" => product,
    "quantity" => quantity,
    "price" => price,
    "orderDate" => order_date,
    "deliveryDate" => delivery_date,
    "notes" => notes,
});

impl PurchaseOrderDraft {
    /// Live total shown next to the form inputs; `None` while either input
    /// is not a number.
    pub fn total(&self) -> Option<f64> {
        let quantity = coerce_number("quantity", &self.quantity).ok()?;
        let price = coerce_number("price", &self.price).ok()?;
        Some(line_total(quantity, price))
    }
}

impl Draft for PurchaseOrderDraft {
    type Record = PurchaseOrder;

    fn to_record(&self) -> DomainResult<PurchaseOrder> {
        require("supplier", &self.supplier)?;
        require("product", &self.product)?;
        let quantity = require_number("quantity", &self.quantity)?;
        let price = require_number("price", &self.price)?;
        let order = PurchaseOrder {
            id: None,
            supplier: self.supplier.trim().to_string(),
            product: self.product.trim().to_string(),
            quantity,
            price,
            total: line_total(quantity, price),
            order_date: self.order_date.trim().to_string(),
            delivery_date: self.delivery_date.trim().to_string(),
            notes: self.notes.trim().to_string(),
        };
        order.validate()?;
        Ok(order)
    }

    fn from_record(record: &PurchaseOrder) -> Self {
        Self {
            supplier: record.supplier.clone(),
            product: record.product.clone(),
            quantity: format_number(record.quantity),
            price: format_number(record.price),
            order_date: record.order_date.clone(),
            delivery_date: record.delivery_date.clone(),
            notes: record.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(quantity: &str, price: &str) -> PurchaseOrderDraft {
        let mut draft = PurchaseOrderDraft::default();
        draft
            .apply([
                ("supplier", "Lucky Cement"),
                ("product", "OPC 50kg"),
                ("quantity", quantity),
                ("price", price),
                ("orderDate", "2024-06-01"),
            ])
            .unwrap();
        draft
    }

    #[test]
    fn total_is_identical_in_add_form_edit_form_and_cell() {
        let add = draft("3", "150");
        assert_eq!(add.total(), Some(450.0));

        let order = add.to_record().unwrap();
        assert_eq!(order.total(), 450.0);
        assert_eq!(order.cells()[4], "Rs 450");

        let edit = PurchaseOrderDraft::from_record(&order);
        assert_eq!(edit.total(), Some(450.0));
    }

    #[test]
    fn payload_carries_numeric_quantity_price_and_total() {
        let payload = serde_json::to_value(draft("3", "150").to_record().unwrap()).unwrap();
        assert_eq!(payload["quantity"], 3.0);
        assert_eq!(payload["price"], 150.0);
        assert_eq!(payload["total"], 450.0);
        assert_eq!(payload["orderDate"], "2024-06-01");
    }

    #[test]
    fn stale_server_total_is_ignored() {
        let json = r#"{"_id":"po1","supplier":"A","product":"B","quantity":3,"price":"150","total":1,"orderDate":"2024-06-01"}"#;
        let order: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.total(), 450.0);
    }

    #[test]
    fn live_total_is_none_for_non_numeric_input() {
        assert_eq!(draft("three", "150").total(), None);
        assert!(draft("three", "150").to_record().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the form preview and the persisted record agree on the total.
        #[test]
        fn preview_matches_record_total(q in 0u32..10_000, p in 0u32..100_000) {
            let d = draft(&q.to_string(), &p.to_string());
            let order = d.to_record().unwrap();
            prop_assert_eq!(d.total(), Some(order.total()));
            prop_assert_eq!(order.total(), f64::from(q) * f64::from(p));
        }
    }
}
