use serde::{Deserialize, Serialize};

use tradedesk_core::value::{coerce_number, de_null_default, de_number, format_number, require};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

/// Catalog entry with on-hand quantity and buy/sell prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub category: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub sku: String,
    #[serde(default, deserialize_with = "de_number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub purchase_price: f64,
    #[serde(default, deserialize_with = "de_number")]
    pub selling_price: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub description: String,
}

impl Product {
    /// Per-unit margin between selling and purchase price.
    pub fn unit_margin(&self) -> f64 {
        self.selling_price - self.purchase_price
    }

    /// Purchase value of the quantity on hand.
    pub fn stock_value(&self) -> f64 {
        self.quantity * self.purchase_price
    }
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.sku]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some((&self.name).into()),
            "category" => Some((&self.category).into()),
            "sku" => Some((&self.sku).into()),
            "quantity" => Some(self.quantity.into()),
            "purchasePrice" => Some(self.purchase_price.into()),
            "sellingPrice" => Some(self.selling_price.into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)
    }
}

impl Tabular for Product {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Category", "SKU", "Quantity", "Purchase Price", "Selling Price"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            self.sku.clone(),
            format_number(self.quantity),
            format_number(self.purchase_price),
            format_number(self.selling_price),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub sku: String,
    pub quantity: String,
    pub purchase_price: String,
    pub selling_price: String,
    pub description: String,
}

tradedesk_core::form_fields!(ProductDraft {
    "name" => name,
    "category" => category,
    "sku" => sku,
    "quantity" => quantity,
    "purchasePrice" => purchase_price,
    "sellingPrice" => selling_price,
    "description" => description,
});

impl Draft for ProductDraft {
    type Record = Product;

    fn to_record(&self) -> DomainResult<Product> {
        let product = Product {
            id: None,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            sku: self.sku.trim().to_string(),
            quantity: coerce_number("quantity", &self.quantity)?,
            purchase_price: coerce_number("purchasePrice", &self.purchase_price)?,
            selling_price: coerce_number("sellingPrice", &self.selling_price)?,
            description: self.description.trim().to_string(),
        };
        product.validate()?;
        Ok(product)
    }

    fn from_record(record: &Product) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            sku: record.sku.clone(),
            quantity: format_number(record.quantity),
            purchase_price: format_number(record.purchase_price),
            selling_price: format_number(record.selling_price),
            description: record.description.clone(),
        }
    }
}
