use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, de_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    #[serde(deserialize_with = "de_number")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyShipments {
    pub month: String,
    #[serde(deserialize_with = "de_number")]
    pub shipments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub product: String,
    #[serde(deserialize_with = "de_number")]
    pub qty: f64,
}

/// Aggregates shown on the supplier dashboard (`dashboard/summary`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "de_null_default")]
    pub orders_by_status: Vec<StatusCount>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub monthly_shipments: Vec<MonthlyShipments>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub inventory_levels: Vec<InventoryLevel>,
}

impl DashboardSummary {
    pub fn total_orders(&self) -> f64 {
        self.orders_by_status.iter().map(|s| s.value).sum()
    }

    pub fn total_shipments(&self) -> f64 {
        self.monthly_shipments.iter().map(|m| m.shipments).sum()
    }

    /// Products at or below `threshold`, lowest first.
    pub fn low_stock(&self, threshold: f64) -> Vec<&InventoryLevel> {
        let mut low: Vec<&InventoryLevel> = self
            .inventory_levels
            .iter()
            .filter(|level| level.qty <= threshold)
            .collect();
        low.sort_by(|a, b| a.qty.total_cmp(&b.qty));
        low
    }
}
