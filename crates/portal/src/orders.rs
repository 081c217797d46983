use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, join_list, parse_date, require, split_list};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    pub enum OrderStatus for "status" {
        Pending => "Pending",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
    default Pending
}

tradedesk_core::choice_enum! {
    pub enum ScheduleStatus for "status" {
        Scheduled => "Scheduled",
        Delivered => "Delivered",
        Delayed => "Delayed",
    }
    default Scheduled
}

/// A customer order routed to a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub order_number: String,
    pub vendor: String,
    pub date: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "de_null_default")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub client_name: String,
}

impl Record for Order {
    const KIND: &'static str = "order";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.order_number, &self.vendor]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "orderNumber" => Some((&self.order_number).into()),
            "vendor" => Some((&self.vendor).into()),
            "date" => Some((&self.date).into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("orderNumber", &self.order_number)?;
        require("vendor", &self.vendor)?;
        require("date", &self.date)?;
        if self.items.is_empty() {
            return Err(tradedesk_core::DomainError::missing_field("items"));
        }
        parse_date(&self.date).map(|_| ())
    }
}

impl Tabular for Order {
    fn headers() -> Vec<&'static str> {
        vec!["Order #", "Vendor", "Client", "Date", "Status", "Items"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_number.clone(),
            self.vendor.clone(),
            self.client_name.clone(),
            self.date.clone(),
            self.status.to_string(),
            join_list(&self.items),
        ]
    }
}

/// Order form; `items` is typed as a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_number: String,
    pub vendor: String,
    pub date: String,
    pub status: String,
    pub items: String,
    pub client_name: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            order_number: String::new(),
            vendor: String::new(),
            date: String::new(),
            status: OrderStatus::default().to_string(),
            items: String::new(),
            client_name: String::new(),
        }
    }
}

tradedesk_core::form_fields!(OrderDraft {
    "orderNumber" => order_number,
    "vendor" => vendor,
    "date" => date,
    "status" => status,
    "items" => items,
    "clientName" => client_name,
});

impl Draft for OrderDraft {
    type Record = Order;

    fn to_record(&self) -> DomainResult<Order> {
        let order = Order {
            id: None,
            order_number: self.order_number.trim().to_string(),
            vendor: self.vendor.trim().to_string(),
            date: self.date.trim().to_string(),
            status: self.status.parse()?,
            items: split_list(&self.items),
            client_name: self.client_name.trim().to_string(),
        };
        order.validate()?;
        Ok(order)
    }

    fn from_record(record: &Order) -> Self {
        Self {
            order_number: record.order_number.clone(),
            vendor: record.vendor.clone(),
            date: record.date.clone(),
            status: record.status.to_string(),
            items: join_list(&record.items),
            client_name: record.client_name.clone(),
        }
    }
}

/// A planned delivery slot agreed with a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub schedule_number: String,
    pub vendor: String,
    pub delivery_date: String,
    #[serde(default)]
    pub status: ScheduleStatus,
    #[serde(default, deserialize_with = "de_null_default")]
    pub acknowledged_by: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
}

impl Schedule {
    pub fn is_acknowledged(&self) -> bool {
        !self.acknowledged_by.trim().is_empty()
    }

    /// Copy of this schedule acknowledged by `who`.
    pub fn acknowledged(&self, who: &str) -> DomainResult<Self> {
        require("acknowledgedBy", who)?;
        Ok(Self {
            acknowledged_by: who.trim().to_string(),
            ..self.clone()
        })
    }
}

impl Record for Schedule {
    const KIND: &'static str = "schedule";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.schedule_number, &self.vendor]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.delivery_date)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "scheduleNumber" => Some((&self.schedule_number).into()),
            "vendor" => Some((&self.vendor).into()),
            "deliveryDate" => Some((&self.delivery_date).into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("scheduleNumber", &self.schedule_number)?;
        require("vendor", &self.vendor)?;
        require("deliveryDate", &self.delivery_date)?;
        parse_date(&self.delivery_date).map(|_| ())
    }
}

impl Tabular for Schedule {
    fn headers() -> Vec<&'static str> {
        vec!["Schedule #", "Vendor", "Delivery Date", "Status", "Acknowledged By", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        let acknowledged = if self.is_acknowledged() {
            self.acknowledged_by.clone()
        } else {
            "-".to_string()
        };
        vec![
            self.schedule_number.clone(),
            self.vendor.clone(),
            self.delivery_date.clone(),
            self.status.to_string(),
            acknowledged,
            self.notes.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub schedule_number: String,
    pub vendor: String,
    pub delivery_date: String,
    pub status: String,
    pub acknowledged_by: String,
    pub notes: String,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            schedule_number: String::new(),
            vendor: String::new(),
            delivery_date: String::new(),
            status: ScheduleStatus::default().to_string(),
            acknowledged_by: String::new(),
            notes: String::new(),
        }
    }
}

tradedesk_core::form_fields!(ScheduleDraft {
    "scheduleNumber" => schedule_number,
    "vendor" => vendor,
    "deliveryDate" => delivery_date,
    "status" => status,
    "acknowledgedBy" => acknowledged_by,
    "notes" => notes,
});

impl Draft for ScheduleDraft {
    type Record = Schedule;

    fn to_record(&self) -> DomainResult<Schedule> {
        let schedule = Schedule {
            id: None,
            schedule_number: self.schedule_number.trim().to_string(),
            vendor: self.vendor.trim().to_string(),
            delivery_date: self.delivery_date.trim().to_string(),
            status: self.status.parse()?,
            acknowledged_by: self.acknowledged_by.trim().to_string(),
            notes: self.notes.trim().to_string(),
        };
        schedule.validate()?;
        Ok(schedule)
    }

    fn from_record(record: &Schedule) -> Self {
        Self {
            schedule_number: record.schedule_number.clone(),
            vendor: record.vendor.clone(),
            delivery_date: record.delivery_date.clone(),
            status: record.status.to_string(),
            acknowledged_by: record.acknowledged_by.clone(),
            notes: record.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_core::DomainError;

    fn order_draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft
            .apply([
                ("orderNumber", "PO-1001"),
                ("vendor", "Rehan Steel"),
                ("date", "2024-07-01"),
                ("items", "Rebar 10mm,  Rebar 12mm ,"),
            ])
            .unwrap();
        draft
    }

    #[test]
    fn items_are_split_on_commas_and_joined_for_edit() {
        let order = order_draft().to_record().unwrap();
        assert_eq!(order.items, vec!["Rebar 10mm", "Rebar 12mm"]);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(OrderDraft::from_record(&order).items, "Rebar 10mm, Rebar 12mm");

        let payload = serde_json::to_value(&order).unwrap();
        assert_eq!(payload["items"][1], "Rebar 12mm");
    }

    #[test]
    fn orders_search_number_and_vendor_only() {
        let mut draft = order_draft();
        draft.set("clientName", "Ali Traders").unwrap();
        let order = draft.to_record().unwrap();
        assert_eq!(order.search_fields(), vec!["PO-1001", "Rehan Steel"]);
    }

    #[test]
    fn order_needs_at_least_one_item() {
        let mut draft = order_draft();
        draft.set("items", " , ").unwrap();
        assert_eq!(draft.to_record().unwrap_err(), DomainError::missing_field("items"));
    }

    #[test]
    fn acknowledging_a_schedule() {
        let mut draft = ScheduleDraft::default();
        draft
            .apply([
                ("scheduleNumber", "SCH-7"),
                ("vendor", "Rehan Steel"),
                ("deliveryDate", "2024-07-15"),
            ])
            .unwrap();
        let schedule = draft.to_record().unwrap();
        assert!(!schedule.is_acknowledged());
        assert_eq!(schedule.cells()[4], "-");

        let acked = schedule.acknowledged(" Sana ").unwrap();
        assert!(acked.is_acknowledged());
        assert_eq!(acked.acknowledged_by, "Sana");
        assert!(schedule.acknowledged("").is_err());
    }

    #[test]
    fn status_filter_label() {
        let schedule: Schedule = serde_json::from_str(
            r#"{"_id":"s1","scheduleNumber":"SCH-1","vendor":"V","deliveryDate":"2024-01-01","status":"Delayed"}"#,
        )
        .unwrap();
        assert_eq!(schedule.status(), Some("Delayed"));
    }
}
