use serde::{Deserialize, Serialize};

use tradedesk_core::value::{
    coerce_number, de_null_default, de_number, format_number, parse_date, parse_flag, require,
};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    pub enum ShipmentStatus for "status" {
        Pending => "Pending",
        InTransit => "In Transit",
        Delivered => "Delivered",
        Returned => "Returned",
    }
    default Pending
}

/// Goods dispatched by a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub shipment_number: String,
    pub vendor: String,
    pub date: String,
    #[serde(default)]
    pub status: ShipmentStatus,
    #[serde(default, deserialize_with = "de_null_default")]
    pub tracking_number: String,
}

impl Record for Shipment {
    const KIND: &'static str = "shipment";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.shipment_number]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "shipmentNumber" => Some((&self.shipment_number).into()),
            "vendor" => Some((&self.vendor).into()),
            "date" => Some((&self.date).into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("shipmentNumber", &self.shipment_number)?;
        require("vendor", &self.vendor)?;
        require("date", &self.date)?;
        parse_date(&self.date).map(|_| ())
    }
}

impl Tabular for Shipment {
    fn headers() -> Vec<&'static str> {
        vec!["Shipment #", "Vendor", "Date", "Status", "Tracking #"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.shipment_number.clone(),
            self.vendor.clone(),
            self.date.clone(),
            self.status.to_string(),
            self.tracking_number.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentDraft {
    pub shipment_number: String,
    pub vendor: String,
    pub date: String,
    pub status: String,
    pub tracking_number: String,
}

impl Default for ShipmentDraft {
    fn default() -> Self {
        Self {
            shipment_number: String::new(),
            vendor: String::new(),
            date: String::new(),
            status: ShipmentStatus::default().to_string(),
            tracking_number: String::new(),
        }
    }
}

tradedesk_core::form_fields!(ShipmentDraft {
    "shipmentNumber" => shipment_number,
    "vendor" => vendor,
    "date" => date,
    "status" => status,
    "trackingNumber" => tracking_number,
});

impl Draft for ShipmentDraft {
    type Record = Shipment;

    fn to_record(&self) -> DomainResult<Shipment> {
        let shipment = Shipment {
            id: None,
            shipment_number: self.shipment_number.trim().to_string(),
            vendor: self.vendor.trim().to_string(),
            date: self.date.trim().to_string(),
            status: self.status.parse()?,
            tracking_number: self.tracking_number.trim().to_string(),
        };
        shipment.validate()?;
        Ok(shipment)
    }

    fn from_record(record: &Shipment) -> Self {
        Self {
            shipment_number: record.shipment_number.clone(),
            vendor: record.vendor.clone(),
            date: record.date.clone(),
            status: record.status.to_string(),
            tracking_number: record.tracking_number.clone(),
        }
    }
}

/// Goods sent back against a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub return_number: String,
    pub shipment_number: String,
    pub return_date: String,
    #[serde(default, deserialize_with = "de_number")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub reason: String,
    #[serde(default)]
    pub refund_requested: bool,
}

impl Record for ReturnRequest {
    const KIND: &'static str = "return";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.return_number, &self.shipment_number]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.return_date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "returnNumber" => Some((&self.return_number).into()),
            "shipmentNumber" => Some((&self.shipment_number).into()),
            "returnDate" => Some((&self.return_date).into()),
            "quantity" => Some(self.quantity.into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("returnNumber", &self.return_number)?;
        require("shipmentNumber", &self.shipment_number)?;
        require("returnDate", &self.return_date)?;
        parse_date(&self.return_date).map(|_| ())
    }
}

impl Tabular for ReturnRequest {
    fn headers() -> Vec<&'static str> {
        vec!["Return #", "Shipment #", "Return Date", "Quantity", "Reason", "Refund"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.return_number.clone(),
            self.shipment_number.clone(),
            self.return_date.clone(),
            format_number(self.quantity),
            self.reason.clone(),
            if self.refund_requested { "Yes" } else { "No" }.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnDraft {
    pub return_number: String,
    pub shipment_number: String,
    pub return_date: String,
    pub quantity: String,
    pub reason: String,
    pub refund_requested: String,
}

tradedesk_core::form_fields!(ReturnDraft {
    "returnNumber" => return_number,
    "shipmentNumber" => shipment_number,
    "returnDate" => return_date,
    "quantity" => quantity,
    "reason" => reason,
    "refundRequested" => refund_requested,
});

impl Draft for ReturnDraft {
    type Record = ReturnRequest;

    fn to_record(&self) -> DomainResult<ReturnRequest> {
        let request = ReturnRequest {
            id: None,
            return_number: self.return_number.trim().to_string(),
            shipment_number: self.shipment_number.trim().to_string(),
            return_date: self.return_date.trim().to_string(),
            quantity: coerce_number("quantity", &self.quantity)?,
            reason: self.reason.trim().to_string(),
            refund_requested: parse_flag(&self.refund_requested),
        };
        request.validate()?;
        Ok(request)
    }

    fn from_record(record: &ReturnRequest) -> Self {
        Self {
            return_number: record.return_number.clone(),
            shipment_number: record.shipment_number.clone(),
            return_date: record.return_date.clone(),
            quantity: format_number(record.quantity),
            reason: record.reason.clone(),
            refund_requested: record.refund_requested.to_string(),
        }
    }
}

/// Advance shipping notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asn {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub asn_number: String,
    pub po_number: String,
    pub shipment_date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub carrier_name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub tracking_number: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
}

impl Record for Asn {
    const KIND: &'static str = "asn";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.asn_number, &self.po_number]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.shipment_date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "asnNumber" => Some((&self.asn_number).into()),
            "poNumber" => Some((&self.po_number).into()),
            "shipmentDate" => Some((&self.shipment_date).into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("asnNumber", &self.asn_number)?;
        require("poNumber", &self.po_number)?;
        require("shipmentDate", &self.shipment_date)?;
        parse_date(&self.shipment_date).map(|_| ())
    }
}

impl Tabular for Asn {
    fn headers() -> Vec<&'static str> {
        vec!["ASN #", "PO #", "Shipment Date", "Carrier", "Tracking #", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.asn_number.clone(),
            self.po_number.clone(),
            self.shipment_date.clone(),
            self.carrier_name.clone(),
            self.tracking_number.clone(),
            self.notes.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsnDraft {
    pub asn_number: String,
    pub po_number: String,
    pub shipment_date: String,
    pub carrier_name: String,
    pub tracking_number: String,
    pub notes: String,
}

tradedesk_core::form_fields!(AsnDraft {
    "asnNumber" => asn_number,
    "poNumber" => po_number,
    "shipmentDate" => shipment_date,
    "carrierName" => carrier_name,
    "trackingNumber" => tracking_number,
    "notes" => notes,
});

impl Draft for AsnDraft {
    type Record = Asn;

    fn to_record(&self) -> DomainResult<Asn> {
        let asn = Asn {
            id: None,
            asn_number: self.asn_number.trim().to_string(),
            po_number: self.po_number.trim().to_string(),
            shipment_date: self.shipment_date.trim().to_string(),
            carrier_name: self.carrier_name.trim().to_string(),
            tracking_number: self.tracking_number.trim().to_string(),
            notes: self.notes.trim().to_string(),
        };
        asn.validate()?;
        Ok(asn)
    }

    fn from_record(record: &Asn) -> Self {
        Self {
            asn_number: record.asn_number.clone(),
            po_number: record.po_number.clone(),
            shipment_date: record.shipment_date.clone(),
            carrier_name: record.carrier_name.clone(),
            tracking_number: record.tracking_number.clone(),
            notes: record.notes.clone(),
        }
    }
}

/// An uploaded ASN document (listed from `asn/all`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsnFile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Stored name under the uploads directory.
    pub filename: String,
    #[serde(rename = "originalname", default, deserialize_with = "de_null_default")]
    pub original_name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub upload_date: String,
}

impl Record for AsnFile {
    const KIND: &'static str = "asn file";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.original_name, &self.filename]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.upload_date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "originalname" => Some((&self.original_name).into()),
            "uploadDate" => Some((&self.upload_date).into()),
            _ => None,
        }
    }
}

impl Tabular for AsnFile {
    fn headers() -> Vec<&'static str> {
        vec!["File", "Uploaded", "Stored As"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.original_name.clone(),
            self.upload_date.clone(),
            self.filename.clone(),
        ]
    }
}

/// Advance shipment billing notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asbn {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub asbn_number: String,
    pub po_number: String,
    pub billing_date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub carrier_name: String,
    #[serde(default, deserialize_with = "de_number")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
}

impl Record for Asbn {
    const KIND: &'static str = "asbn";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.asbn_number, &self.po_number]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.billing_date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "asbnNumber" => Some((&self.asbn_number).into()),
            "poNumber" => Some((&self.po_number).into()),
            "billingDate" => Some((&self.billing_date).into()),
            "totalAmount" => Some(self.total_amount.into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("asbnNumber", &self.asbn_number)?;
        require("poNumber", &self.po_number)?;
        require("billingDate", &self.billing_date)?;
        parse_date(&self.billing_date).map(|_| ())
    }
}

impl Tabular for Asbn {
    fn headers() -> Vec<&'static str> {
        vec!["ASBN #", "PO #", "Billing Date", "Carrier", "Total Amount", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.asbn_number.clone(),
            self.po_number.clone(),
            self.billing_date.clone(),
            self.carrier_name.clone(),
            format_number(self.total_amount),
            self.notes.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsbnDraft {
    pub asbn_number: String,
    pub po_number: String,
    pub billing_date: String,
    pub carrier_name: String,
    pub total_amount: String,
    pub notes: String,
}

tradedesk_core::form_fields!(AsbnDraft {
    "asbnNumber" => asbn_number,
    "poNumber" => po_number,
    "billingDate" => billing_date,
    "carrierName" => carrier_name,
    "totalAmount" => total_amount,
    "notes" => notes,
});

impl Draft for AsbnDraft {
    type Record = Asbn;

    fn to_record(&self) -> DomainResult<Asbn> {
        let asbn = Asbn {
            id: None,
            asbn_number: self.asbn_number.trim().to_string(),
            po_number: self.po_number.trim().to_string(),
            billing_date: self.billing_date.trim().to_string(),
            carrier_name: self.carrier_name.trim().to_string(),
            total_amount: coerce_number("totalAmount", &self.total_amount)?,
            notes: self.notes.trim().to_string(),
        };
        asbn.validate()?;
        Ok(asbn)
    }

    fn from_record(record: &Asbn) -> Self {
        Self {
            asbn_number: record.asbn_number.clone(),
            po_number: record.po_number.clone(),
            billing_date: record.billing_date.clone(),
            carrier_name: record.carrier_name.clone(),
            total_amount: format_number(record.total_amount),
            notes: record.notes.clone(),
        }
    }
}

/// Goods receipt recorded by the buyer (read-only in the portal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub receipt_number: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub shipment_number: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub supplier: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub status: String,
}

impl Record for Receipt {
    const KIND: &'static str = "receipt";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.receipt_number, &self.shipment_number, &self.supplier]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "receiptNumber" => Some((&self.receipt_number).into()),
            "supplier" => Some((&self.supplier).into()),
            "date" => Some((&self.date).into()),
            _ => None,
        }
    }
}

impl Tabular for Receipt {
    fn headers() -> Vec<&'static str> {
        vec!["Receipt #", "Shipment #", "Supplier", "Date", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.receipt_number.clone(),
            self.shipment_number.clone(),
            self.supplier.clone(),
            self.date.clone(),
            self.status.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_core::DomainError;

    #[test]
    fn in_transit_status_uses_spaced_label() {
        let mut draft = ShipmentDraft::default();
        draft
            .apply([
                ("shipmentNumber", "SHP-12"),
                ("vendor", "Rehan Steel"),
                ("date", "2024-07-02"),
                ("status", "in transit"),
            ])
            .unwrap();
        let shipment = draft.to_record().unwrap();
        assert_eq!(shipment.status, ShipmentStatus::InTransit);
        assert_eq!(serde_json::to_value(&shipment).unwrap()["status"], "In Transit");
    }

    #[test]
    fn return_refund_flag_and_quantity() {
        let mut draft = ReturnDraft::default();
        draft
            .apply([
                ("returnNumber", "RET-3"),
                ("shipmentNumber", "SHP-12"),
                ("returnDate", "2024-07-09"),
                ("quantity", "4"),
                ("refundRequested", "true"),
            ])
            .unwrap();
        let request = draft.to_record().unwrap();
        assert!(request.refund_requested);
        assert_eq!(request.quantity, 4.0);
        assert_eq!(request.cells()[5], "Yes");
        assert_eq!(ReturnDraft::from_record(&request).refund_requested, "true");
    }

    #[test]
    fn asn_requires_shipment_date() {
        let mut draft = AsnDraft::default();
        draft.apply([("asnNumber", "ASN-1"), ("poNumber", "PO-1001")]).unwrap();
        assert_eq!(draft.to_record().unwrap_err(), DomainError::missing_field("shipmentDate"));
    }

    #[test]
    fn asbn_amount_is_numeric() {
        let mut draft = AsbnDraft::default();
        draft
            .apply([
                ("asbnNumber", "ASBN-1"),
                ("poNumber", "PO-1001"),
                ("billingDate", "2024-07-20"),
                ("totalAmount", "98000"),
            ])
            .unwrap();
        let payload = serde_json::to_value(draft.to_record().unwrap()).unwrap();
        assert_eq!(payload["totalAmount"], 98000.0);
    }

    #[test]
    fn asn_file_listing_shape() {
        let file: AsnFile = serde_json::from_str(
            r#"{"_id":"f1","filename":"1719-asn.pdf","originalname":"asn.pdf","uploadDate":"2024-07-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(file.original_name, "asn.pdf");
        assert_eq!(file.search_fields(), vec!["asn.pdf", "1719-asn.pdf"]);
    }

    #[test]
    fn receipts_search_three_fields() {
        let receipt: Receipt = serde_json::from_str(
            r#"{"_id":"r1","receiptNumber":"GRN-1","shipmentNumber":"SHP-9","supplier":"Rehan","date":"2024-07-03","status":"Received"}"#,
        )
        .unwrap();
        assert_eq!(receipt.search_fields().len(), 3);
        assert_eq!(receipt.status(), Some("Received"));
    }
}
