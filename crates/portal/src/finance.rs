//! Supplier-side invoices (raised without a purchase order) and payments.

use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, de_number, format_number, parse_date, require, require_number};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoice {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub client_name: String,
    pub invoice_number: String,
    pub date: String,
    #[serde(deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub description: String,
}

impl Record for SupplierInvoice {
    const KIND: &'static str = "supplier invoice";

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
            "date" => Some((&self.date).into()),
            "amount" => Some(self.amount.into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("clientName", &self.client_name)?;
        require("invoiceNumber", &self.invoice_number)?;
        require("date", &self.date)?;
        parse_date(&self.date).map(|_| ())
    }
}

impl Tabular for SupplierInvoice {
    fn headers() -> Vec<&'static str> {
        vec!["Invoice #", "Client", "Date", "Amount", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.invoice_number.clone(),
            self.client_name.clone(),
            self.date.clone(),
            format_number(self.amount),
            self.description.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierInvoiceDraft {
    pub client_name: String,
    pub invoice_number: String,
    pub date: String,
    pub amount: String,
    pub description: String,
}

tradedesk_core::form_fields!(SupplierInvoiceDraft {
    "clientName" => client_name,
    "invoiceNumber" => invoice_number,
    "date" => date,
    "amount" => amount,
    "description" => description,
});

impl Draft for SupplierInvoiceDraft {
    type Record = SupplierInvoice;

    fn to_record(&self) -> DomainResult<SupplierInvoice> {
        require("clientName", &self.client_name)?;
        require("invoiceNumber", &self.invoice_number)?;
        require("date", &self.date)?;
        let invoice = SupplierInvoice {
            id: None,
            client_name: self.client_name.trim().to_string(),
            invoice_number: self.invoice_number.trim().to_string(),
            date: self.date.trim().to_string(),
            amount: require_number("amount", &self.amount)?,
            description: self.description.trim().to_string(),
        };
        invoice.validate()?;
        Ok(invoice)
    }

    fn from_record(record: &SupplierInvoice) -> Self {
        Self {
            client_name: record.client_name.clone(),
            invoice_number: record.invoice_number.clone(),
            date: record.date.clone(),
            amount: format_number(record.amount),
            description: record.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub client_name: String,
    pub reference: String,
    pub date: String,
    #[serde(deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub method: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub remarks: String,
}

impl Record for SupplierPayment {
    const KIND: &'static str = "supplier payment";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.client_name, &self.reference]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "clientName" => Some((&self.client_name).into()),
            "reference" => Some((&self.reference).into()),
            "date" => Some((&self.date).into()),
            "amount" => Some(self.amount.into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("clientName", &self.client_name)?;
        require("reference", &self.reference)?;
        require("date", &self.date)?;
        parse_date(&self.date).map(|_| ())
    }
}

impl Tabular for SupplierPayment {
    fn headers() -> Vec<&'static str> {
        vec!["Client", "Reference", "Date", "Amount", "Method", "Remarks"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.client_name.clone(),
            self.reference.clone(),
            self.date.clone(),
            format_number(self.amount),
            self.method.clone(),
            self.remarks.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPaymentDraft {
    pub client_name: String,
    pub reference: String,
    pub date: String,
    pub amount: String,
    pub method: String,
    pub remarks: String,
}

tradedesk_core::form_fields!(SupplierPaymentDraft {
    "clientName" => client_name,
    "reference" => reference,
    "date" => date,
    "amount" => amount,
    "method" => method,
    "remarks" => remarks,
});

impl Draft for SupplierPaymentDraft {
    type Record = SupplierPayment;

    fn to_record(&self) -> DomainResult<SupplierPayment> {
        require("clientName", &self.client_name)?;
        require("reference", &self.reference)?;
        require("date", &self.date)?;
        let payment = SupplierPayment {
            id: None,
            client_name: self.client_name.trim().to_string(),
            reference: self.reference.trim().to_string(),
            date: self.date.trim().to_string(),
            amount: require_number("amount", &self.amount)?,
            method: self.method.trim().to_string(),
            remarks: self.remarks.trim().to_string(),
        };
        payment.validate()?;
        Ok(payment)
    }

    fn from_record(record: &SupplierPayment) -> Self {
        Self {
            client_name: record.client_name.clone(),
            reference: record.reference.clone(),
            date: record.date.clone(),
            amount: format_number(record.amount),
            method: record.method.clone(),
            remarks: record.remarks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_core::DomainError;

    #[test]
    fn no_po_invoice_requires_amount() {
        let mut draft = SupplierInvoiceDraft::default();
        draft
            .apply([
                ("clientName", "Ali Builders"),
                ("invoiceNumber", "SI-77"),
                ("date", "2024-08-01"),
            ])
            .unwrap();
        assert_eq!(draft.to_record().unwrap_err(), DomainError::missing_field("amount"));

        draft.set("amount", "15000").unwrap();
        let invoice = draft.to_record().unwrap();
        assert_eq!(serde_json::to_value(&invoice).unwrap()["amount"], 15000.0);
    }

    #[test]
    fn payments_search_client_and_reference() {
        let payment: SupplierPayment = serde_json::from_str(
            r#"{"_id":"sp1","clientName":"Ali","reference":"TXN-9","date":"2024-08-02","amount":"500","method":"Cheque"}"#,
        )
        .unwrap();
        assert_eq!(payment.search_fields(), vec!["Ali", "TXN-9"]);
        assert_eq!(payment.amount, 500.0);
    }
}
