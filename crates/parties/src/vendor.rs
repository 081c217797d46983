use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, require};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

/// A supplier registered in the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub company: String,
    pub phone: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub email: String,
    /// GST registration number.
    #[serde(default, deserialize_with = "de_null_default")]
    pub gst: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub address: String,
}

impl Record for Vendor {
    const KIND: &'static str = "vendor";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.company]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some((&self.name).into()),
            "company" => Some((&self.company).into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("company", &self.company)?;
        require("phone", &self.phone)
    }
}

impl Tabular for Vendor {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Company", "Phone", "Email", "GST", "Address"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.company.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.gst.clone(),
            self.address.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorDraft {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub gst: String,
    pub address: String,
}

tradedesk_core::form_fields!(VendorDraft {
    "name" => name,
    "company" => company,
    "phone" => phone,
    "email" => email,
    "gst" => gst,
    "address" => address,
});

impl Draft for VendorDraft {
    type Record = Vendor;

    fn to_record(&self) -> DomainResult<Vendor> {
        let vendor = Vendor {
            id: None,
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            gst: self.gst.trim().to_string(),
            address: self.address.trim().to_string(),
        };
        vendor.validate()?;
        Ok(vendor)
    }

    fn from_record(record: &Vendor) -> Self {
        Self {
            name: record.name.clone(),
            company: record.company.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            gst: record.gst.clone(),
            address: record.address.clone(),
        }
    }
}
