use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, require};
use tradedesk_core::{Draft, DomainResult, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    /// Client classification.
    pub enum ClientType for "type" {
        Retail => "Retail",
        Wholesale => "Wholesale",
        Other => "Other",
    }
    default Retail
}

/// A customer of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub phone: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub email: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub address: String,
    #[serde(rename = "type", default)]
    pub client_type: ClientType,
    /// CNIC number or free-form notes.
    #[serde(default, deserialize_with = "de_null_default")]
    pub cnic: String,
}

impl Record for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.phone]
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "name" => Some((&self.name).into()),
            "phone" => Some((&self.phone).into()),
            "type" => Some(self.client_type.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("name", &self.name)?;
        require("phone", &self.phone)
    }
}

impl Tabular for Client {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Phone", "Email", "Address", "Type", "CNIC"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.address.clone(),
            self.client_type.to_string(),
            self.cnic.clone(),
        ]
    }
}

/// Add/edit form state for [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub client_type: String,
    pub cnic: String,
}

impl Default for ClientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            client_type: ClientType::default().to_string(),
            cnic: String::new(),
        }
    }
}

tradedesk_core::form_fields!(ClientDraft {
    "name" => name,
    "phone" => phone,
    "email" => email,
    "address" => address,
    "type" => client_type,
    "cnic" => cnic,
});

impl Draft for ClientDraft {
    type Record = Client;

    fn to_record(&self) -> DomainResult<Client> {
        let client = Client {
            id: None,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            client_type: self.client_type.parse()?,
            cnic: self.cnic.trim().to_string(),
        };
        client.validate()?;
        Ok(client)
    }

    fn from_record(record: &Client) -> Self {
        Self {
            name: record.name.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            address: record.address.clone(),
            client_type: record.client_type.to_string(),
            cnic: record.cnic.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_core::DomainError;

    fn filled_draft() -> ClientDraft {
        let mut draft = ClientDraft::default();
        draft
            .apply([("name", "Ayesha Traders"), ("phone", "0300-1234567")])
            .unwrap();
        draft
    }

    #[test]
    fn empty_draft_defaults_to_retail() {
        let draft = ClientDraft::default();
        assert_eq!(draft.get("type"), Some("Retail"));
    }

    #[test]
    fn draft_requires_name_and_phone() {
        let mut draft = filled_draft();
        draft.set("phone", "  ").unwrap();
        assert_eq!(draft.to_record().unwrap_err(), DomainError::missing_field("phone"));
    }

    #[test]
    fn draft_rejects_unknown_type() {
        let mut draft = filled_draft();
        draft.set("type", "Corporate").unwrap();
        assert!(matches!(
            draft.to_record().unwrap_err(),
            DomainError::InvalidChoice { .. }
        ));
    }

    #[test]
    fn wire_shape_uses_mongo_id_and_type_key() {
        let json = r#"{"_id":"c1","name":"Ali","phone":"0321","type":"Wholesale","email":null}"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id.as_ref().map(RecordId::as_str), Some("c1"));
        assert_eq!(client.client_type, ClientType::Wholesale);
        assert_eq!(client.email, "");

        let out = serde_json::to_value(&client).unwrap();
        assert_eq!(out["type"], "Wholesale");
        assert_eq!(out["_id"], "c1");
    }

    #[test]
    fn edit_round_trips_through_draft() {
        let client = filled_draft().to_record().unwrap();
        let draft = ClientDraft::from_record(&client);
        assert_eq!(draft.to_record().unwrap(), client);
    }

    #[test]
    fn search_covers_name_and_phone() {
        let client = filled_draft().to_record().unwrap();
        assert_eq!(client.search_fields(), vec!["Ayesha Traders", "0300-1234567"]);
    }
}
