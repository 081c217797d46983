use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, require};
use tradedesk_core::{Draft, DomainError, DomainResult, Record, RecordId, Tabular};

/// The signed-in vendor's company profile (one per account).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub email: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub address: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub gst_number: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub ntn_number: String,
}

impl Record for Profile {
    const KIND: &'static str = "profile";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.company_name, &self.email]
    }

    fn validate(&self) -> DomainResult<()> {
        require("companyName", &self.company_name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(DomainError::validation("email address is not valid"));
        }
        Ok(())
    }
}

impl Tabular for Profile {
    fn headers() -> Vec<&'static str> {
        vec!["Company", "Email", "Phone", "Address", "GST #", "NTN #"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
            self.gst_number.clone(),
            self.ntn_number.clone(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gst_number: String,
    pub ntn_number: String,
}

tradedesk_core::form_fields!(ProfileDraft {
    "companyName" => company_name,
    "email" => email,
    "phone" => phone,
    "address" => address,
    "gstNumber" => gst_number,
    "ntnNumber" => ntn_number,
});

impl Draft for ProfileDraft {
    type Record = Profile;

    fn to_record(&self) -> DomainResult<Profile> {
        let profile = Profile {
            id: None,
            company_name: self.company_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            gst_number: self.gst_number.trim().to_string(),
            ntn_number: self.ntn_number.trim().to_string(),
        };
        profile.validate()?;
        Ok(profile)
    }

    fn from_record(record: &Profile) -> Self {
        Self {
            company_name: record.company_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            gst_number: record.gst_number.clone(),
            ntn_number: record.ntn_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_name_and_email_are_required() {
        let mut draft = ProfileDraft::default();
        draft.set("email", "ops@rehansteel.pk").unwrap();
        assert_eq!(draft.to_record().unwrap_err(), DomainError::missing_field("companyName"));

        draft.set("companyName", "Rehan Steel").unwrap();
        draft.set("email", "not-an-email").unwrap();
        assert!(matches!(draft.to_record().unwrap_err(), DomainError::Validation(_)));
    }

    #[test]
    fn tax_numbers_use_camel_case_keys() {
        let profile: Profile = serde_json::from_str(
            r#"{"companyName":"Rehan Steel","email":"a@b.pk","gstNumber":"GST-1","ntnNumber":null}"#,
        )
        .unwrap();
        assert_eq!(profile.gst_number, "GST-1");
        assert_eq!(profile.ntn_number, "");
    }
}
