use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tradedesk_core::value::{de_null_default, parse_date, require};
use tradedesk_core::{Draft, DomainError, DomainResult, Record, RecordId, SortValue, Tabular};

tradedesk_core::choice_enum! {
    pub enum AgreementStatus for "status" {
        Active => "Active",
        Expired => "Expired",
    }
    default Active
}

/// A supply agreement with a vendor, optionally carrying a signed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub agreement_number: String,
    pub vendor: String,
    #[serde(rename = "type", default, deserialize_with = "de_null_default")]
    pub agreement_type: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub effective_date: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub expiry_date: String,
    #[serde(default)]
    pub status: AgreementStatus,
    #[serde(default, deserialize_with = "de_null_default")]
    pub notes: String,
    /// Server-side path of the attached document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Agreement {
    /// Whether the agreement has lapsed on `today` regardless of its stored
    /// status.
    pub fn is_lapsed(&self, today: NaiveDate) -> bool {
        self.status == AgreementStatus::Expired
            || parse_date(&self.expiry_date).is_ok_and(|expiry| expiry < today)
    }

    /// Text parts of a multipart create/update, in wire naming.
    pub fn form_parts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("agreementNumber", self.agreement_number.clone()),
            ("vendor", self.vendor.clone()),
            ("type", self.agreement_type.clone()),
            ("effectiveDate", self.effective_date.clone()),
            ("expiryDate", self.expiry_date.clone()),
            ("status", self.status.to_string()),
            ("notes", self.notes.clone()),
        ]
    }
}

impl Record for Agreement {
    const KIND: &'static str = "agreement";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.agreement_number, &self.vendor]
    }

    fn record_date(&self) -> Option<&str> {
        Some(&self.effective_date)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn sort_value(&self, field: &str) -> Option<SortValue> {
        match field {
            "agreementNumber" => Some((&self.agreement_number).into()),
            "vendor" => Some((&self.vendor).into()),
            "type" => Some((&self.agreement_type).into()),
            "effectiveDate" => Some((&self.effective_date).into()),
            "expiryDate" => Some((&self.expiry_date).into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        require("agreementNumber", &self.agreement_number)?;
        require("vendor", &self.vendor)?;
        let effective = if self.effective_date.trim().is_empty() {
            None
        } else {
            Some(parse_date(&self.effective_date)?)
        };
        let expiry = if self.expiry_date.trim().is_empty() {
            None
        } else {
            Some(parse_date(&self.expiry_date)?)
        };
        if let (Some(effective), Some(expiry)) = (effective, expiry) {
            if expiry < effective {
                return Err(DomainError::validation(
                    "expiry date is before the effective date",
                ));
            }
        }
        Ok(())
    }
}

impl Tabular for Agreement {
    fn headers() -> Vec<&'static str> {
        vec!["Agreement #", "Vendor", "Type", "Effective", "Expiry", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.agreement_number.clone(),
            self.vendor.clone(),
            self.agreement_type.clone(),
            self.effective_date.clone(),
            self.expiry_date.clone(),
            self.status.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementDraft {
    pub agreement_number: String,
    pub vendor: String,
    pub agreement_type: String,
    pub effective_date: String,
    pub expiry_date: String,
    pub status: String,
    pub notes: String,
}

impl Default for AgreementDraft {
    fn default() -> Self {
        Self {
            agreement_number: String::new(),
            vendor: String::new(),
            agreement_type: String::new(),
            effective_date: String::new(),
            expiry_date: String::new(),
            status: AgreementStatus::default().to_string(),
            notes: String::new(),
        }
    }
}

tradedesk_core::form_fields!(AgreementDraft {
    "agreementNumber" => agreement_number,
    "vendor" => vendor,
    "type" => agreement_type,
    "effectiveDate" => effective_date,
    "expiryDate" => expiry_date,
    "status" => status,
    "notes" => notes,
});

impl Draft for AgreementDraft {
    type Record = Agreement;

    fn to_record(&self) -> DomainResult<Agreement> {
        let agreement = Agreement {
            id: None,
            agreement_number: self.agreement_number.trim().to_string(),
            vendor: self.vendor.trim().to_string(),
            agreement_type: self.agreement_type.trim().to_string(),
            effective_date: self.effective_date.trim().to_string(),
            expiry_date: self.expiry_date.trim().to_string(),
            status: self.status.parse()?,
            notes: self.notes.trim().to_string(),
            file: None,
        };
        agreement.validate()?;
        Ok(agreement)
    }

    fn from_record(record: &Agreement) -> Self {
        Self {
            agreement_number: record.agreement_number.clone(),
            vendor: record.vendor.clone(),
            agreement_type: record.agreement_type.clone(),
            effective_date: record.effective_date.clone(),
            expiry_date: record.expiry_date.clone(),
            status: record.status.to_string(),
            notes: record.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> AgreementDraft {
        let mut draft = AgreementDraft::default();
        draft
            .apply([
                ("agreementNumber", "AGR-2024-01"),
                ("vendor", "Rehan Steel"),
                ("type", "Supply"),
                ("effectiveDate", "2024-01-01"),
                ("expiryDate", "2024-12-31"),
            ])
            .unwrap();
        draft
    }

    #[test]
    fn expiry_before_effective_is_rejected() {
        let mut d = draft();
        d.set("expiryDate", "2023-12-31").unwrap();
        assert!(matches!(d.to_record().unwrap_err(), DomainError::Validation(_)));
    }

    #[test]
    fn lapsed_by_date_or_status() {
        let agreement = draft().to_record().unwrap();
        let mid_year = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let next_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(!agreement.is_lapsed(mid_year));
        assert!(agreement.is_lapsed(next_year));

        let expired = Agreement {
            status: AgreementStatus::Expired,
            ..agreement
        };
        assert!(expired.is_lapsed(mid_year));
    }

    #[test]
    fn multipart_parts_use_wire_names() {
        let parts = draft().to_record().unwrap().form_parts();
        assert!(parts.contains(&("type", "Supply".to_string())));
        assert!(parts.contains(&("status", "Active".to_string())));
        assert_eq!(parts.len(), 7);
    }
}
