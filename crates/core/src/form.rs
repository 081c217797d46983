//! Form drafts: string-valued mirrors of a record's input fields.

use crate::error::{DomainError, DomainResult};
use crate::record::Record;

/// Named string slots of a draft, addressed by wire field name.
///
/// Usually generated with [`form_fields!`](crate::form_fields).
pub trait FormFields {
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// The editable form state for one record type.
///
/// `Default` is the empty form (including any preselected choices).
/// `to_record` is the only path from raw input to a typed payload: it enforces
/// required fields and coerces numbers explicitly.
pub trait Draft: FormFields + Default + Clone + core::fmt::Debug {
    type Record: Record;

    fn to_record(&self) -> DomainResult<Self::Record>;

    fn from_record(record: &Self::Record) -> Self;

    fn set(&mut self, name: &str, value: &str) -> DomainResult<()> {
        let slot = self
            .field_mut(name)
            .ok_or_else(|| DomainError::unknown_field(name))?;
        *slot = value.to_string();
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.field(name)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply `name=value` pairs, e.g. from command-line arguments.
    fn apply<'a, I>(&mut self, pairs: I) -> DomainResult<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            self.set(name, value)?;
        }
        Ok(())
    }
}

/// Implement [`FormFields`] by mapping wire names to `String` fields.
///
/// ```ignore
/// form_fields!(ClientDraft {
///     "name" => name,
///     "phone" => phone,
/// });
/// ```
#[macro_export]
macro_rules! form_fields {
    ($draft:ty { $($wire:literal => $field:ident),+ $(,)? }) => {
        impl $crate::form::FormFields for $draft {
            const FIELDS: &'static [&'static str] = &[$($wire),+];

            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    $($wire => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($wire => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::id::RecordId;
    use crate::value::{coerce_number, require};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        id: Option<RecordId>,
        name: String,
        qty: f64,
    }

    impl Record for Widget {
        const KIND: &'static str = "widget";

        fn id(&self) -> Option<&RecordId> {
            self.id.as_ref()
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    #[derive(Debug, Clone, Default)]
    struct WidgetDraft {
        name: String,
        qty: String,
    }

    crate::form_fields!(WidgetDraft {
        "name" => name,
        "qty" => qty,
    });

    impl Draft for WidgetDraft {
        type Record = Widget;

        fn to_record(&self) -> DomainResult<Widget> {
            require("name", &self.name)?;
            Ok(Widget {
                id: None,
                name: self.name.trim().to_string(),
                qty: coerce_number("qty", &self.qty)?,
            })
        }

        fn from_record(record: &Widget) -> Self {
            Self {
                name: record.name.clone(),
                qty: record.qty.to_string(),
            }
        }
    }

    #[test]
    fn set_and_get_by_wire_name() {
        let mut draft = WidgetDraft::default();
        draft.set("name", "Bolt").unwrap();
        draft.set("qty", "5").unwrap();
        assert_eq!(draft.get("name"), Some("Bolt"));
        assert_eq!(WidgetDraft::FIELDS, &["name", "qty"]);

        let record = draft.to_record().unwrap();
        assert_eq!(record.qty, 5.0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut draft = WidgetDraft::default();
        let err = draft.set("colour", "red").unwrap_err();
        assert_eq!(err, DomainError::unknown_field("colour"));
    }

    #[test]
    fn apply_and_reset() {
        let mut draft = WidgetDraft::default();
        draft.apply([("name", "Nut"), ("qty", "2")]).unwrap();
        assert_eq!(draft.get("qty"), Some("2"));
        draft.reset();
        assert_eq!(draft.get("name"), Some(""));
    }
}
