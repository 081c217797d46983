//! Closed sets of labelled values (status, type and method pickers).

/// Compare two choice labels ignoring case and whitespace.
pub fn labels_match(label: &str, input: &str) -> bool {
    let mut a = label.chars().filter(|c| !c.is_whitespace());
    let mut b = input.chars().filter(|c| !c.is_whitespace());
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x.eq_ignore_ascii_case(&y) => continue,
            _ => return false,
        }
    }
}

/// Declare a serde-friendly enum whose wire form is a display label.
///
/// Generates `ALL`, `as_str`, `Default`, `Display` and a lenient `FromStr`
/// that reports [`DomainError::InvalidChoice`](crate::DomainError) with the
/// given field name.
#[macro_export]
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| $crate::choice::labels_match(v.as_str(), s))
                    .ok_or_else(|| $crate::DomainError::invalid_choice($field, s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::labels_match;
    use crate::DomainError;

    crate::choice_enum! {
        enum Method for "method" {
            Cash => "Cash",
            BankTransfer => "Bank Transfer",
        }
        default Cash
    }

    #[test]
    fn parses_labels_leniently() {
        assert_eq!("bank transfer".parse::<Method>().unwrap(), Method::BankTransfer);
        assert_eq!("BankTransfer".parse::<Method>().unwrap(), Method::BankTransfer);
        assert_eq!(Method::default(), Method::Cash);
        assert_eq!(
            "card".parse::<Method>().unwrap_err(),
            DomainError::invalid_choice("method", "card")
        );
    }

    #[test]
    fn wire_form_is_the_label() {
        let json = serde_json::to_string(&Method::BankTransfer).unwrap();
        assert_eq!(json, "\"Bank Transfer\"");
        assert!(labels_match("In Transit", "in transit"));
        assert!(!labels_match("Pending", "Pend"));
    }
}
