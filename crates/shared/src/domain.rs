use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FormError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(OrderId);

pub const NAME_MAX: usize = 25;
pub const DESCRIPTION_MAX: usize = 300;

pub const PRIVACY_POLICY_PATH: &str = "/privacy.pdf";

/// Service chips offered on the order form, addressed by index.
pub const SERVICES: [&str; 6] = [
    "сайт",
    "чат-боты",
    "ии-агенты",
    "трейд-бот",
    "ИИ-по ТЗ",
    "Другое",
];

pub fn service_label(index: usize) -> Option<&'static str> {
    SERVICES.get(index).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Phone,
    Telegram,
    Whatsapp,
}

impl ContactMethod {
    pub const ALL: [ContactMethod; 3] = [
        ContactMethod::Phone,
        ContactMethod::Telegram,
        ContactMethod::Whatsapp,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ContactMethod::Phone => "phone",
            ContactMethod::Telegram => "telegram",
            ContactMethod::Whatsapp => "whatsapp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactMethod::Phone => "Телефон",
            ContactMethod::Telegram => "Telegram",
            ContactMethod::Whatsapp => "WhatsApp",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() == value)
            .ok_or_else(|| FormError::UnknownContactMethod(value.to_string()))
    }
}

/// Organization record embedded as JSON-LD on the landing page.
#[derive(Debug, Clone, Copy)]
pub struct Organization {
    pub name: &'static str,
    pub url: &'static str,
    pub same_as: &'static [&'static str],
}

pub const ORGANIZATION: Organization = Organization {
    name: "ЭйАй Тех",
    url: "https://lovable.app",
    same_as: &["https://lovable.dev"],
};

impl Organization {
    pub fn json_ld(&self) -> serde_json::Value {
        serde_json::json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": self.name,
            "url": self.url,
            "sameAs": self.same_as,
        })
    }
}

/// Truncates `value` to at most `max` characters.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_method_round_trips_through_id() {
        for method in ContactMethod::ALL {
            assert_eq!(method.id().parse::<ContactMethod>().expect("parse"), method);
        }
        assert!(matches!(
            "fax".parse::<ContactMethod>(),
            Err(FormError::UnknownContactMethod(_))
        ));
    }

    #[test]
    fn organization_json_ld_has_schema_fields() {
        let ld = ORGANIZATION.json_ld();
        assert_eq!(ld["@type"], "Organization");
        assert_eq!(ld["name"], "ЭйАй Тех");
        assert_eq!(ld["sameAs"][0], "https://lovable.dev");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let cyrillic = "я".repeat(40);
        assert_eq!(truncate_chars(&cyrillic, NAME_MAX).chars().count(), NAME_MAX);
        assert_eq!(truncate_chars("short", NAME_MAX), "short");
    }
}
