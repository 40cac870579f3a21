// 🔎 Entity Extractor - customer and account ids from free text
//
// First match wins for each pattern. No word boundaries: "C12345" yields
// "C1234", the same as the dashboard's client-side matcher.

use once_cell::sync::Lazy;
use regex::Regex;

static CUSTOMER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)C\d{3,4}").expect("valid customer id pattern"));

static ACCOUNT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)A\d{6}").expect("valid account id pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    pub customer_id: Option<String>,
    pub account_id: Option<String>,
}

pub struct EntityExtractor;

impl EntityExtractor {
    pub fn extract(text: &str) -> ExtractedEntities {
        ExtractedEntities {
            customer_id: Self::customer_id(text),
            account_id: Self::account_id(text),
        }
    }

    pub fn customer_id(text: &str) -> Option<String> {
        CUSTOMER_ID.find(text).map(|m| m.as_str().to_uppercase())
    }

    pub fn account_id(text: &str) -> Option<String> {
        ACCOUNT_ID.find(text).map(|m| m.as_str().to_uppercase())
    }
}
