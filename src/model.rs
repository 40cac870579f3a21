// 🏦 Banking Snapshot - Read-only records the assistant queries
//
// The dashboard owns these records and ships a copy with every chat message.
// Nothing in this crate mutates a snapshot; tools only filter and format.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// CUSTOMER
// ============================================================================

/// Customer segment - closed set used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Retail,
    Corporate,
    #[serde(rename = "SME")]
    Sme,
    Wealth,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Retail => "Retail",
            CustomerType::Corporate => "Corporate",
            CustomerType::Sme => "SME",
            CustomerType::Wealth => "Wealth",
        }
    }

    /// Case-insensitive comparison against a free-text segment name
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Stable identifier, `C` followed by digits (e.g. "C001")
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub customer_type: CustomerType,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    // Dashboard-only fields, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_worth: Option<f64>,
}

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable identifier, `A` followed by six digits (e.g. "A101001")
    pub id: String,

    /// Owning customer (foreign key, not validated here)
    pub customer_id: String,

    /// Product name such as "Checking" or "Trade Finance"
    #[serde(rename = "type")]
    pub account_type: String,

    /// ISO 4217 code
    pub currency: String,

    pub balance: f64,

    #[serde(default)]
    pub status: String,
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    pub account_id: String,

    pub date: NaiveDate,

    #[serde(rename = "desc", alias = "description")]
    pub description: String,

    /// Signed amount, negative = debit
    pub amount: f64,

    #[serde(rename = "type", default)]
    pub category: String,

    /// "Posted", "Pending Auth", ...
    #[serde(default)]
    pub status: String,
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Full dataset handed to the assistant for one classify-and-respond cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub customers: Vec<Customer>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file in the dashboard's wire format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read snapshot file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse snapshot JSON")
    }

    pub fn accounts_for<'a>(&'a self, customer_id: &'a str) -> impl Iterator<Item = &'a Account> {
        self.accounts.iter().filter(move |a| a.customer_id == customer_id)
    }

    pub fn transactions_for<'a>(
        &'a self,
        account_id: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> {
        self.transactions.iter().filter(move |t| t.account_id == account_id)
    }

    /// The dashboard's built-in demo dataset
    pub fn seed() -> Self {
        serde_json::from_str(SEED_JSON).unwrap_or_default()
    }
}

const SEED_JSON: &str = r#"{
    "customers": [
        { "id": "C001", "name": "John Doe", "type": "Retail", "email": "john@example.com", "phone": "+1-555-0101", "risk": "Low", "kycStatus": "Verified", "netWorth": 154000 },
        { "id": "C002", "name": "Acme Corp International", "type": "Corporate", "email": "contact@acme.com", "phone": "+1-555-0999", "risk": "Medium", "kycStatus": "Review Needed", "netWorth": 5400000 },
        { "id": "C003", "name": "Sarah Smith", "type": "Retail", "email": "sarah@example.com", "phone": "+1-555-0102", "risk": "Low", "kycStatus": "Verified", "netWorth": 85000 },
        { "id": "C004", "name": "TechStart Inc", "type": "SME", "email": "info@techstart.io", "phone": "+1-555-0888", "risk": "High", "kycStatus": "Verified", "netWorth": 1200000 }
    ],
    "accounts": [
        { "id": "A101001", "customerId": "C001", "type": "Checking", "currency": "USD", "balance": 5420.50, "status": "Active" },
        { "id": "A101002", "customerId": "C001", "type": "Savings", "currency": "USD", "balance": 25000.00, "status": "Active" },
        { "id": "A202001", "customerId": "C002", "type": "Corporate Operating", "currency": "USD", "balance": 1250000.00, "status": "Active" },
        { "id": "A202002", "customerId": "C002", "type": "Trade Finance", "currency": "EUR", "balance": 450000.00, "status": "Active" },
        { "id": "A303001", "customerId": "C003", "type": "Checking", "currency": "USD", "balance": 1200.00, "status": "Active" }
    ],
    "transactions": [
        { "id": "T5510", "accountId": "A101001", "date": "2024-02-24", "desc": "Grocery Store", "amount": -150.00, "type": "Debit", "status": "Posted" },
        { "id": "T5511", "accountId": "A101001", "date": "2024-02-23", "desc": "Payroll Deposit", "amount": 3200.00, "type": "Credit", "status": "Posted" },
        { "id": "T5512", "accountId": "A202001", "date": "2024-02-24", "desc": "Vendor Payment #442", "amount": -12500.00, "type": "Debit", "status": "Pending Auth" }
    ]
}"#;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses() {
        let seed = Snapshot::seed();
        assert_eq!(seed.customers.len(), 4);
        assert_eq!(seed.accounts.len(), 5);
        assert_eq!(seed.transactions.len(), 3);
        let sme = seed.customers.iter().find(|c| c.id == "C004").unwrap();
        assert_eq!(sme.customer_type, CustomerType::Sme);
    }

    #[test]
    fn test_wire_format_fields() {
        let json = r#"{
            "transactions": [
                { "id": "T1", "accountId": "A000001", "date": "2024-01-02", "desc": "Coffee", "amount": -4.5 }
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert!(snapshot.customers.is_empty());
        let tx = &snapshot.transactions[0];
        assert_eq!(tx.description, "Coffee");
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(tx.amount, -4.5);
        assert_eq!(tx.status, "");
    }

    #[test]
    fn test_unknown_customer_type_rejected() {
        let json = r#"{ "customers": [ { "id": "C9", "name": "X", "type": "Martian" } ] }"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn test_customer_type_matches_case_insensitive() {
        assert!(CustomerType::Sme.matches("sme"));
        assert!(CustomerType::Retail.matches(" RETAIL "));
        assert!(!CustomerType::Wealth.matches("Retail"));
    }

    #[test]
    fn test_accounts_for_customer() {
        let seed = Snapshot::seed();
        let ids: Vec<&str> = seed.accounts_for("C001").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A101001", "A101002"]);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Snapshot::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot file"));
    }
}
