// 🧰 Data Query Tools - fixed registry of read-only snapshot queries
//
// Each tool is (snapshot, typed args) -> text. Loose JSON arguments from a
// classifier are validated into a `ToolCall` before anything runs.

use crate::error::ToolError;
use crate::model::{Account, Snapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Rows shown by get_balance before truncating
pub const MAX_BALANCE_ROWS: usize = 10;

/// Transactions shown by get_transactions
pub const MAX_TRANSACTIONS: usize = 5;

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetCustomers,
    GetBalance,
    GetTransactions,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [
        ToolName::GetCustomers,
        ToolName::GetBalance,
        ToolName::GetTransactions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetCustomers => "get_customers",
            ToolName::GetBalance => "get_balance",
            ToolName::GetTransactions => "get_transactions",
        }
    }

    /// One-line usage shown to the delegate and the CLI
    pub fn describe(&self) -> &'static str {
        match self {
            ToolName::GetCustomers => {
                "get_customers(type?: \"Retail\" | \"Corporate\" | \"SME\" | \"Wealth\") - list customers, optionally by segment"
            }
            ToolName::GetBalance => {
                "get_balance(customerId?: string like \"C001\") - account balances for one customer, or all accounts when omitted"
            }
            ToolName::GetTransactions => {
                "get_transactions(accountId: string like \"A101001\") - up to 5 recent transactions for an account"
            }
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s.trim())
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetCustomersArgs {
    /// Segment name; unknown names are allowed and simply match nothing
    #[serde(rename = "type", alias = "customer_type", default)]
    pub customer_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetBalanceArgs {
    #[serde(alias = "customer_id", default)]
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetTransactionsArgs {
    #[serde(alias = "account_id")]
    pub account_id: String,
}

/// A validated invocation of one registry tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    GetCustomers(GetCustomersArgs),
    GetBalance(GetBalanceArgs),
    GetTransactions(GetTransactionsArgs),
}

impl ToolCall {
    /// Build a call from a tool name and a loosely-typed argument mapping.
    ///
    /// `null` arguments are read as an empty mapping; any other non-object
    /// value and any key outside the tool's schema is rejected. Ids are
    /// trimmed and uppercased; blank optional values count as absent.
    pub fn from_parts(name: &str, args: Value) -> Result<ToolCall, ToolError> {
        let tool: ToolName = name.parse()?;
        let invalid = |source| ToolError::InvalidArgs {
            tool: tool.as_str(),
            source,
        };
        let args = match args {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(invalid(serde::de::Error::custom(format!(
                    "arguments must be an object, got {}",
                    other
                ))))
            }
        };

        let call = match tool {
            ToolName::GetCustomers => {
                let parsed: GetCustomersArgs = serde_json::from_value(args).map_err(invalid)?;
                ToolCall::GetCustomers(GetCustomersArgs {
                    customer_type: non_blank(parsed.customer_type).map(|t| t.trim().to_string()),
                })
            }
            ToolName::GetBalance => {
                let parsed: GetBalanceArgs = serde_json::from_value(args).map_err(invalid)?;
                ToolCall::GetBalance(GetBalanceArgs {
                    customer_id: non_blank(parsed.customer_id).map(|id| normalize_id(&id)),
                })
            }
            ToolName::GetTransactions => {
                let parsed: GetTransactionsArgs = serde_json::from_value(args).map_err(invalid)?;
                ToolCall::GetTransactions(GetTransactionsArgs {
                    account_id: normalize_id(&parsed.account_id),
                })
            }
        };

        Ok(call)
    }

    pub fn name(&self) -> ToolName {
        match self {
            ToolCall::GetCustomers(_) => ToolName::GetCustomers,
            ToolCall::GetBalance(_) => ToolName::GetBalance,
            ToolCall::GetTransactions(_) => ToolName::GetTransactions,
        }
    }

    pub fn execute(&self, snapshot: &Snapshot) -> String {
        match self {
            ToolCall::GetCustomers(args) => get_customers(snapshot, args),
            ToolCall::GetBalance(args) => get_balance(snapshot, args),
            ToolCall::GetTransactions(args) => get_transactions(snapshot, args),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_id(id: &str) -> String {
    id.trim().to_uppercase()
}

// ============================================================================
// TOOL IMPLEMENTATIONS
// ============================================================================

pub fn get_customers(snapshot: &Snapshot, args: &GetCustomersArgs) -> String {
    let filter = args.customer_type.as_deref();
    let matched: Vec<_> = snapshot
        .customers
        .iter()
        .filter(|c| filter.map_or(true, |t| c.customer_type.matches(t)))
        .collect();

    if matched.is_empty() {
        return match filter {
            Some(t) => format!("No {} customers found.", t),
            None => "No customers found.".to_string(),
        };
    }

    let names = matched
        .iter()
        .map(|c| format!("{} ({})", c.name, c.id))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Found {} customers: {}", matched.len(), names)
}

pub fn get_balance(snapshot: &Snapshot, args: &GetBalanceArgs) -> String {
    let accounts: Vec<&Account> = match args.customer_id.as_deref() {
        Some(id) => snapshot.accounts_for(id).collect(),
        None => snapshot.accounts.iter().collect(),
    };

    if accounts.is_empty() {
        return match args.customer_id.as_deref() {
            Some(id) => format!("No accounts found for {}.", id),
            None => "No accounts found.".to_string(),
        };
    }

    let mut lines: Vec<String> = accounts
        .iter()
        .take(MAX_BALANCE_ROWS)
        .map(|a| {
            format!(
                "{} {}: {} {}",
                a.id,
                a.account_type,
                a.currency,
                format_amount(a.balance)
            )
        })
        .collect();

    if accounts.len() > MAX_BALANCE_ROWS {
        lines.push(format!(
            "...and {} more accounts",
            accounts.len() - MAX_BALANCE_ROWS
        ));
    }

    lines.join("\n")
}

/// Snapshot order is taken as recency order; no sorting happens here
pub fn get_transactions(snapshot: &Snapshot, args: &GetTransactionsArgs) -> String {
    let lines: Vec<String> = snapshot
        .transactions_for(&args.account_id)
        .take(MAX_TRANSACTIONS)
        .map(|t| {
            format!(
                "{}: {} (${})",
                t.date.format("%Y-%m-%d"),
                t.description,
                format_amount(t.amount.abs())
            )
        })
        .collect();

    if lines.is_empty() {
        return format!("No transactions found for {}.", args.account_id);
    }

    lines.join("\n")
}

/// Two decimals with thousands separators: 1250000.0 -> "1,250,000.00"
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

// ============================================================================
// TESTS
// ============================================================================
