// 🛟 Fallback Intent Classifier - deterministic keyword rules
//
// Rules are checked in a fixed order and the first hit wins. The keyword sets
// overlap ("list" vs "transaction", "customer" vs "balance"), so the order is
// part of the behaviour.

use crate::extractor::{EntityExtractor, ExtractedEntities};
use crate::intent::IntentDecision;
use crate::model::CustomerType;
use crate::tools::{GetBalanceArgs, GetCustomersArgs, GetTransactionsArgs, ToolCall};

const CUSTOMER_KEYWORDS: &[&str] = &["customer", "list", "show people"];
const BALANCE_KEYWORDS: &[&str] = &["balance", "money", "how much"];
const TRANSACTION_KEYWORDS: &[&str] = &["transaction", "txn", "spent", "history"];
const HELP_KEYWORDS: &[&str] = &["help"];

/// Segment keywords, checked in this order; a later hit overwrites an earlier one
const SEGMENT_KEYWORDS: &[(&str, CustomerType)] = &[
    ("retail", CustomerType::Retail),
    ("corporate", CustomerType::Corporate),
    ("sme", CustomerType::Sme),
    ("wealth", CustomerType::Wealth),
];

pub const HELP_MESSAGE: &str = "I can help you list customers (e.g., 'Show retail customers'), \
check balances (e.g., 'Balance for C001'), or find transactions (e.g., 'Txns for A101001').";

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackClassifier;

impl FallbackClassifier {
    pub fn new() -> Self {
        FallbackClassifier
    }

    /// Lowercase, extract entities, then apply the rules
    pub fn classify(&self, message: &str) -> IntentDecision {
        let entities = EntityExtractor::extract(message);
        self.classify_with(&message.to_lowercase(), &entities)
    }

    /// Apply the rules to an already-lowercased message
    pub fn classify_with(&self, lower: &str, entities: &ExtractedEntities) -> IntentDecision {
        if contains_any(lower, CUSTOMER_KEYWORDS) {
            let customer_type = SEGMENT_KEYWORDS
                .iter()
                .filter(|(keyword, _)| lower.contains(keyword))
                .last()
                .map(|(_, segment)| segment.as_str().to_string());

            return IntentDecision::Tool(ToolCall::GetCustomers(GetCustomersArgs {
                customer_type,
            }));
        }

        if contains_any(lower, BALANCE_KEYWORDS) {
            return IntentDecision::Tool(ToolCall::GetBalance(GetBalanceArgs {
                customer_id: entities.customer_id.clone(),
            }));
        }

        if contains_any(lower, TRANSACTION_KEYWORDS) {
            if let Some(account_id) = &entities.account_id {
                return IntentDecision::Tool(ToolCall::GetTransactions(GetTransactionsArgs {
                    account_id: account_id.clone(),
                }));
            }
        }

        if contains_any(lower, HELP_KEYWORDS) {
            return IntentDecision::Chat {
                reply: HELP_MESSAGE.to_string(),
            };
        }

        IntentDecision::Unknown
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str) -> IntentDecision {
        FallbackClassifier::new().classify(message)
    }

    fn customers(segment: Option<&str>) -> IntentDecision {
        IntentDecision::Tool(ToolCall::GetCustomers(GetCustomersArgs {
            customer_type: segment.map(str::to_string),
        }))
    }

    #[test]
    fn test_list_retail_customers() {
        assert_eq!(classify("list retail customers"), customers(Some("Retail")));
    }

    #[test]
    fn test_segment_last_match_wins() {
        assert_eq!(classify("Show corporate customers"), customers(Some("Corporate")));
        assert_eq!(classify("retail and corporate customers"), customers(Some("Corporate")));
        assert_eq!(classify("customers in wealth or retail"), customers(Some("Wealth")));
        assert_eq!(classify("show people"), customers(None));
    }

    #[test]
    fn test_segment_keywords_match_inside_words() {
        // "assessment" contains "sme"
        assert_eq!(
            classify("list customers needing assessment"),
            customers(Some("SME"))
        );
    }

    #[test]
    fn test_customer_rule_beats_balance() {
        assert_eq!(classify("customer balance for C001"), customers(None));
    }

    #[test]
    fn test_balance_with_and_without_id() {
        assert_eq!(
            classify("Balance for c001"),
            IntentDecision::Tool(ToolCall::GetBalance(GetBalanceArgs {
                customer_id: Some("C001".to_string())
            }))
        );
        assert_eq!(
            classify("how much money do we hold?"),
            IntentDecision::Tool(ToolCall::GetBalance(GetBalanceArgs { customer_id: None }))
        );
    }

    #[test]
    fn test_transactions_need_account_id() {
        assert_eq!(
            classify("Txns for A101001"),
            IntentDecision::Tool(ToolCall::GetTransactions(GetTransactionsArgs {
                account_id: "A101001".to_string()
            }))
        );
        assert_eq!(classify("transaction history please"), IntentDecision::Unknown);
    }

    #[test]
    fn test_list_beats_transactions() {
        assert_eq!(classify("list transactions for A101001"), customers(None));
    }

    #[test]
    fn test_help_and_unknown() {
        assert_eq!(
            classify("Can you help me?"),
            IntentDecision::Chat {
                reply: HELP_MESSAGE.to_string()
            }
        );
        assert_eq!(classify("what's the weather"), IntentDecision::Unknown);
        assert_eq!(classify(""), IntentDecision::Unknown);
    }
}
