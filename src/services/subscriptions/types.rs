use crate::core::params::Nullable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named amount attached to plans and recurring bill items (`PLAN_VALUE`, `ITEM_VALUE`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalValue {
    pub name: String,
    pub value: Decimal,
    pub currency: String,
}

/// Subscription request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub quantity: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub installments: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub trial_days: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub immediate_payment: Nullable<bool>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub terms_and_conditions_acepted: Nullable<bool>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub notify_url: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub extra1: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub extra2: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub full_name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub email: Nullable<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub credit_cards: Vec<CreditCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bank_accounts: Vec<BankAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub plan_code: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub interval: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub interval_count: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub max_payments_allowed: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub payment_attempts_delay: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub max_payment_attempts: Nullable<i64>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub max_pending_payments: Nullable<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_values: Vec<AdditionalValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub line1: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub city: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub state: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub country: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub postal_code: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub phone: Nullable<String>,
}

impl Address {
    pub const fn is_empty(&self) -> bool {
        self.line1.is_absent()
            && self.city.is_absent()
            && self.state.is_absent()
            && self.country.is_absent()
            && self.postal_code.is_absent()
            && self.phone.is_absent()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub token: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub customer_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub document: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub exp_month: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub exp_year: Nullable<String>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub card_type: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub customer_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub document_number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub document_number_type: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub bank: Nullable<String>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub account_type: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub agency_number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub agency_digit: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_digit: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub country: Nullable<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBillItem {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub subscription_id: Nullable<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_values: Vec<AdditionalValue>,
}

/// Recurring bill filter, serialized into the query string of listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    pub customer_id: Option<String>,
    pub date_begin: Option<String>,
    pub date_final: Option<String>,
    pub payment_method: Option<String>,
    pub state: Option<String>,
    pub subscription_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFilter {
    pub plan_id: Option<String>,
    pub plan_code: Option<String>,
    pub state: Option<String>,
    pub customer_id: Option<String>,
    pub account_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBillItemFilter {
    pub subscription_id: Option<String>,
    pub description: Option<String>,
}

/// Subscription as returned by the gateway; only the commonly read fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub id: String,
    pub state: Option<String>,
    pub quantity: Option<i64>,
    pub installments: Option<i64>,
    pub current_period_start: Option<String>,
    pub current_period_end: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_omitted() {
        let subscription = Subscription {
            id: Nullable::Value("sub-1".to_string()),
            quantity: Nullable::Null,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&subscription).unwrap(),
            json!({"id": "sub-1", "quantity": null})
        );
    }

    #[test]
    fn test_card_type_renamed() {
        let card = CreditCard {
            card_type: Nullable::Value("VISA".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&card).unwrap(), json!({"type": "VISA"}));
    }

    #[test]
    fn test_summary_deserializes_from_gateway_body() {
        let summary: SubscriptionSummary =
            serde_json::from_value(json!({"id": "123", "state": "ACTIVE", "plan": {"id": "p"}}))
                .unwrap();
        assert_eq!(summary.id, "123");
        assert_eq!(summary.state.as_deref(), Some("ACTIVE"));
    }
}
