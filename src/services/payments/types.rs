use crate::core::params::Nullable;
use crate::core::types::Language;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amount and currency of an order value (`TX_VALUE` and taxes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderValue {
    pub value: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub full_name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub email_address: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub contact_phone: Nullable<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub full_name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub email_address: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub contact_phone: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub dni_number: Nullable<String>,
}

/// Order inside a transaction; the signature is filled in right before sending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOrder {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub reference_code: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub signature: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub notify_url: Nullable<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_values: BTreeMap<String, OrderValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreditCard {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub security_code: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub expiration_date: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub name: Nullable<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub order: TransactionOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<TransactionCreditCard>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub credit_card_token_id: Nullable<String>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub payment_method: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub payment_country: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub device_session_id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub ip_address: Nullable<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_parameters: BTreeMap<String, String>,
}

/// `transactionResponse` member of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub order_id: Option<i64>,
    pub transaction_id: Option<String>,
    pub state: Option<String>,
    pub response_code: Option<String>,
    pub authorization_code: Option<String>,
}
