use crate::core::errors::PayUError;
use crate::core::kernel::service::TX_VALUE;
use crate::core::params::{Nullable, Parameter, ParameterMap};
use crate::core::types::Language;
use crate::services::payments::types::{
    Buyer, OrderValue, Payer, Transaction, TransactionCreditCard, TransactionOrder,
};
use crate::services::subscriptions::builder::required_text;
use std::collections::BTreeMap;

pub const DEFAULT_TRANSACTION_TYPE: &str = "AUTHORIZATION_AND_CAPTURE";
pub const INSTALLMENTS_NUMBER: &str = "INSTALLMENTS_NUMBER";

const TRANSACTION_REQUIRED: &[Parameter] = &[
    Parameter::ReferenceCode,
    Parameter::Description,
    Parameter::Value,
    Parameter::Currency,
    Parameter::PaymentMethod,
];

const CARD_REQUIRED: &[Parameter] = &[
    Parameter::CreditCardNumber,
    Parameter::CreditCardExpirationDate,
    Parameter::PayerName,
];

/// Validate and assemble a transaction
///
/// The account id comes from the parameters, falling back to the configured
/// one. The order signature is left unset; it is computed when the request
/// is sent.
pub fn build_transaction(
    params: &ParameterMap,
    default_account_id: Option<&str>,
    language: Language,
) -> Result<Transaction, PayUError> {
    params.require(TRANSACTION_REQUIRED)?;

    let account_id = params
        .get_string(Parameter::AccountId)
        .or_else(|| default_account_id.map(str::to_string))
        .ok_or_else(|| PayUError::missing_parameter(Parameter::AccountId.as_str()))?;

    let value = match params.decimal(Parameter::Value)? {
        Nullable::Value(value) => value,
        _ => return Err(PayUError::missing_parameter(Parameter::Value.as_str())),
    };

    let mut additional_values = BTreeMap::new();
    additional_values.insert(
        TX_VALUE.to_string(),
        OrderValue {
            value,
            currency: required_text(params, Parameter::Currency)?,
        },
    );

    let buyer = Buyer {
        full_name: params.text(Parameter::CustomerName),
        email_address: params.text(Parameter::CustomerEmail),
        contact_phone: Nullable::Absent,
    };

    let order = TransactionOrder {
        account_id: Nullable::Value(account_id),
        reference_code: params.text(Parameter::ReferenceCode),
        description: params.text(Parameter::Description),
        language: Some(language),
        signature: Nullable::Absent,
        notify_url: params.text(Parameter::NotifyUrl),
        additional_values,
        buyer: (buyer != Buyer::default()).then_some(buyer),
    };

    let payer = Payer {
        full_name: params.text(Parameter::PayerName),
        email_address: params.text(Parameter::PayerEmail),
        contact_phone: params.text(Parameter::PayerPhone),
        dni_number: params.text(Parameter::CreditCardDocument),
    };

    let credit_card = if params.is_set(Parameter::TokenId) {
        None
    } else if params.is_set(Parameter::CreditCardNumber) {
        params.require(CARD_REQUIRED)?;
        Some(TransactionCreditCard {
            number: params.text(Parameter::CreditCardNumber),
            security_code: params.text(Parameter::CreditCardSecurityCode),
            expiration_date: params.text(Parameter::CreditCardExpirationDate),
            name: params.text(Parameter::PayerName),
        })
    } else {
        None
    };

    let mut extra_parameters = BTreeMap::new();
    if let Some(installments) = params.get_string(Parameter::InstallmentsNumber) {
        extra_parameters.insert(INSTALLMENTS_NUMBER.to_string(), installments);
    }

    Ok(Transaction {
        order,
        payer: (payer != Payer::default()).then_some(payer),
        credit_card,
        credit_card_token_id: params.text(Parameter::TokenId),
        transaction_type: params
            .get_string(Parameter::TransactionType)
            .unwrap_or_else(|| DEFAULT_TRANSACTION_TYPE.to_string()),
        payment_method: params.text(Parameter::PaymentMethod),
        payment_country: params.text(Parameter::PaymentCountry),
        device_session_id: params.text(Parameter::DeviceSessionId),
        ip_address: params.text(Parameter::IpAddress),
        extra_parameters,
    })
}
