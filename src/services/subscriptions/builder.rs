//! Request builders for the subscriptions service.
//!
//! Every builder validates before it assembles: a builder either returns a
//! complete request object or an error, never a partially required one.

use crate::core::errors::{ErrorCode, PayUError};
use crate::core::params::{Nullable, Parameter, ParameterMap};
use crate::services::subscriptions::types::{
    AdditionalValue, Address, BankAccount, CreditCard, Customer, Plan, RecurringBill,
    RecurringBillItem, RecurringBillItemFilter, Subscription, SubscriptionFilter,
};

pub const PLAN_VALUE: &str = "PLAN_VALUE";
pub const ITEM_VALUE: &str = "ITEM_VALUE";

/// Keys whose presence means the caller is paying with a credit card
pub const CREDIT_CARD_KEYS: &[Parameter] = &[
    Parameter::TokenId,
    Parameter::CreditCardNumber,
    Parameter::CreditCardExpirationDate,
    Parameter::PaymentMethod,
    Parameter::CreditCardDocument,
];

/// Keys whose presence means the caller is paying with a bank account
pub const BANK_ACCOUNT_KEYS: &[Parameter] = &[
    Parameter::BankAccountId,
    Parameter::BankAccountDocumentNumber,
    Parameter::BankAccountDocumentNumberType,
    Parameter::BankAccountCustomerName,
    Parameter::BankAccountAgencyNumber,
    Parameter::BankAccountAgencyDigit,
    Parameter::BankAccountAccountDigit,
    Parameter::BankAccountNumber,
    Parameter::BankAccountBankName,
    Parameter::BankAccountType,
];

const NEW_CREDIT_CARD_REQUIRED: &[Parameter] = &[
    Parameter::CreditCardNumber,
    Parameter::CreditCardExpirationDate,
    Parameter::PaymentMethod,
    Parameter::PayerName,
];

const NEW_BANK_ACCOUNT_REQUIRED: &[Parameter] = &[
    Parameter::BankAccountCustomerName,
    Parameter::BankAccountDocumentNumber,
    Parameter::BankAccountDocumentNumberType,
    Parameter::BankAccountBankName,
    Parameter::BankAccountType,
    Parameter::BankAccountNumber,
    Parameter::Country,
];

const INLINE_PLAN_REQUIRED: &[Parameter] = &[
    Parameter::PlanDescription,
    Parameter::PlanInterval,
    Parameter::PlanIntervalCount,
    Parameter::PlanCurrency,
    Parameter::PlanValue,
    Parameter::AccountId,
];

const NEW_CUSTOMER_REQUIRED: &[Parameter] = &[Parameter::CustomerName, Parameter::CustomerEmail];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Create,
    Edit,
}

/// Which payment methods the caller supplied parameters for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentMethods {
    pub bank_account: bool,
    pub credit_card: bool,
}

impl PaymentMethods {
    /// A method counts as present when any key of its set is set
    pub fn detect(params: &ParameterMap) -> Self {
        Self {
            bank_account: params.any_set(BANK_ACCOUNT_KEYS),
            credit_card: params.any_set(CREDIT_CARD_KEYS),
        }
    }
}

/// Exactly one payment method, with its own required fields
pub fn validate_payment_method(
    params: &ParameterMap,
    methods: PaymentMethods,
    mode: BuildMode,
) -> Result<(), PayUError> {
    match (methods.bank_account, methods.credit_card) {
        (true, true) => Err(PayUError::domain(
            ErrorCode::InvalidParameters,
            "The subscription must have only one payment method",
        )),
        (true, false) => {
            validate_bank_account(params)?;
            if mode == BuildMode::Create {
                params.require(&[Parameter::TermsAndConditionsAccepted])?;
            }
            Ok(())
        }
        (false, true) => validate_credit_card(params),
        (false, false) => Err(PayUError::domain(
            ErrorCode::InvalidParameters,
            "The subscription must have one payment method",
        )),
    }
}

/// A tokenized card needs nothing else; a new card needs its full data
pub fn validate_credit_card(params: &ParameterMap) -> Result<(), PayUError> {
    if params.is_set(Parameter::TokenId) {
        return Ok(());
    }
    params.require(NEW_CREDIT_CARD_REQUIRED)?;
    parse_expiration_date(params).map(|_| ())
}

/// An existing account id needs nothing else; a new account needs its full data
pub fn validate_bank_account(params: &ParameterMap) -> Result<(), PayUError> {
    if params.is_set(Parameter::BankAccountId) {
        return Ok(());
    }
    params.require(NEW_BANK_ACCOUNT_REQUIRED)
}

pub fn validate_subscription_plan(params: &ParameterMap) -> Result<(), PayUError> {
    params.require(INLINE_PLAN_REQUIRED)
}

pub fn validate_customer(params: &ParameterMap, mode: BuildMode) -> Result<(), PayUError> {
    if mode == BuildMode::Edit || params.is_set(Parameter::CustomerId) {
        return Ok(());
    }
    params.require(NEW_CUSTOMER_REQUIRED)
}

/// Full validation and assembly for subscription creation
pub fn build_new_subscription(params: &ParameterMap) -> Result<Subscription, PayUError> {
    // a plan code references an existing plan, inline plan fields are then optional
    if !params.is_set(Parameter::PlanCode) {
        validate_subscription_plan(params)?;
    }
    validate_customer(params, BuildMode::Create)?;

    let methods = PaymentMethods::detect(params);
    validate_payment_method(params, methods, BuildMode::Create)?;

    build_subscription(params, methods, BuildMode::Create)
}

/// Full validation and assembly for a subscription update; returns the id too
pub fn build_subscription_update(params: &ParameterMap) -> Result<(String, Subscription), PayUError> {
    params.require(&[Parameter::SubscriptionId])?;
    let id = required_text(params, Parameter::SubscriptionId)?;
    validate_customer(params, BuildMode::Edit)?;

    let methods = PaymentMethods::detect(params);
    validate_payment_method(params, methods, BuildMode::Edit)?;

    Ok((id, build_subscription(params, methods, BuildMode::Edit)?))
}

/// Assemble a subscription from already validated parameters
pub fn build_subscription(
    params: &ParameterMap,
    methods: PaymentMethods,
    mode: BuildMode,
) -> Result<Subscription, PayUError> {
    let mut customer = build_customer(params);
    if methods.credit_card {
        customer.credit_cards.push(build_credit_card(params)?);
    }
    if methods.bank_account {
        customer.bank_accounts.push(build_bank_account(params));
    }

    let mut subscription = Subscription {
        id: params.text(Parameter::SubscriptionId),
        customer: Some(customer),
        ..Default::default()
    };

    if mode == BuildMode::Create {
        subscription.quantity = params.integer(Parameter::Quantity)?;
        subscription.installments = params.integer(Parameter::InstallmentsNumber)?;
        subscription.trial_days = params.integer(Parameter::TrialDays)?;
        subscription.immediate_payment = params.boolean(Parameter::ImmediatePayment)?;
        subscription.terms_and_conditions_acepted =
            params.boolean(Parameter::TermsAndConditionsAccepted)?;
        subscription.notify_url = params.text(Parameter::NotifyUrl);
        subscription.extra1 = params.text(Parameter::Extra1);
        subscription.extra2 = params.text(Parameter::Extra2);
        subscription.plan = Some(build_plan(params)?);
    }

    Ok(subscription)
}

pub fn build_customer(params: &ParameterMap) -> Customer {
    Customer {
        id: params.text(Parameter::CustomerId),
        full_name: params.text(Parameter::CustomerName),
        email: params.text(Parameter::CustomerEmail),
        ..Default::default()
    }
}

pub fn build_plan(params: &ParameterMap) -> Result<Plan, PayUError> {
    let mut plan = Plan {
        id: params.text(Parameter::PlanId),
        plan_code: params.text(Parameter::PlanCode),
        description: params.text(Parameter::PlanDescription),
        account_id: params.text(Parameter::AccountId),
        interval: params.text(Parameter::PlanInterval),
        interval_count: params.integer(Parameter::PlanIntervalCount)?,
        max_payments_allowed: params.integer(Parameter::PlanMaxPayments)?,
        payment_attempts_delay: params.integer(Parameter::PlanAttemptsDelay)?,
        max_payment_attempts: params.integer(Parameter::PlanMaxPaymentAttempts)?,
        max_pending_payments: params.integer(Parameter::PlanMaxPendingPayments)?,
        additional_values: Vec::new(),
    };

    if let Nullable::Value(value) = params.decimal(Parameter::PlanValue)? {
        let currency = required_text(params, Parameter::PlanCurrency)?;
        plan.additional_values.push(AdditionalValue {
            name: PLAN_VALUE.to_string(),
            value,
            currency,
        });
    }

    Ok(plan)
}

/// Credit card from card parameters; expects [`validate_credit_card`] to have passed
pub fn build_credit_card(params: &ParameterMap) -> Result<CreditCard, PayUError> {
    let (exp_year, exp_month) = if params.is_set(Parameter::CreditCardExpirationDate) {
        let (year, month) = parse_expiration_date(params)?;
        (Nullable::Value(year), Nullable::Value(month))
    } else {
        (Nullable::Absent, Nullable::Absent)
    };

    let address = Address {
        line1: params.text(Parameter::PayerStreet),
        city: params.text(Parameter::PayerCity),
        state: params.text(Parameter::PayerState),
        country: params.text(Parameter::PayerCountry),
        postal_code: params.text(Parameter::PayerPostalCode),
        phone: params.text(Parameter::PayerPhone),
    };

    Ok(CreditCard {
        token: params.text(Parameter::TokenId),
        customer_id: Nullable::Absent,
        name: params.text(Parameter::PayerName),
        document: params.text(Parameter::CreditCardDocument),
        number: params.text(Parameter::CreditCardNumber),
        exp_month,
        exp_year,
        card_type: params.text(Parameter::PaymentMethod),
        address: (!address.is_empty()).then_some(address),
    })
}

pub fn build_bank_account(params: &ParameterMap) -> BankAccount {
    BankAccount {
        id: params.text(Parameter::BankAccountId),
        customer_id: Nullable::Absent,
        account_id: params.text(Parameter::AccountId),
        name: params.text(Parameter::BankAccountCustomerName),
        document_number: params.text(Parameter::BankAccountDocumentNumber),
        document_number_type: params.text(Parameter::BankAccountDocumentNumberType),
        bank: params.text(Parameter::BankAccountBankName),
        account_type: params.text(Parameter::BankAccountType),
        account_number: params.text(Parameter::BankAccountNumber),
        agency_number: params.text(Parameter::BankAccountAgencyNumber),
        agency_digit: params.text(Parameter::BankAccountAgencyDigit),
        account_digit: params.text(Parameter::BankAccountAccountDigit),
        country: params.text(Parameter::Country),
    }
}

/// Card to register under an existing customer
pub fn build_customer_credit_card(params: &ParameterMap) -> Result<(String, CreditCard), PayUError> {
    params.require(&[Parameter::CustomerId])?;
    params.require(NEW_CREDIT_CARD_REQUIRED)?;
    let customer_id = required_text(params, Parameter::CustomerId)?;
    let card = build_credit_card(params)?;
    Ok((customer_id, card))
}

/// Bank account to register under an existing customer
pub fn build_customer_bank_account(params: &ParameterMap) -> Result<(String, BankAccount), PayUError> {
    params.require(&[Parameter::CustomerId, Parameter::AccountId])?;
    params.require(NEW_BANK_ACCOUNT_REQUIRED)?;
    let customer_id = required_text(params, Parameter::CustomerId)?;
    Ok((customer_id, build_bank_account(params)))
}

pub fn build_recurring_bill_item(params: &ParameterMap) -> Result<RecurringBillItem, PayUError> {
    let mut item = RecurringBillItem {
        id: params.text(Parameter::RecurringBillItemId),
        description: params.text(Parameter::Description),
        subscription_id: params.text(Parameter::SubscriptionId),
        additional_values: Vec::new(),
    };

    if let Nullable::Value(value) = params.decimal(Parameter::ItemValue)? {
        let currency = required_text(params, Parameter::Currency)?;
        item.additional_values.push(AdditionalValue {
            name: ITEM_VALUE.to_string(),
            value,
            currency,
        });
    }

    Ok(item)
}

pub fn build_recurring_bill_filter(params: &ParameterMap) -> RecurringBill {
    RecurringBill {
        customer_id: params.get_string(Parameter::CustomerId),
        date_begin: params.get_string(Parameter::RecurringBillDateBegin),
        date_final: params.get_string(Parameter::RecurringBillDateFinal),
        payment_method: params.get_string(Parameter::RecurringBillPaymentMethodType),
        state: params.get_string(Parameter::RecurringBillState),
        subscription_id: params.get_string(Parameter::SubscriptionId),
        limit: params.get_string(Parameter::Limit),
        offset: params.get_string(Parameter::Offset),
    }
}

pub fn build_subscription_filter(params: &ParameterMap) -> SubscriptionFilter {
    SubscriptionFilter {
        plan_id: params.get_string(Parameter::PlanId),
        plan_code: params.get_string(Parameter::PlanCode),
        state: params.get_string(Parameter::AccountState),
        customer_id: params.get_string(Parameter::CustomerId),
        account_id: params.get_string(Parameter::AccountId),
        limit: params.get_string(Parameter::Limit),
        offset: params.get_string(Parameter::Offset),
    }
}

/// Item listing needs at least a subscription id or a description
pub fn build_recurring_bill_item_filter(
    params: &ParameterMap,
) -> Result<RecurringBillItemFilter, PayUError> {
    let filter = RecurringBillItemFilter {
        subscription_id: params.get_string(Parameter::SubscriptionId),
        description: params.get_string(Parameter::Description),
    };
    if filter.subscription_id.is_none() && filter.description.is_none() {
        return Err(PayUError::InvalidArgument(format!(
            "You must send {} or {} parameters",
            Parameter::SubscriptionId,
            Parameter::Description
        )));
    }
    Ok(filter)
}

/// Text of a key that must be set
pub fn required_text(params: &ParameterMap, key: Parameter) -> Result<String, PayUError> {
    params
        .get_string(key)
        .ok_or_else(|| PayUError::missing_parameter(key.as_str()))
}

/// Split `YYYY/MM` into (year, two-digit month)
fn parse_expiration_date(params: &ParameterMap) -> Result<(String, String), PayUError> {
    let raw = required_text(params, Parameter::CreditCardExpirationDate)?;
    let invalid = || {
        PayUError::InvalidArgument(format!(
            "the parameter [{}] must have the format YYYY/MM",
            Parameter::CreditCardExpirationDate
        ))
    };

    let (year, month) = raw.trim().split_once('/').ok_or_else(invalid)?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let month: u8 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year.to_string(), format!("{:02}", month)))
}
