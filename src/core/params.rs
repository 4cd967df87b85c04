use crate::core::errors::PayUError;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of the parameter keys callers may supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    // Subscription
    SubscriptionId,
    Quantity,
    InstallmentsNumber,
    TrialDays,
    ImmediatePayment,
    TermsAndConditionsAccepted,
    NotifyUrl,
    Extra1,
    Extra2,
    AccountState,

    // Plan
    PlanId,
    PlanCode,
    PlanDescription,
    PlanInterval,
    PlanIntervalCount,
    PlanCurrency,
    PlanValue,
    PlanMaxPayments,
    PlanAttemptsDelay,
    PlanMaxPaymentAttempts,
    PlanMaxPendingPayments,
    AccountId,

    // Customer
    CustomerId,
    CustomerName,
    CustomerEmail,

    // Credit card
    TokenId,
    CreditCardNumber,
    CreditCardExpirationDate,
    CreditCardSecurityCode,
    CreditCardDocument,
    PaymentMethod,
    PayerName,
    PayerEmail,
    PayerPhone,
    PayerStreet,
    PayerCity,
    PayerState,
    PayerCountry,
    PayerPostalCode,

    // Bank account
    BankAccountId,
    BankAccountCustomerName,
    BankAccountDocumentNumber,
    BankAccountDocumentNumberType,
    BankAccountBankName,
    BankAccountType,
    BankAccountNumber,
    BankAccountAgencyNumber,
    BankAccountAgencyDigit,
    BankAccountAccountDigit,
    Country,

    // Recurring bills and their items
    RecurringBillId,
    RecurringBillDateBegin,
    RecurringBillDateFinal,
    RecurringBillPaymentMethodType,
    RecurringBillState,
    RecurringBillItemId,
    Description,
    ItemValue,
    Currency,

    // Payments and reports
    ReferenceCode,
    Value,
    PaymentCountry,
    TransactionType,
    IpAddress,
    DeviceSessionId,
    OrderId,
    TransactionId,

    // Pagination
    Limit,
    Offset,

    // Request
    Language,
}

impl Parameter {
    /// Name used in error messages and query strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubscriptionId => "subscriptionId",
            Self::Quantity => "quantity",
            Self::InstallmentsNumber => "installmentsNumber",
            Self::TrialDays => "trialDays",
            Self::ImmediatePayment => "immediatePayment",
            Self::TermsAndConditionsAccepted => "termsAndConditionsAcepted",
            Self::NotifyUrl => "notifyUrl",
            Self::Extra1 => "extra1",
            Self::Extra2 => "extra2",
            Self::AccountState => "accountState",
            Self::PlanId => "planId",
            Self::PlanCode => "planCode",
            Self::PlanDescription => "planDescription",
            Self::PlanInterval => "planInterval",
            Self::PlanIntervalCount => "planIntervalCount",
            Self::PlanCurrency => "planCurrency",
            Self::PlanValue => "planValue",
            Self::PlanMaxPayments => "planMaxPayments",
            Self::PlanAttemptsDelay => "planAttemptsDelay",
            Self::PlanMaxPaymentAttempts => "planMaxPaymentAttempts",
            Self::PlanMaxPendingPayments => "planMaxPendingPayments",
            Self::AccountId => "accountId",
            Self::CustomerId => "customerId",
            Self::CustomerName => "customerName",
            Self::CustomerEmail => "customerEmail",
            Self::TokenId => "tokenId",
            Self::CreditCardNumber => "creditCardNumber",
            Self::CreditCardExpirationDate => "creditCardExpirationDate",
            Self::CreditCardSecurityCode => "creditCardSecurityCode",
            Self::CreditCardDocument => "creditCardDocument",
            Self::PaymentMethod => "paymentMethod",
            Self::PayerName => "payerName",
            Self::PayerEmail => "payerEmail",
            Self::PayerPhone => "payerPhone",
            Self::PayerStreet => "payerStreet",
            Self::PayerCity => "payerCity",
            Self::PayerState => "payerState",
            Self::PayerCountry => "payerCountry",
            Self::PayerPostalCode => "payerPostalCode",
            Self::BankAccountId => "bankAccountId",
            Self::BankAccountCustomerName => "bankAccountCustomerName",
            Self::BankAccountDocumentNumber => "bankAccountDocumentNumber",
            Self::BankAccountDocumentNumberType => "bankAccountDocumentNumberType",
            Self::BankAccountBankName => "bankAccountBankName",
            Self::BankAccountType => "bankAccountType",
            Self::BankAccountNumber => "bankAccountNumber",
            Self::BankAccountAgencyNumber => "bankAccountAgencyNumber",
            Self::BankAccountAgencyDigit => "bankAccountAgencyDigit",
            Self::BankAccountAccountDigit => "bankAccountAccountDigit",
            Self::Country => "country",
            Self::RecurringBillId => "recurringBillId",
            Self::RecurringBillDateBegin => "recurringBillDateBegin",
            Self::RecurringBillDateFinal => "recurringBillDateFinal",
            Self::RecurringBillPaymentMethodType => "recurringBillPaymentMethodType",
            Self::RecurringBillState => "recurringBillState",
            Self::RecurringBillItemId => "recurringBillItemId",
            Self::Description => "description",
            Self::ItemValue => "itemValue",
            Self::Currency => "currency",
            Self::ReferenceCode => "referenceCode",
            Self::Value => "value",
            Self::PaymentCountry => "paymentCountry",
            Self::TransactionType => "transactionType",
            Self::IpAddress => "ipAddress",
            Self::DeviceSessionId => "deviceSessionId",
            Self::OrderId => "orderId",
            Self::TransactionId => "transactionId",
            Self::Limit => "limit",
            Self::Offset => "offset",
            Self::Language => "language",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request-object field that keeps "not provided" apart from "explicitly null"
///
/// `Absent` fields are skipped when serializing (use
/// `skip_serializing_if = "Nullable::is_absent"`), `Null` becomes JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Nullable<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

/// Flat caller-supplied parameters, read-only to the request builders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    values: HashMap<Parameter, Value>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: Parameter, value: impl Into<Value>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: Parameter, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key, value.into())
    }

    /// Insert text received as raw bytes; invalid sequences are replaced
    /// so every stored string is valid UTF-8
    pub fn insert_bytes(&mut self, key: Parameter, bytes: &[u8]) -> Option<Value> {
        let text = String::from_utf8_lossy(bytes).into_owned();
        self.values.insert(key, Value::String(text))
    }

    pub fn get(&self, key: Parameter) -> Option<&Value> {
        self.values.get(&key)
    }

    pub fn contains(&self, key: Parameter) -> bool {
        self.values.contains_key(&key)
    }

    /// Present and not null
    pub fn is_set(&self, key: Parameter) -> bool {
        self.values.get(&key).is_some_and(|v| !v.is_null())
    }

    /// Whether any key of the given set is set
    pub fn any_set(&self, keys: &[Parameter]) -> bool {
        keys.iter().any(|key| self.is_set(*key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fails on the first required key that is not set, in declaration order
    pub fn require(&self, required: &[Parameter]) -> Result<(), PayUError> {
        match required.iter().find(|key| !self.is_set(**key)) {
            Some(missing) => Err(PayUError::missing_parameter(missing.as_str())),
            None => Ok(()),
        }
    }

    /// Scalar value rendered as text, `None` when absent or null
    pub fn get_string(&self, key: Parameter) -> Option<String> {
        self.get(key).and_then(value_to_text)
    }

    pub fn text(&self, key: Parameter) -> Nullable<String> {
        match self.get(key) {
            None => Nullable::Absent,
            Some(Value::Null) => Nullable::Null,
            Some(value) => value_to_text(value).map_or(Nullable::Null, Nullable::Value),
        }
    }

    pub fn decimal(&self, key: Parameter) -> Result<Nullable<Decimal>, PayUError> {
        self.parsed(key, |text| Decimal::from_str(text).ok())
    }

    pub fn integer(&self, key: Parameter) -> Result<Nullable<i64>, PayUError> {
        self.parsed(key, |text| text.parse::<i64>().ok())
    }

    pub fn boolean(&self, key: Parameter) -> Result<Nullable<bool>, PayUError> {
        self.parsed(key, |text| match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        })
    }

    fn parsed<T>(
        &self,
        key: Parameter,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Nullable<T>, PayUError> {
        match self.text(key) {
            Nullable::Absent => Ok(Nullable::Absent),
            Nullable::Null => Ok(Nullable::Null),
            Nullable::Value(text) => parse(text.trim()).map(Nullable::Value).ok_or_else(|| {
                PayUError::InvalidArgument(format!(
                    "the parameter [{}] has an invalid value",
                    key.as_str()
                ))
            }),
        }
    }
}

impl FromIterator<(Parameter, Value)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (Parameter, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
