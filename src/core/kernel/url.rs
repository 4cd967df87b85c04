use crate::core::config::EnvironmentConfig;
use crate::core::errors::PayUError;
use crate::core::types::{Entity, Operation, Service};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

/// Positional placeholder marker; `{0}`, `{1}`, ... in declared order
const PLACEHOLDER_OPEN: char = '{';
const PLACEHOLDER_CLOSE: char = '}';

/// Static (entity, operation) -> path template table of the subscriptions service
static TEMPLATES: &[(Entity, Operation, &str)] = &[
    (Entity::Subscription, Operation::Add, "/subscriptions"),
    (Entity::Subscription, Operation::Edit, "/subscriptions/{0}"),
    (Entity::Subscription, Operation::Delete, "/subscriptions/{0}"),
    (Entity::Subscription, Operation::Get, "/subscriptions/{0}"),
    (Entity::Subscription, Operation::GetList, "/subscriptions/"),
    (Entity::RecurringBill, Operation::Get, "/recurringBill/{0}"),
    (Entity::RecurringBill, Operation::Query, "/recurringBill"),
    (Entity::RecurringBillItem, Operation::Add, "/subscriptions/{0}/recurringBillItems"),
    (Entity::RecurringBillItem, Operation::Get, "/recurringBillItems/{0}"),
    (Entity::RecurringBillItem, Operation::GetList, "/recurringBillItems/params"),
    (Entity::RecurringBillItem, Operation::Edit, "/recurringBillItems/{0}"),
    (Entity::RecurringBillItem, Operation::Delete, "/recurringBillItems/{0}"),
    (Entity::CreditCard, Operation::Add, "/customers/{0}/creditCards"),
    (Entity::CreditCard, Operation::Get, "/creditCards/{0}"),
    (Entity::CreditCard, Operation::Delete, "/customers/{0}/creditCards/{1}"),
    (Entity::BankAccount, Operation::Add, "/customers/{0}/bankAccounts"),
    (Entity::BankAccount, Operation::Get, "/bankAccounts/{0}"),
    (Entity::BankAccount, Operation::Edit, "/bankAccounts/{0}"),
    (Entity::BankAccount, Operation::Delete, "/customers/{0}/bankAccounts/{1}"),
];

/// Registered path template for an (entity, operation) pair
pub fn template(entity: Entity, operation: Operation) -> Result<&'static str, PayUError> {
    TEMPLATES
        .iter()
        .find(|(e, o, _)| *e == entity && *o == operation)
        .map(|(_, _, template)| *template)
        .ok_or_else(|| {
            PayUError::ConfigurationError(format!(
                "no url template registered for entity [{}] and operation [{}]",
                entity, operation
            ))
        })
}

/// Number of `{n}` placeholders in a template
pub fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut rest = template;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after = &rest[start + 1..];
        match after.find(PLACEHOLDER_CLOSE) {
            Some(end) if !after[..end].is_empty() && after[..end].bytes().all(|b| b.is_ascii_digit()) => {
                count += 1;
                rest = &after[end + 1..];
            }
            _ => rest = after,
        }
    }
    count
}

/// Substitute path arguments into a template; the count must match exactly
///
/// Placeholders are replaced in one left-to-right pass and every argument is
/// percent-encoded as a single path segment, so an argument can never add
/// segments, a query or further placeholders.
pub fn substitute(template: &str, path_args: &[&str]) -> Result<String, PayUError> {
    let expected = placeholder_count(template);
    if expected != path_args.len() {
        return Err(PayUError::InvalidArgument(format!(
            "the url template [{}] takes {} path argument(s) but {} were supplied",
            template,
            expected,
            path_args.len()
        )));
    }

    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        let after = &rest[start + 1..];
        let index = after
            .find(PLACEHOLDER_CLOSE)
            .and_then(|end| after[..end].parse::<usize>().ok().map(|index| (index, end)));

        match index {
            Some((index, end)) if after[..end].bytes().all(|b| b.is_ascii_digit()) => {
                let arg = path_args.get(index).ok_or_else(|| {
                    PayUError::InvalidArgument(format!(
                        "the url template [{}] has no path argument {}",
                        template, index
                    ))
                })?;
                path.push_str(&rest[..start]);
                path.push_str(&encode_segment(template, index, arg)?);
                rest = &after[end + 1..];
            }
            _ => {
                path.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }
    path.push_str(rest);
    Ok(path)
}

fn encode_segment(template: &str, index: usize, arg: &str) -> Result<String, PayUError> {
    if arg.is_empty() || arg == "." || arg == ".." {
        return Err(PayUError::InvalidArgument(format!(
            "path argument {} for [{}] is not a valid path segment",
            index, template
        )));
    }

    // Url is only used as a path-segment encoder here
    let mut encoder = Url::parse("http://segment.local/")
        .map_err(|e| PayUError::ConfigurationError(format!("Invalid url: {}", e)))?;
    encoder
        .path_segments_mut()
        .map_err(|()| PayUError::ConfigurationError("url cannot hold path segments".to_string()))?
        .pop_if_empty()
        .push(arg);
    Ok(encoder.path().trim_start_matches('/').to_string())
}

/// Maps logical (service, entity, operation) targets to URLs
#[derive(Debug, Clone)]
pub struct UrlResolver {
    environment: EnvironmentConfig,
}

impl UrlResolver {
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self { environment }
    }

    pub const fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    /// Base URL for a service, re-evaluating the environment mode on each call
    pub fn base_url(&self, service: Service) -> String {
        self.environment.base_url(service)
    }

    /// Path segment (without base URL) for an entity operation
    pub fn segment(
        &self,
        entity: Entity,
        operation: Operation,
        path_args: &[&str],
    ) -> Result<String, PayUError> {
        substitute(template(entity, operation)?, path_args)
    }

    /// Full URL for an entity operation on a service
    pub fn resolve(
        &self,
        service: Service,
        entity: Entity,
        operation: Operation,
        path_args: &[&str],
    ) -> Result<String, PayUError> {
        let segment = self.segment(entity, operation, path_args)?;
        Ok(self.join(service, &segment))
    }

    /// Base URL of the service with an optional segment appended
    pub fn join(&self, service: Service, segment: &str) -> String {
        format!("{}{}", self.base_url(service), segment)
    }
}

/// Append the non-null scalar fields of `filters` to `path` as a query string
///
/// Values are form-urlencoded.
pub fn add_query_params<T: Serialize>(path: &str, filters: &T) -> Result<String, PayUError> {
    let value = serde_json::to_value(filters).map_err(|e| {
        PayUError::InvalidArgument(format!("query parameters could not be encoded: {}", e))
    })?;

    let pairs: Vec<(String, String)> = match value {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null | Value::Array(_) | Value::Object(_) => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect(),
        Value::Null => Vec::new(),
        _ => {
            return Err(PayUError::InvalidArgument(
                "query parameters must be an object".to_string(),
            ))
        }
    };

    if pairs.is_empty() {
        return Ok(path.to_string());
    }

    // Url is only used as a form-urlencoded serializer here
    let mut encoder = Url::parse("http://query.local/")
        .map_err(|e| PayUError::ConfigurationError(format!("Invalid url: {}", e)))?;
    encoder.query_pairs_mut().extend_pairs(pairs.iter());
    let query = encoder.query().unwrap_or_default();

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", path, separator, query))
}
