pub mod command;
pub mod payments;
pub mod reports;
pub mod subscriptions;

use crate::core::errors::PayUError;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::Language;

/// Language requested through the `language` parameter
///
/// Absent means the default language; an unsupported code is rejected.
pub fn requested_language(params: &ParameterMap) -> Result<Option<Language>, PayUError> {
    match params.get_string(Parameter::Language) {
        None => Ok(None),
        Some(code) => Language::from_code(&code).map(Some).ok_or_else(|| {
            PayUError::InvalidArgument(format!(
                "the parameter [{}] has an invalid value",
                Parameter::Language
            ))
        }),
    }
}
