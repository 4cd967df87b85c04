pub mod client;
pub mod core;
pub mod services;

pub use client::{PayUBuilder, PayUClient};
pub use crate::core::config::{DigestAlgorithm, PayUConfig};
pub use crate::core::errors::{ErrorCode, PayUError};
pub use crate::core::params::{Nullable, Parameter, ParameterMap};
pub use crate::core::types::*;
