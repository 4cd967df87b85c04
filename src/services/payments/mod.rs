pub mod builder;
pub mod connector;
pub mod types;

pub use connector::PaymentsConnector;
