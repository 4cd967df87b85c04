pub mod builder;
pub mod connector;
pub mod rest;
pub mod types;

pub use connector::{
    BankAccounts, CreditCards, RecurringBillItems, RecurringBills, Subscriptions,
    SubscriptionsConnector,
};
pub use rest::SubscriptionsRest;
