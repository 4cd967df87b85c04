use crate::core::kernel::HttpTransport;
use crate::services::subscriptions::rest::SubscriptionsRest;

pub mod bank_accounts;
pub mod credit_cards;
pub mod recurring_bill_items;
pub mod recurring_bills;
pub mod subscriptions;

pub use bank_accounts::BankAccounts;
pub use credit_cards::CreditCards;
pub use recurring_bill_items::RecurringBillItems;
pub use recurring_bills::RecurringBills;
pub use subscriptions::Subscriptions;

/// Subscriptions-service connector that composes every resource
pub struct SubscriptionsConnector<T: HttpTransport> {
    pub subscriptions: Subscriptions<T>,
    pub recurring_bills: RecurringBills<T>,
    pub recurring_bill_items: RecurringBillItems<T>,
    pub credit_cards: CreditCards<T>,
    pub bank_accounts: BankAccounts<T>,
}

impl<T: HttpTransport> SubscriptionsConnector<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self {
            subscriptions: Subscriptions::new(rest),
            recurring_bills: RecurringBills::new(rest),
            recurring_bill_items: RecurringBillItems::new(rest),
            credit_cards: CreditCards::new(rest),
            bank_accounts: BankAccounts::new(rest),
        }
    }
}
