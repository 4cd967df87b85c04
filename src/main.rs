use payu_client::services::subscriptions::types::SubscriptionSummary;
use payu_client::{Parameter, ParameterMap, PayUBuilder, PayUConfig, PayUError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // PAYU_MERCHANT_ID, PAYU_API_LOGIN and PAYU_API_KEY, optionally from a .env file;
    // PAYU_ENVIRONMENT=production switches away from the sandbox
    let config = PayUConfig::from_env_file("PAYU")?;
    let client = PayUBuilder::new().with_config(config).build()?;

    println!("Pinging payments service...");
    match client.payments.ping(&ParameterMap::new()).await {
        Ok(_) => println!("Payments service is up"),
        Err(e) => println!("Ping failed: {}", e),
    }

    let subscription_id = std::env::args().nth(1).unwrap_or_else(|| "123".to_string());
    let params = ParameterMap::new().with(Parameter::SubscriptionId, subscription_id.as_str());

    match client.subscriptions.subscriptions.find(&params).await {
        Ok(payload) => {
            let subscription: SubscriptionSummary = payload.parse()?;
            println!(
                "Subscription {}: state {}",
                subscription.id,
                subscription.state.as_deref().unwrap_or("unknown")
            );
        }
        Err(PayUError::DomainError { code, message }) => {
            println!("Gateway rejected the lookup ({}): {}", code, message);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
