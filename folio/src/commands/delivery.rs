use anyhow::ensure;
use chrono::Utc;
use clap::Subcommand;
use folio_config::Config;
use folio_delivery_contracts::DeliveryService;
use folio_delivery_impl::{DeliveryServiceConfig, DeliveryServiceImpl};
use folio_models::contact::{ContactEmail, ContactMessageBody, ContactName, ContactPayload};

#[derive(Debug, Subcommand)]
pub enum DeliveryCommand {
    /// Send a test message through the configured delivery service
    Test {
        /// Address reported as the sender of the test message
        #[arg(default_value = "delivery-test@example.com")]
        sender: String,
    },
}

impl DeliveryCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            DeliveryCommand::Test { sender } => test(config, sender).await,
        }
    }
}

async fn test(config: Config, sender: String) -> anyhow::Result<()> {
    let delivery = DeliveryServiceImpl::new(DeliveryServiceConfig::new(
        config.delivery.endpoint,
        config.delivery.service_id,
        config.delivery.template_id,
        config.delivery.public_key,
    ));
    ensure!(
        delivery.is_configured(),
        "Email delivery service not configured"
    );

    delivery
        .send(ContactPayload {
            from_name: ContactName::try_new("Delivery Test")?,
            from_email: ContactEmail::try_new(sender)?,
            message: ContactMessageBody::try_new(
                "Email deliverability seems to be working!",
            )?,
            submission_date: Utc::now().format("%B %-d, %Y, %-I:%M %p UTC").to_string(),
        })
        .await?;

    println!("Test message sent");

    Ok(())
}
