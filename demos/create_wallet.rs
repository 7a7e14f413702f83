use anyhow::Context;
use chrono::NaiveDate;
use embedly_rust::{
    apis::{
        customers::CreateCustomerRequestBuilder,
        payouts::{InterBankTransferRequestBuilder, NameEnquiryRequest},
        wallets::CreateWalletRequestBuilder,
    },
    config::EmbedlyConfig,
    pollable::{PollOptions, PollableUntilTerminalState},
};
use rust_decimal::Decimal;

#[derive(serde::Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    embedly: EmbedlyConfig,
    currency_id: String,
    payout_bank_code: String,
    payout_account_number: String,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config"))
            .add_source(config::Environment::with_prefix("EMBEDLY"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;
    let organization_id = config
        .embedly
        .organization_id
        .clone()
        .context("organization_id must be configured")?;
    let embedly = config.embedly.into_client()?;

    // Pick the first customer type and country available
    let customer_type = embedly
        .customers
        .list_types()
        .await?
        .into_iter()
        .next()
        .context("No customer types available")?;
    let country = embedly
        .customers
        .list_countries()
        .await?
        .into_iter()
        .find(|c| c.country_code_two.as_deref() == Some("NG"))
        .context("Nigeria is not an available country")?;

    let customer = embedly
        .customers
        .create(
            &CreateCustomerRequestBuilder::default()
                .organization_id(organization_id)
                .first_name("Some")
                .last_name("One")
                .date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).context("Invalid date")?)
                .customer_type_id(customer_type.id)
                .country_id(country.id)
                .mobile_number("+2348000000000")
                .email_address("some.one@email.com")
                .build()?,
        )
        .await?;
    tracing::info!("Created customer {}", customer.id);

    let wallet = embedly
        .wallets
        .create(
            &CreateWalletRequestBuilder::default()
                .customer_id(customer.id)
                .currency_id(config.currency_id)
                .name("Main")
                .build()?,
        )
        .await?;
    let wallet_account = wallet
        .virtual_account
        .context("Wallet has no virtual account")?;
    tracing::info!(
        "Created wallet {} with account {} at {}",
        wallet.id,
        wallet_account.account_number,
        wallet_account.bank_name
    );

    let beneficiary = embedly
        .payouts
        .name_enquiry(&NameEnquiryRequest {
            bank_code: config.payout_bank_code.clone(),
            account_number: config.payout_account_number.clone(),
        })
        .await?;
    tracing::info!("Paying out to {}", beneficiary.account_name);

    let res = embedly
        .payouts
        .inter_bank_transfer(
            &InterBankTransferRequestBuilder::default()
                .destination_bank_code(config.payout_bank_code)
                .destination_account_number(beneficiary.account_number)
                .destination_account_name(beneficiary.account_name)
                .source_account_number(wallet_account.account_number)
                .source_account_name("Some One")
                .amount(Decimal::new(10000, 2))
                .remarks("Demo payout")
                .build()?,
        )
        .await?;

    tracing::info!("Created payout {}, waiting for it to settle...", res.payment_reference);

    let payout = res
        .poll_until_terminal_state(&embedly, PollOptions::default())
        .await?;

    tracing::info!("{:#?}", payout);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
