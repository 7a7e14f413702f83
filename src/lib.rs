//! Rust client for the [Embedly](https://embedly.ng) banking-as-a-service APIs.
//!
//! It covers customer onboarding and KYC, wallets and wallet transfers, cards, bank payouts,
//! checkout collections and products, plus the helpers needed around them: validation of
//! webhook notifications and client-side encryption of card PINs.
//!
//! # Usage
//!
//! ## Initialize a new `EmbedlyClient`
//!
//! Create a new [`EmbedlyClient`](crate::client::EmbedlyClient) with the API key of your organization.
//!
//! ```rust,no_run
//! # use embedly_rust::{EmbedlyClient, client::Environment};
//! let embedly = EmbedlyClient::builder("my-api-key")
//!     .with_environment(Environment::Staging)
//!     .build();
//! ```
//!
//! By default, an `EmbedlyClient` connects to the production environment.
//!
//! Card operations that carry a PIN need the public key Embedly provides for PIN encryption:
//!
//! ```rust,no_run
//! # use embedly_rust::EmbedlyClient;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pem = std::fs::read("embedly-pin-key.pem")?;
//! let embedly = EmbedlyClient::builder("my-api-key")
//!     .with_pin_public_key(&pem)?
//!     .build();
//! # Ok(())
//! # }
//! ```
//!
//! ## Open a wallet
//!
//! ```rust,no_run
//! # use embedly_rust::{EmbedlyClient, Error, apis::wallets::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let embedly: EmbedlyClient = unreachable!();
//! #
//! let request = CreateWalletRequestBuilder::default()
//!     .customer_id("some-customer-id")
//!     .currency_id("some-currency-id")
//!     .name("Savings")
//!     .build()
//!     .unwrap();
//! let wallet = embedly.wallets.create(&request).await?;
//!
//! println!("Wallet {} has {} available", wallet.id, wallet.available_balance);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pay out to a bank account and wait for the outcome
//!
//! ```rust,no_run
//! # use embedly_rust::{
//! #     EmbedlyClient, PollableUntilTerminalState, apis::payouts::*, pollable::PollOptions,
//! # };
//! # use rust_decimal::Decimal;
//! #
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! # let embedly: EmbedlyClient = unreachable!();
//! #
//! let request = InterBankTransferRequestBuilder::default()
//!     .destination_bank_code("058")
//!     .destination_account_number("0123456789")
//!     .destination_account_name("Ada Obi")
//!     .source_account_number("9710000001")
//!     .source_account_name("Chidi Eze")
//!     .amount(Decimal::new(500000, 2))
//!     .remarks("Invoice 42")
//!     .build()?;
//! let payout = embedly
//!     .payouts
//!     .inter_bank_transfer(&request)
//!     .await?
//!     .poll_until_terminal_state(&embedly, PollOptions::default())
//!     .await?;
//!
//! println!("Payout {} is {:?}", payout.payment_reference, payout.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Validate a webhook
//!
//! ```rust
//! # use embedly_rust::webhook::WebhookValidator;
//! let validator = WebhookValidator::new("webhook-secret");
//! let payload = r#"{"event":"nip","data":{}}"#;
//! let signature = validator.sign(payload);
//!
//! assert!(validator.is_valid(payload, &signature));
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for complete programs, for example a webhook receiver:
//!
//! ```shell
//! cargo run --example webhook_server
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod config;
pub mod error;
mod middlewares;
pub mod pin;
pub mod pollable;
pub mod webhook;

pub use client::EmbedlyClient;
pub use error::Error;
pub use pollable::{Pollable, PollableUntilTerminalState};
