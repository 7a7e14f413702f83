//! APIs and models related to wallets and wallet-to-wallet transfers.

mod api;
mod model;

pub use api::WalletsApi;
pub use model::*;
