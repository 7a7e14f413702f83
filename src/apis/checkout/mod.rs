//! APIs and models related to checkout wallets.

mod api;
mod model;

pub use api::CheckoutApi;
pub use model::*;
