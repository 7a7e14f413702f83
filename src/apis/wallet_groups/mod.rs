//! APIs and models related to wallet groups.

mod api;
mod model;

pub use api::WalletGroupsApi;
pub use model::*;
