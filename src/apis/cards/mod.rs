//! APIs and models related to Afrigo debit cards.

mod api;
mod model;

pub use api::CardsApi;
pub use model::*;
