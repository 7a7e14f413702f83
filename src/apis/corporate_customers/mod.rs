//! APIs and models related to corporate customers and their directors.

mod api;
mod model;

pub use api::CorporateCustomersApi;
pub use model::*;
