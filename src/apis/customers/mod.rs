//! APIs and models related to individual customers and their KYC.

mod api;
mod model;

pub use api::CustomersApi;
pub use model::*;
