pub mod api_key;
pub mod error_handling;
pub mod retry_idempotent;
pub mod user_agent;
