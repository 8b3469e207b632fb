pub mod client;
pub mod schema;

pub use client::ApiError;
