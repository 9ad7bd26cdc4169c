//! Fetches the merchant-hosted address dataset.

pub mod client;
pub mod error;
pub mod parse;

pub use client::DatasetClient;
pub use error::LoaderError;
pub use parse::parse_records;
