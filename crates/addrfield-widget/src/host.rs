//! Seams to the host checkout.

use std::future::Future;

use addrfield_core::{AttributeChange, Language, LocationRecord, Settings};
use addrfield_loader::{DatasetClient, LoaderError};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingAddress {
    pub country_code: Option<String>,
    /// Region/province code; the top-level filter key.
    pub province_code: Option<String>,
}

impl ShippingAddress {
    #[must_use]
    pub fn new(country_code: &str, province_code: &str) -> Self {
        Self {
            country_code: Some(country_code.to_owned()),
            province_code: Some(province_code.to_owned()),
        }
    }
}

/// Everything the host provides at mount time.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    pub address: ShippingAddress,
    pub language: Language,
    /// Whether the extension was granted the block-progress capability.
    pub can_block_progress: bool,
    pub settings: Settings,
}

#[derive(Debug, Error)]
#[error("attribute write rejected: {0}")]
pub struct HostError(pub String);

/// Where the address dataset comes from.
pub trait DatasetSource: Send + Sync + 'static {
    fn fetch_records(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<LocationRecord>, LoaderError>> + Send;
}

/// The host's order-attribute store.
pub trait AttributeWriter: Send + Sync + 'static {
    fn write_attribute(
        &self,
        change: AttributeChange,
    ) -> impl Future<Output = Result<(), HostError>> + Send;
}

impl DatasetSource for DatasetClient {
    fn fetch_records(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<LocationRecord>, LoaderError>> + Send {
        DatasetClient::fetch_records(self, url)
    }
}
