use crate::domain::error::DomainError;
use crate::domain::ports::listing_source::ListingSource;
use crate::domain::values::channel::Channel;

/// No live listing source wired. Bulk reconciliation over this source
/// finds nothing; prices arrive through the ingest operations instead.
pub struct NoopListingSource;

#[async_trait::async_trait]
impl ListingSource for NoopListingSource {
    async fn fetch(
        &self,
        _product_name: &str,
        _channel: Channel,
    ) -> Result<Vec<String>, DomainError> {
        Ok(Vec::new())
    }
}
