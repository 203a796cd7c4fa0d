use crate::domain::error::DomainError;
use crate::domain::ports::price_extractor::{ExtractedPrice, PriceExtractor};
use crate::domain::values::channel::Channel;

/// No extraction service configured; the pipeline always runs its own
/// normalize/reject/average path.
pub struct NoopExtractor;

#[async_trait::async_trait]
impl PriceExtractor for NoopExtractor {
    async fn extract(
        &self,
        _product_name: &str,
        _channel: Channel,
        _corpus: &[String],
    ) -> Result<Option<ExtractedPrice>, DomainError> {
        Ok(None)
    }
}
