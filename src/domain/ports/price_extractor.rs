use crate::domain::error::DomainError;
use crate::domain::values::channel::Channel;

/// Pre-aggregated price estimate from an external extraction service.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExtractedPrice {
    pub price: f64,
    /// How many listings backed the estimate.
    pub listing_count: usize,
}

/// External extraction collaborator: turns unstructured marketplace text
/// into a single price estimate for a channel (best price for new, average
/// for used). `Ok(None)` means the service found no usable data; the
/// pipeline then falls back to its own normalize/reject/average path.
#[async_trait::async_trait]
pub trait PriceExtractor: Send + Sync {
    async fn extract(
        &self,
        product_name: &str,
        channel: Channel,
        corpus: &[String],
    ) -> Result<Option<ExtractedPrice>, DomainError>;
}
