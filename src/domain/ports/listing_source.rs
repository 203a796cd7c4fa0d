use crate::domain::error::DomainError;
use crate::domain::values::channel::Channel;

/// Supplier of raw listing text for a product on a market channel.
///
/// Implementations own scraping, CAPTCHA handling, retries and rate limits;
/// the pipeline only sees visible-text snippets. An empty vec means nothing
/// was found, which is a normal outcome.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, product_name: &str, channel: Channel)
        -> Result<Vec<String>, DomainError>;
}
