use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::values::channel::Channel;
use crate::domain::values::tier::Tier;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub with_performance: usize,
    pub priced: usize,
    pub tiered: usize,
    pub by_tier: Vec<(String, usize)>,
}

/// Keyed read/update store for products. "No row" and "NULL field" are
/// first-class absent values; implementations must never substitute zero.
pub trait ProductRepository: Send + Sync {
    fn add(&self, product: &Product) -> Result<(), DomainError>;
    fn get(&self, name: &str) -> Result<Option<Product>, DomainError>;
    fn all(&self) -> Result<Vec<Product>, DomainError>;
    /// Products carrying a relative performance score, the tiering input.
    fn with_performance(&self) -> Result<Vec<Product>, DomainError>;
    /// Overwrite one channel's rolled-up price for one product.
    fn set_channel_price(&self, name: &str, channel: Channel, price: f64)
        -> Result<(), DomainError>;
    /// Null out a channel for every product, the explicit pre-rescan reset.
    fn reset_channel(&self, channel: Channel) -> Result<usize, DomainError>;
    fn set_tier(&self, name: &str, tier: Tier) -> Result<(), DomainError>;
    fn set_performance(&self, name: &str, score: f64) -> Result<(), DomainError>;
    fn set_driver_support(&self, name: &str, note: &str) -> Result<(), DomainError>;
    fn stats(&self) -> Result<CatalogStats, DomainError>;
}
