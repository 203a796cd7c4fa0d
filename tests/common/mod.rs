//! Shared test helpers.

use gpumarket::infrastructure::sources::static_source::StaticListingSource;
use gpumarket::GpuMarket;
use std::sync::Arc;

/// In-memory database, hand-seeded listing source, no extraction service
/// (local pipeline only).
pub fn setup() -> (GpuMarket, Arc<StaticListingSource>) {
    let source = Arc::new(StaticListingSource::new());
    let gm = GpuMarket::with_providers(":memory:", source.clone(), None).unwrap();
    (gm, source)
}

/// Catalog a product with a performance score and no prices.
pub fn add_scored(gm: &GpuMarket, name: &str, score: f64) {
    gm.add_product(name.to_string(), Some(score), None, None)
        .unwrap();
}
