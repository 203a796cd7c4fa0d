//! Bulk price reconciliation.
//!
//! Sole writer of the per-channel price fields. Raw text goes through
//! filter → normalize → outlier-reject → average; a wired extraction
//! service can short-circuit that with its own aggregate. Write policy is
//! overwrite-only-on-valid-data: a pass that finds nothing leaves the
//! stored value alone. Callers wanting a from-scratch rescan null a channel
//! first via `reset_channel`.

use crate::domain::error::DomainError;
use crate::domain::ports::listing_source::ListingSource;
use crate::domain::ports::price_extractor::PriceExtractor;
use crate::domain::ports::product_repository::ProductRepository;
use crate::domain::values::channel::Channel;
use crate::domain::values::listing_filter::{filter_listings, FilterConfig};
use crate::domain::values::observation::PriceObservation;
use crate::domain::values::outliers::{channel_average, OutlierPolicy};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ReconcileConfig {
    pub filter: FilterConfig,
    pub outliers: OutlierPolicy,
}

/// Outcome summary of one bulk reconciliation run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BatchReport {
    pub run_id: String,
    pub updated: usize,
    pub skipped_no_data: usize,
    pub failed: usize,
    /// (product name, reason) for every isolated per-product failure.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            updated: 0,
            skipped_no_data: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }
}

pub struct ReconcileUseCase {
    repo: Arc<dyn ProductRepository>,
    source: Arc<dyn ListingSource>,
    extractor: Option<Arc<dyn PriceExtractor>>,
    config: ReconcileConfig,
}

impl ReconcileUseCase {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        source: Arc<dyn ListingSource>,
        extractor: Option<Arc<dyn PriceExtractor>>,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            repo,
            source,
            extractor,
            config,
        }
    }

    /// Run the local pipeline over raw snippets for one product/channel and
    /// store the average if one survives. Returns the stored value.
    pub fn ingest_listings(
        &self,
        name: &str,
        channel: Channel,
        snippets: &[String],
    ) -> Result<Option<f64>, DomainError> {
        if channel == Channel::Launch {
            return Err(DomainError::InvalidInput(
                "Launch prices come from spec pages, not listings".into(),
            ));
        }
        self.require_product(name)?;

        let avg = self.local_average(name, channel, snippets);
        if let Some(price) = avg {
            self.repo.set_channel_price(name, channel, price)?;
        }
        Ok(avg)
    }

    /// Accept a pre-extracted aggregate from an external service. Values at
    /// or below the price floor are treated as no-data, never written.
    pub fn ingest_aggregate(
        &self,
        name: &str,
        channel: Channel,
        price: f64,
    ) -> Result<Option<f64>, DomainError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Aggregate price must be a positive number, got {price}"
            )));
        }
        self.require_product(name)?;

        if price <= self.config.outliers.price_floor {
            return Ok(None);
        }
        let rounded = (price * 100.0).round() / 100.0;
        self.repo.set_channel_price(name, channel, rounded)?;
        Ok(Some(rounded))
    }

    /// Reconcile every product (or a named subset) against the listing
    /// source. One product's bad data never aborts the batch; failures are
    /// collected into the report.
    pub async fn run_batch(&self, names: Option<Vec<String>>) -> Result<BatchReport, DomainError> {
        let products = match names {
            Some(list) => list,
            None => self.repo.all()?.into_iter().map(|p| p.name).collect(),
        };

        let mut report = BatchReport::new();
        for name in &products {
            match self.reconcile_one(name).await {
                Ok(true) => report.updated += 1,
                Ok(false) => report.skipped_no_data += 1,
                Err(e) => {
                    report.failed += 1;
                    report.failures.push((name.clone(), e.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// One product, both market channels. Returns whether anything was
    /// written.
    async fn reconcile_one(&self, name: &str) -> Result<bool, DomainError> {
        self.require_product(name)?;

        let mut wrote = false;
        for channel in [Channel::New, Channel::Used] {
            let snippets = self.source.fetch(name, channel).await?;
            if snippets.is_empty() {
                continue;
            }

            let avg = match self.extracted_average(name, channel, &snippets).await? {
                Some(price) => Some(price),
                None => self.local_average(name, channel, &snippets),
            };

            if let Some(price) = avg {
                self.repo.set_channel_price(name, channel, price)?;
                wrote = true;
            }
        }
        Ok(wrote)
    }

    pub fn reset_channel(&self, channel: Channel) -> Result<usize, DomainError> {
        self.repo.reset_channel(channel)
    }

    /// Ask the extraction service, if one is wired, for an aggregate over
    /// the *filtered* snippets. Floor-or-below results are discarded here
    /// too; the service is told to ignore scam prices but is not trusted
    /// to.
    async fn extracted_average(
        &self,
        name: &str,
        channel: Channel,
        snippets: &[String],
    ) -> Result<Option<f64>, DomainError> {
        let Some(extractor) = &self.extractor else {
            return Ok(None);
        };
        let corpus: Vec<String> = filter_listings(snippets, name, channel, &self.config.filter)
            .into_iter()
            .map(String::from)
            .collect();
        if corpus.is_empty() {
            return Ok(None);
        }

        let result = extractor.extract(name, channel, &corpus).await?;
        Ok(result
            .filter(|r| r.price > self.config.outliers.price_floor && r.listing_count > 0)
            .map(|r| (r.price * 100.0).round() / 100.0))
    }

    fn local_average(&self, name: &str, channel: Channel, snippets: &[String]) -> Option<f64> {
        let kept = filter_listings(snippets, name, channel, &self.config.filter);
        let prices: Vec<f64> = kept
            .iter()
            .map(|s| PriceObservation::from_snippet(s, channel))
            .filter_map(|o| o.price)
            .collect();
        channel_average(&prices, channel, &self.config.outliers)
    }

    fn require_product(&self, name: &str) -> Result<(), DomainError> {
        match self.repo.get(name)? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Product '{name}'"))),
        }
    }
}
