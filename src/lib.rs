pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::catalog::CatalogUseCase;
use crate::application::reconcile::{BatchReport, ReconcileConfig, ReconcileUseCase};
use crate::application::report::{ProductReport, ReportUseCase};
use crate::application::tiering::{TierAssignment, TierUseCase, TieringConfig};
use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::ports::listing_source::ListingSource;
use crate::domain::ports::partitioner::Partitioner;
use crate::domain::ports::price_extractor::PriceExtractor;
use crate::domain::ports::product_repository::{CatalogStats, ProductRepository};
use crate::domain::values::channel::Channel;
use crate::domain::values::resolution::{AnchorFps, Resolution};
use crate::infrastructure::clustering::kmeans::SeededKMeans;
use crate::infrastructure::extraction::noop::NoopExtractor;
use crate::infrastructure::extraction::openai::OpenAiExtractor;
use crate::infrastructure::sources::noop::NoopListingSource;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::product_repo::SqliteProductRepo;
use rusqlite::Connection;
use std::sync::Arc;

pub struct GpuMarket {
    catalog_uc: CatalogUseCase,
    reconcile_uc: ReconcileUseCase,
    tier_uc: TierUseCase,
    report_uc: ReportUseCase,
}

impl GpuMarket {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider = std::env::var("GPUMARKET_EXTRACTOR").unwrap_or_else(|_| "noop".into());
        let extractor: Option<Arc<dyn PriceExtractor>> = match provider.as_str() {
            "openai" => {
                let base_url = std::env::var("GPUMARKET_EXTRACTOR_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".into());
                let api_key = std::env::var("GPUMARKET_EXTRACTOR_API_KEY").unwrap_or_default();
                let model = std::env::var("GPUMARKET_EXTRACTOR_MODEL").ok();
                Some(Arc::new(OpenAiExtractor::new(base_url, api_key, model)))
            }
            _ => Some(Arc::new(NoopExtractor)),
        };

        Self::with_providers(db_path, Arc::new(NoopListingSource), extractor)
    }

    pub fn with_providers(
        db_path: &str,
        source: Arc<dyn ListingSource>,
        extractor: Option<Arc<dyn PriceExtractor>>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let repo: Arc<dyn ProductRepository> = Arc::new(SqliteProductRepo::new(conn));
        let tiering = TieringConfig::default();
        let partitioner: Arc<dyn Partitioner> =
            Arc::new(SeededKMeans::new(tiering.seed, tiering.restarts));

        Ok(Self {
            catalog_uc: CatalogUseCase::new(repo.clone()),
            reconcile_uc: ReconcileUseCase::new(
                repo.clone(),
                source,
                extractor,
                ReconcileConfig::default(),
            ),
            tier_uc: TierUseCase::new(repo.clone(), partitioner, tiering),
            report_uc: ReportUseCase::new(repo, AnchorFps::default()),
        })
    }

    // Catalog
    pub fn add_product(
        &self,
        name: String,
        rel_performance: Option<f64>,
        launch_price: Option<f64>,
        driver_support: Option<String>,
    ) -> Result<Product, DomainError> {
        self.catalog_uc
            .add(name, rel_performance, launch_price, driver_support)
    }

    pub fn get_product(&self, name: &str) -> Result<Product, DomainError> {
        self.catalog_uc.get(name)
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.catalog_uc.list()
    }

    pub fn set_performance(&self, name: &str, score: f64) -> Result<(), DomainError> {
        self.catalog_uc.set_performance(name, score)
    }

    pub fn set_driver_support(&self, name: &str, note: &str) -> Result<(), DomainError> {
        self.catalog_uc.set_driver_support(name, note)
    }

    pub fn set_launch_price(&self, name: &str, raw_text: &str) -> Result<Option<f64>, DomainError> {
        self.catalog_uc.set_launch_price(name, raw_text)
    }

    // Reconciliation
    pub fn ingest_listings(
        &self,
        name: &str,
        channel: Channel,
        snippets: &[String],
    ) -> Result<Option<f64>, DomainError> {
        self.reconcile_uc.ingest_listings(name, channel, snippets)
    }

    pub fn ingest_aggregate(
        &self,
        name: &str,
        channel: Channel,
        price: f64,
    ) -> Result<Option<f64>, DomainError> {
        self.reconcile_uc.ingest_aggregate(name, channel, price)
    }

    pub async fn reconcile(&self, names: Option<Vec<String>>) -> Result<BatchReport, DomainError> {
        self.reconcile_uc.run_batch(names).await
    }

    pub fn reset_channel(&self, channel: Channel) -> Result<usize, DomainError> {
        self.reconcile_uc.reset_channel(channel)
    }

    // Tiering
    pub fn retier(&self) -> Result<Vec<TierAssignment>, DomainError> {
        self.tier_uc.recompute()
    }

    // Reporting
    pub fn report(&self) -> Result<Vec<ProductReport>, DomainError> {
        self.report_uc.records()
    }

    pub fn product_report(&self, name: &str) -> Result<ProductReport, DomainError> {
        self.report_uc.record(name)
    }

    pub fn best_value(
        &self,
        resolution: Resolution,
        min_fps: f64,
        limit: usize,
    ) -> Result<Vec<ProductReport>, DomainError> {
        self.report_uc.best_value(resolution, min_fps, limit)
    }

    pub fn stats(&self) -> Result<CatalogStats, DomainError> {
        self.report_uc.stats()
    }
}
