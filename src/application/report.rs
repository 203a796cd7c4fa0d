//! Value reporting: per-product records and the best-value ranking.
//!
//! Everything here is derived on demand from (active price, relative
//! performance); nothing is persisted. Absent inputs surface as JSON nulls,
//! never zeros.

use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::ports::product_repository::{CatalogStats, ProductRepository};
use crate::domain::values::active_price::is_priced;
use crate::domain::values::performance::{cost_per_frame, estimated_fps};
use crate::domain::values::resolution::{AnchorFps, Resolution};
use crate::domain::values::tier::Tier;
use std::sync::Arc;

/// The record the dashboard consumes for one product.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProductReport {
    pub name: String,
    pub active_price: Option<f64>,
    pub tier: Option<Tier>,
    pub fps_1080p: Option<f64>,
    pub fps_1440p: Option<f64>,
    pub fps_4k: Option<f64>,
    /// Cost per frame, dollars; lower is better.
    pub value_1080p: Option<f64>,
    pub value_1440p: Option<f64>,
    pub value_4k: Option<f64>,
    pub driver_support: Option<String>,
}

impl ProductReport {
    pub fn fps_at(&self, resolution: Resolution) -> Option<f64> {
        match resolution {
            Resolution::R1080p => self.fps_1080p,
            Resolution::R1440p => self.fps_1440p,
            Resolution::R4k => self.fps_4k,
        }
    }

    pub fn value_at(&self, resolution: Resolution) -> Option<f64> {
        match resolution {
            Resolution::R1080p => self.value_1080p,
            Resolution::R1440p => self.value_1440p,
            Resolution::R4k => self.value_4k,
        }
    }
}

pub struct ReportUseCase {
    repo: Arc<dyn ProductRepository>,
    anchors: AnchorFps,
}

impl ReportUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>, anchors: AnchorFps) -> Self {
        Self { repo, anchors }
    }

    /// Records for every product that qualifies for value output: has a
    /// performance score and an active price above the floor.
    pub fn records(&self) -> Result<Vec<ProductReport>, DomainError> {
        let mut records: Vec<ProductReport> = self
            .repo
            .with_performance()?
            .iter()
            .filter(|p| is_priced(p.active_price()))
            .map(|p| self.build(p))
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    /// Single-product drill-down. Unlike `records`, an unpriced or
    /// unscored product still renders here, with nulls where data is
    /// missing.
    pub fn record(&self, name: &str) -> Result<ProductReport, DomainError> {
        let product = self
            .repo
            .get(name)?
            .ok_or_else(|| DomainError::NotFound(format!("Product '{name}'")))?;
        Ok(self.build(&product))
    }

    /// Products meeting `min_fps` at `resolution`, cheapest frame first.
    /// Ties break by ascending active price, then name, so output order is
    /// fully deterministic.
    pub fn best_value(
        &self,
        resolution: Resolution,
        min_fps: f64,
        limit: usize,
    ) -> Result<Vec<ProductReport>, DomainError> {
        if !min_fps.is_finite() || min_fps < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Minimum FPS must be a non-negative number, got {min_fps}"
            )));
        }

        let mut candidates: Vec<ProductReport> = self
            .records()?
            .into_iter()
            .filter(|r| r.fps_at(resolution).is_some_and(|f| f >= min_fps))
            .filter(|r| r.value_at(resolution).is_some())
            .collect();

        candidates.sort_by(|a, b| {
            let va = a.value_at(resolution).unwrap_or(f64::MAX);
            let vb = b.value_at(resolution).unwrap_or(f64::MAX);
            va.total_cmp(&vb)
                .then_with(|| {
                    let pa = a.active_price.unwrap_or(f64::MAX);
                    let pb = b.active_price.unwrap_or(f64::MAX);
                    pa.total_cmp(&pb)
                })
                .then_with(|| a.name.cmp(&b.name))
        });
        candidates.truncate(limit);
        Ok(candidates)
    }

    pub fn stats(&self) -> Result<CatalogStats, DomainError> {
        self.repo.stats()
    }

    fn build(&self, product: &Product) -> ProductReport {
        let active = product.active_price();
        let mut fps = [None; 3];
        let mut value = [None; 3];

        if let Some(perf) = product.rel_performance {
            for (i, resolution) in Resolution::ALL.iter().enumerate() {
                let f = estimated_fps(perf, *resolution, &self.anchors);
                fps[i] = Some(f);
                value[i] = active.and_then(|price| cost_per_frame(price, f));
            }
        }

        ProductReport {
            name: product.name.clone(),
            active_price: active,
            tier: product.tier,
            fps_1080p: fps[0],
            fps_1440p: fps[1],
            fps_4k: fps[2],
            value_1080p: value[0],
            value_1440p: value[1],
            value_4k: value[2],
            driver_support: product.driver_support.clone(),
        }
    }
}
