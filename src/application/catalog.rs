//! Catalog maintenance: products and their trusted spec attributes
//! (performance score, launch MSRP, driver support) as fed in by spec-page
//! scrapers. Market prices are the reconciler's business, not this one's.

use crate::domain::entities::product::{validate_performance, Product};
use crate::domain::error::DomainError;
use crate::domain::ports::product_repository::ProductRepository;
use crate::domain::values::channel::Channel;
use crate::domain::values::price::normalize;
use std::sync::Arc;

pub struct CatalogUseCase {
    repo: Arc<dyn ProductRepository>,
}

impl CatalogUseCase {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn add(
        &self,
        name: String,
        rel_performance: Option<f64>,
        launch_price: Option<f64>,
        driver_support: Option<String>,
    ) -> Result<Product, DomainError> {
        let product = Product::new(name, rel_performance, launch_price, driver_support)?;
        self.repo.add(&product)?;
        Ok(product)
    }

    pub fn get(&self, name: &str) -> Result<Product, DomainError> {
        self.repo
            .get(name)?
            .ok_or_else(|| DomainError::NotFound(format!("Product '{name}'")))
    }

    pub fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.all()
    }

    pub fn set_performance(&self, name: &str, score: f64) -> Result<(), DomainError> {
        validate_performance(score)?;
        self.require(name)?;
        self.repo.set_performance(name, score)
    }

    pub fn set_driver_support(&self, name: &str, note: &str) -> Result<(), DomainError> {
        self.require(name)?;
        self.repo.set_driver_support(name, note)
    }

    /// Launch prices arrive as scraped text ("$699", "N/A", "Not Found").
    /// An unparseable value leaves the stored price alone and reports back
    /// `None`.
    pub fn set_launch_price(&self, name: &str, raw_text: &str) -> Result<Option<f64>, DomainError> {
        self.require(name)?;
        match normalize(raw_text) {
            Some(price) => {
                self.repo.set_channel_price(name, Channel::Launch, price)?;
                Ok(Some(price))
            }
            None => Ok(None),
        }
    }

    fn require(&self, name: &str) -> Result<(), DomainError> {
        match self.repo.get(name)? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Product '{name}'"))),
        }
    }
}
