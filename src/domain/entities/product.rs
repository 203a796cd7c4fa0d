use crate::domain::error::DomainError;
use crate::domain::values::active_price;
use crate::domain::values::channel::Channel;
use crate::domain::values::tier::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalogued card. `name` is the primary key, case-sensitive and
/// immutable once created; every marketplace match keys off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Percentage scale against the reference device (100 = baseline).
    pub rel_performance: Option<f64>,
    pub launch_price: Option<f64>,
    pub new_avg: Option<f64>,
    pub used_avg: Option<f64>,
    pub tier: Option<Tier>,
    pub driver_support: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        rel_performance: Option<f64>,
        launch_price: Option<f64>,
        driver_support: Option<String>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Product name must not be empty".into(),
            ));
        }
        if let Some(p) = rel_performance {
            validate_performance(p)?;
        }
        let now = Utc::now();
        Ok(Self {
            name,
            rel_performance,
            launch_price,
            new_avg: None,
            used_avg: None,
            tier: None,
            driver_support,
            created_at: now,
            updated_at: now,
        })
    }

    /// Waterfall price: used average, else new average, else launch MSRP.
    pub fn active_price(&self) -> Option<f64> {
        active_price::active_price(self.used_avg, self.new_avg, self.launch_price)
    }

    /// Currently stored price for one channel.
    pub fn channel_price(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::New => self.new_avg,
            Channel::Used => self.used_avg,
            Channel::Launch => self.launch_price,
        }
    }
}

/// Performance scores are percentages; a negative one is a caller bug.
pub fn validate_performance(score: f64) -> Result<(), DomainError> {
    if !score.is_finite() || score < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "Relative performance must be a non-negative number, got {score}"
        )));
    }
    Ok(())
}
