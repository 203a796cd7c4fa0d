pub mod active_price;
pub mod channel;
pub mod listing_filter;
pub mod observation;
pub mod outliers;
pub mod performance;
pub mod price;
pub mod resolution;
pub mod tier;
