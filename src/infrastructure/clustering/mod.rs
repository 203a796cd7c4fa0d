pub mod kmeans;
pub mod quantile;
