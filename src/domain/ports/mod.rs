pub mod listing_source;
pub mod partitioner;
pub mod price_extractor;
pub mod product_repository;
