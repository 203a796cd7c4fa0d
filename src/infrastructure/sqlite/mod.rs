pub mod migrations;
pub mod product_repo;
