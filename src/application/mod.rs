pub mod catalog;
pub mod reconcile;
pub mod report;
pub mod tiering;
