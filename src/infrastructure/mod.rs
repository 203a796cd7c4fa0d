pub mod clustering;
pub mod extraction;
pub mod sources;
pub mod sqlite;
