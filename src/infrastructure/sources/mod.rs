pub mod noop;
pub mod static_source;
