// Data models and sequence helpers shared between the indicator engine and its callers.
pub mod models;
pub mod utils;
