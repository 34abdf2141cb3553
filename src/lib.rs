pub mod config;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod output;
pub mod provider_factory;
pub mod providers;
pub mod rewrite;
