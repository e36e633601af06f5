pub mod bot;
pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod dates;
pub mod error;
pub mod fixtures;
pub mod formatting;
pub mod host;
pub mod team_abbrev;
pub mod types;

#[cfg(any(test, feature = "development"))]
pub mod dev;
