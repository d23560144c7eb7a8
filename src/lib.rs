pub mod config;
pub mod dataset;
pub mod export;
pub mod http_client;
pub mod layout;
pub mod provider;
pub mod radar;
pub mod ranking;
pub mod records;
pub mod run_types;
pub mod theme;
pub mod tool;
