pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod poller;
pub mod stats;
