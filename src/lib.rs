pub mod apis;
pub mod clock;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod server;
