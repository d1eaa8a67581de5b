pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod report;

pub use config::ReportConfig;
pub use error::ReportError;

#[cfg(test)]
mod report_test;
