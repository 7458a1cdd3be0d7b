//! Interactive creature-statistics dashboard: a PostgreSQL-backed dataset
//! with a fixed fallback, filtered and ranked into two bar-chart
//! specifications served over HTTP.

pub mod charts;
pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod server;
