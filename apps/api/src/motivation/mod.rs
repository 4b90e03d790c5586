// Daily motivation log: append-only entries, averages and chart series.

pub mod aggregate;
pub mod handlers;
pub mod store;
