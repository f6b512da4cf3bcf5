/// Simplified wrapper for metrics with runtime names
use metrics::{counter, gauge, histogram};

/// Increment a counter
pub fn increment_counter(name: &str, value: u64) {
    counter!(name.to_string(), value);
}

/// Record a histogram value
pub fn record_histogram(name: &str, value: f64) {
    histogram!(name.to_string(), value);
}

/// Set a gauge value
pub fn set_gauge(name: &str, value: f64) {
    gauge!(name.to_string(), value);
}
