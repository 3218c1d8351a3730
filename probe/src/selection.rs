//! Metric state mask decoding.
//!
//! The mask is a comma-separated list of `0`/`1` flags, one per metric, in
//! [`MetricKey::ALL`] order. It may arrive wrapped in literal double quotes.

use tracing::debug;

use crate::error::ProbeError;
use crate::metrics::{MetricKey, Registry};

/// Decode `raw` into one enabled flag per metric.
pub fn decode(raw: &str) -> Result<[bool; 6], ProbeError> {
    let tokens: Vec<&str> = raw.trim().trim_matches('"').split(',').collect();

    if tokens.len() != MetricKey::ALL.len() {
        return Err(ProbeError::Configuration(format!(
            "invalid number of metric states: expected {}, got {}",
            MetricKey::ALL.len(),
            tokens.len()
        )));
    }

    let mut flags = [true; 6];
    for (i, token) in tokens.iter().enumerate() {
        flags[i] = match token.trim() {
            "1" => true,
            "0" => false,
            other => {
                return Err(ProbeError::Configuration(format!(
                    "invalid metric state {other:?} at position {i}: expected 0 or 1"
                )))
            }
        };
    }

    Ok(flags)
}

/// Apply an optional mask to the registry. `None` leaves every metric enabled.
pub fn apply(registry: &mut Registry, raw: Option<&str>) -> Result<(), ProbeError> {
    let Some(raw) = raw else {
        return Ok(());
    };

    let flags = decode(raw)?;
    for (key, enabled) in MetricKey::ALL.into_iter().zip(flags) {
        debug!(metric = key.name(), enabled, "Metric state");
        registry.set_enabled(key, enabled);
    }

    Ok(())
}
