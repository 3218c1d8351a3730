//! memprobe: single-shot physical and swap memory probe.
//!
//! One run decodes the metric state mask, queries swap usage through an
//! external command, reads physical memory from the OS and writes each
//! enabled metric as an `<id>|<value>|` line.

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod selection;

use std::io::Write;

use collectors::{MemorySource, SwapSource};
use error::ProbeError;
use metrics::Registry;

/// Run the probe pipeline once.
///
/// Nothing is written to `out` unless every step before reporting succeeds.
pub async fn run(
    metric_state: Option<&str>,
    swap_source: &impl SwapSource,
    memory_source: &impl MemorySource,
    out: &mut impl Write,
) -> Result<usize, ProbeError> {
    let mut registry = Registry::new();
    selection::apply(&mut registry, metric_state)?;

    collectors::collect_all(&mut registry, swap_source, memory_source).await?;

    let written = report::write(&registry, out)?;
    Ok(written)
}
