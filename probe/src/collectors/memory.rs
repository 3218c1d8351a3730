use sysinfo::System;
use tracing::{debug, warn};

use crate::metrics::{percentage, round2, MetricKey, Registry};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Total and free physical memory, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBytes {
    pub total: u64,
    pub free: u64,
}

/// Source of physical memory counters.
pub trait MemorySource {
    fn read(&self) -> MemoryBytes;
}

/// Physical memory as reported by the OS through `sysinfo`.
///
/// Counters are refreshed on every [`MemorySource::read`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemory;

impl MemorySource for SystemMemory {
    fn read(&self) -> MemoryBytes {
        let mut sys = System::new();
        sys.refresh_memory();
        MemoryBytes {
            total: sys.total_memory(),
            free: sys.free_memory(),
        }
    }
}

/// Physical memory usage in megabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub total_mb: f64,
    pub used_mb: f64,
    pub free_mb: f64,
    /// `NaN` when total memory is reported as zero.
    pub usage_percent: f64,
}

impl MemoryUsage {
    /// Derive used memory and usage from megabyte totals.
    pub fn from_mb(total_mb: f64, free_mb: f64) -> Self {
        let used_mb = round2(total_mb - free_mb);
        let usage_percent = percentage(used_mb, total_mb).unwrap_or_else(|| {
            warn!("Total physical memory is 0, reporting usage as NaN");
            f64::NAN
        });

        Self {
            total_mb,
            used_mb,
            free_mb,
            usage_percent,
        }
    }

    pub fn apply(&self, registry: &mut Registry) {
        registry.set_value(MetricKey::PhysMemUsage, self.usage_percent);
        registry.set_value(MetricKey::PhysMemUsed, self.used_mb);
        registry.set_value(MetricKey::PhysMemFree, self.free_mb);
    }
}

/// Collect physical memory metrics.
pub fn collect(source: &impl MemorySource) -> MemoryUsage {
    let bytes = source.read();
    let total_mb = round2(bytes.total as f64 / BYTES_PER_MB);
    let free_mb = round2(bytes.free as f64 / BYTES_PER_MB);
    let usage = MemoryUsage::from_mb(total_mb, free_mb);
    debug!(
        total_mb,
        used_mb = usage.used_mb,
        free_mb,
        usage_percent = usage.usage_percent,
        "Physical memory collected"
    );
    usage
}
