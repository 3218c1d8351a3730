//! Metric registry.
//!
//! The six metrics are fixed. Their order is defined by [`MetricKey::ALL`]
//! and is shared by the metric state mask and the report output.

/// Stable internal name of a metric. Never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    PhysMemUsage,
    PhysMemUsed,
    PhysMemFree,
    SwapMemUsage,
    SwapMemUsed,
    SwapMemFree,
}

impl MetricKey {
    /// Registry order. Mask position `i` enables `ALL[i]`.
    pub const ALL: [MetricKey; 6] = [
        MetricKey::PhysMemUsage,
        MetricKey::PhysMemUsed,
        MetricKey::PhysMemFree,
        MetricKey::SwapMemUsage,
        MetricKey::SwapMemUsed,
        MetricKey::SwapMemFree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKey::PhysMemUsage => "phys_mem_usage",
            MetricKey::PhysMemUsed => "phys_mem_used",
            MetricKey::PhysMemFree => "phys_mem_free",
            MetricKey::SwapMemUsage => "swap_mem_usage",
            MetricKey::SwapMemUsed => "swap_mem_used",
            MetricKey::SwapMemFree => "swap_mem_free",
        }
    }

    /// External identifier: metric number, display name and data-type code.
    pub fn id(self) -> &'static str {
        match self {
            MetricKey::PhysMemUsage => "82:% Used Physical Memory:6",
            MetricKey::PhysMemUsed => "2009:Used Physical Memory:4",
            MetricKey::PhysMemFree => "66:Free Physical Memory:4",
            MetricKey::SwapMemUsage => "16:% Used Swap:6",
            MetricKey::SwapMemUsed => "15:Used Swap:4",
            MetricKey::SwapMemFree => "47:Free Swap:4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One measurement reported per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub key: MetricKey,
    pub id: &'static str,
    pub value: f64,
    pub enabled: bool,
}

impl Metric {
    fn new(key: MetricKey) -> Self {
        Self {
            key,
            id: key.id(),
            value: 0.0,
            enabled: true,
        }
    }
}

/// Fixed, ordered set of the six metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    metrics: [Metric; 6],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// All six metrics, enabled, with value 0.
    pub fn new() -> Self {
        Self {
            metrics: MetricKey::ALL.map(Metric::new),
        }
    }

    pub fn get(&self, key: MetricKey) -> &Metric {
        &self.metrics[key.index()]
    }

    pub fn set_value(&mut self, key: MetricKey, value: f64) {
        self.metrics[key.index()].value = value;
    }

    pub fn set_enabled(&mut self, key: MetricKey, enabled: bool) {
        self.metrics[key.index()].enabled = enabled;
    }

    /// Iterate in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 * part / total`, rounded to 2 decimals. `None` when `total` is zero.
pub(crate) fn percentage(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        return None;
    }
    Some(round2(100.0 * part / total))
}
