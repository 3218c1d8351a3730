use std::sync::OnceLock;

use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::SwapCommandConfig;
use crate::error::ProbeError;
use crate::metrics::{percentage, round2, MetricKey, Registry};

/// Source of the raw swap usage text.
#[allow(async_fn_in_trait)]
pub trait SwapSource {
    async fn query(&self) -> Result<String, ProbeError>;
}

/// Runs an external command and captures its stdout.
///
/// Defaults to `sysctl vm.swapusage`, which prints e.g.
/// ```text
/// vm.swapusage: total = 2048.00M  used = 512.00M  free = 1536.00M  (encrypted)
/// ```
#[derive(Debug, Clone)]
pub struct CommandSwapSource {
    command: String,
    args: Vec<String>,
}

impl CommandSwapSource {
    pub fn new(config: &SwapCommandConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }
}

impl SwapSource for CommandSwapSource {
    async fn query(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                let msg = format!("failed to execute {}: {e}", self.command);
                ProbeError::MetricsUnavailable(msg)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::MetricsUnavailable(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(command = %self.command, output = %stdout.trim(), "Swap query finished");
        Ok(stdout)
    }
}

/// Swap quantities in megabytes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwapUsage {
    pub total_mb: f64,
    pub used_mb: f64,
    pub free_mb: f64,
    /// `NaN` when total swap is zero.
    pub usage_percent: f64,
}

fn quantity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+\.\d+)([A-Za-z])").expect("valid swap quantity regex"))
}

/// Parse `<digits>.<digits><unit>` quantities in total, used, free order.
///
/// `G` values are converted to megabytes; every other unit is taken as
/// megabytes already. Missing quantities stay at 0.
pub fn parse(text: &str) -> SwapUsage {
    let values: Vec<f64> = quantity_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let value: f64 = caps[1].parse().ok()?;
            Some(if &caps[2] == "G" { value * 1024.0 } else { value })
        })
        .map(round2)
        .collect();

    if values.len() < 3 {
        warn!(
            found = values.len(),
            "Swap output has fewer than 3 quantities, missing values stay at 0"
        );
    }

    let mut usage = SwapUsage::default();
    if let Some(&total) = values.first() {
        usage.total_mb = total;
    }
    if let Some(&used) = values.get(1) {
        usage.used_mb = used;
        usage.usage_percent = percentage(used, usage.total_mb).unwrap_or_else(|| {
            warn!("Total swap is 0, reporting swap usage as NaN");
            f64::NAN
        });
    }
    if let Some(&free) = values.get(2) {
        usage.free_mb = free;
    }

    usage
}

impl SwapUsage {
    pub fn apply(&self, registry: &mut Registry) {
        registry.set_value(MetricKey::SwapMemUsage, self.usage_percent);
        registry.set_value(MetricKey::SwapMemUsed, self.used_mb);
        registry.set_value(MetricKey::SwapMemFree, self.free_mb);
    }
}

/// Query the swap source and parse its output.
pub async fn collect(source: &impl SwapSource) -> Result<SwapUsage, ProbeError> {
    let text = source.query().await?;
    let usage = parse(&text);
    debug!(
        total_mb = usage.total_mb,
        used_mb = usage.used_mb,
        free_mb = usage.free_mb,
        usage_percent = usage.usage_percent,
        "Swap collected"
    );
    Ok(usage)
}
