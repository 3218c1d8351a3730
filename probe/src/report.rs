use std::io::Write;

use crate::metrics::{Metric, Registry};

/// Format one report line: `<id>|<value>|`.
pub fn format_line(metric: &Metric) -> String {
    format!("{}|{:.2}|", metric.id, metric.value)
}

/// Write every enabled metric in registry order, flushing after each line.
pub fn write(registry: &Registry, out: &mut impl Write) -> std::io::Result<usize> {
    let mut written = 0;
    for metric in registry.iter().filter(|m| m.enabled) {
        writeln!(out, "{}", format_line(metric))?;
        out.flush()?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricKey;

    fn render(registry: &Registry) -> String {
        let mut out = Vec::new();
        write(registry, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_line() {
        let mut registry = Registry::new();
        registry.set_value(MetricKey::SwapMemUsed, 512.0);
        assert_eq!(
            format_line(registry.get(MetricKey::SwapMemUsed)),
            "15:Used Swap:4|512.00|"
        );
    }

    #[test]
    fn test_nan_sentinel_format() {
        let mut registry = Registry::new();
        registry.set_value(MetricKey::SwapMemUsage, f64::NAN);
        assert_eq!(
            format_line(registry.get(MetricKey::SwapMemUsage)),
            "16:% Used Swap:6|NaN|"
        );
    }

    #[test]
    fn test_all_enabled_in_registry_order() {
        let body = render(&Registry::new());
        assert_eq!(
            body,
            "82:% Used Physical Memory:6|0.00|\n\
             2009:Used Physical Memory:4|0.00|\n\
             66:Free Physical Memory:4|0.00|\n\
             16:% Used Swap:6|0.00|\n\
             15:Used Swap:4|0.00|\n\
             47:Free Swap:4|0.00|\n"
        );
    }

    #[test]
    fn test_disabled_metrics_skipped() {
        let mut registry = Registry::new();
        registry.set_enabled(MetricKey::PhysMemUsed, false);
        registry.set_enabled(MetricKey::SwapMemFree, false);

        let mut out = Vec::new();
        let written = write(&registry, &mut out).unwrap();
        let body = String::from_utf8(out).unwrap();

        assert_eq!(written, 4);
        assert_eq!(body.lines().count(), 4);
        assert!(!body.contains("2009:"));
        assert!(!body.contains("47:"));
    }

    #[test]
    fn test_nothing_enabled_writes_nothing() {
        let mut registry = Registry::new();
        for key in MetricKey::ALL {
            registry.set_enabled(key, false);
        }
        assert_eq!(render(&registry), "");
    }
}
