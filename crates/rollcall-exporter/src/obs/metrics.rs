//! Exporter metric registry.
//!
//! Every family is registered once, by full name, in a process-scoped
//! `prometheus::Registry`; a second registration of a name is refused.
//! Rendering gathers the registry into the text exposition format.

use prometheus::{Encoder, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use rollcall_core::error::{Result, RollcallError};

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// A prefix is valid when it is empty or is itself a valid metric name.
pub fn is_valid_prefix(prefix: &str) -> bool {
    prefix.is_empty() || is_valid_metric_name(prefix)
}

fn register_error(name: &str, e: prometheus::Error) -> RollcallError {
    match e {
        prometheus::Error::AlreadyReg => RollcallError::DuplicateMetric(name.to_string()),
        e => RollcallError::Internal(format!("register {name} failed: {e}")),
    }
}

fn gauge_in(registry: &Registry, name: String, help: &str) -> Result<IntGauge> {
    let g = IntGauge::new(name.as_str(), help)
        .map_err(|_| RollcallError::InvalidMetricName(name.clone()))?;
    registry
        .register(Box::new(g.clone()))
        .map_err(|e| register_error(&name, e))?;
    Ok(g)
}

/// Exporter-wide metrics: the registry plus the exporter's own state gauge.
pub struct ExporterMetrics {
    prefix: String,
    registry: Registry,
    draining: IntGauge,
}

impl ExporterMetrics {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !is_valid_prefix(&prefix) {
            return Err(RollcallError::InvalidMetricName(prefix));
        }
        let registry = Registry::new();
        let draining = gauge_in(
            &registry,
            format!("{prefix}exporter_draining"),
            "1 while the exporter is shutting down",
        )?;
        Ok(Self { prefix, registry, draining })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full metric name for `suffix` under the configured prefix.
    pub fn name(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    /// Create and register `<prefix><suffix>` as an unlabeled gauge.
    pub fn register_gauge(&self, suffix: &str, help: &str) -> Result<IntGauge> {
        gauge_in(&self.registry, self.name(suffix), help)
    }

    /// Create and register `<prefix><suffix>` as a labeled gauge family.
    pub fn register_gauge_vec(&self, suffix: &str, help: &str, labels: &[&str]) -> Result<IntGaugeVec> {
        let name = self.name(suffix);
        let g = IntGaugeVec::new(Opts::new(name.as_str(), help), labels)
            .map_err(|_| RollcallError::InvalidMetricName(name.clone()))?;
        self.registry
            .register(Box::new(g.clone()))
            .map_err(|e| register_error(&name, e))?;
        Ok(g)
    }

    /// Mark draining state.
    pub fn set_draining(&self) { self.draining.set(1); }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool { self.draining.get() != 0 }

    /// Gather every registered family and encode it in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = vec![];
        if let Err(e) = encoder.encode(&families, &mut buffer) {
            tracing::error!(error = %e, "failed to encode metrics");
            return String::new();
        }
        match String::from_utf8(buffer) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "encoded metrics were not valid UTF-8");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_name_rules() {
        assert!(is_valid_metric_name("rollcall_connected_player"));
        assert!(is_valid_metric_name("_x:y"));
        assert!(!is_valid_metric_name(""));
        assert!(!is_valid_metric_name("9lives"));
        assert!(!is_valid_metric_name("bad-name"));
        assert!(is_valid_prefix(""));
        assert!(!is_valid_prefix("has space_"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let m = ExporterMetrics::new("p_").unwrap();
        m.register_gauge("a_count", "a").unwrap();
        let err = m.register_gauge("a_count", "a").unwrap_err();
        assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
    }

    #[test]
    fn draining_gauge_is_registered_once() {
        let m = ExporterMetrics::new("p_").unwrap();
        let err = m.register_gauge("exporter_draining", "again").unwrap_err();
        assert_eq!(err.code().as_str(), "DUPLICATE_METRIC");
    }

    #[test]
    fn invalid_name_is_rejected() {
        let m = ExporterMetrics::new("").unwrap();
        let err = m.register_gauge("bad name", "x").unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_METRIC_NAME");
    }

    #[test]
    fn gauge_can_go_negative() {
        let m = ExporterMetrics::new("p_").unwrap();
        let g = m.register_gauge("n", "n").unwrap();
        g.dec();
        g.dec();
        g.inc();
        assert_eq!(g.get(), -1);
        assert!(m.render().contains("p_n -1\n"));
    }

    #[test]
    fn render_includes_help_and_type() {
        let m = ExporterMetrics::new("p_").unwrap();
        let v = m.register_gauge_vec("b", "per player", &["name"]).unwrap();
        v.with_label_values(&["z"]).set(1);

        let out = m.render();
        assert!(out.contains("# HELP p_b per player\n# TYPE p_b gauge\np_b{name=\"z\"} 1\n"));
        assert!(out.contains(
            "# HELP p_exporter_draining 1 while the exporter is shutting down\n# TYPE p_exporter_draining gauge\np_exporter_draining 0\n"
        ));
    }

    #[test]
    fn exporter_metrics_prefix_and_draining() {
        let m = ExporterMetrics::new("rc_").unwrap();
        assert_eq!(m.name("x"), "rc_x");
        assert!(!m.is_draining());
        assert!(m.render().contains("rc_exporter_draining 0"));
        m.set_draining();
        assert!(m.is_draining());
        assert!(m.render().contains("rc_exporter_draining 1"));
        assert!(ExporterMetrics::new("bad prefix").is_err());
    }
}
