use std::time::Duration;

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated by the refresh runtime.
#[derive(Debug, Default, Clone)]
pub struct RuntimeMetrics {
    ticks: u64,
    redraws: u64,
    rows_written: u64,
    probe_failures: u64,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    pub fn record_redraw(&mut self, rows_written: usize) {
        self.redraws = self.redraws.saturating_add(1);
        self.rows_written = self.rows_written.saturating_add(rows_written as u64);
    }

    pub fn record_probe_failure(&mut self) {
        self.probe_failures = self.probe_failures.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            ticks: self.ticks,
            redraws: self.redraws,
            rows_written: self.rows_written,
            probe_failures: self.probe_failures,
        }
    }
}

/// Frozen counter values at one emission point.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub ticks: u64,
    pub redraws: u64,
    pub rows_written: u64,
    pub probe_failures: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        fields.insert("ticks".to_string(), json!(self.ticks));
        fields.insert("redraws".to_string(), json!(self.redraws));
        fields.insert("rows_written".to_string(), json!(self.rows_written));
        fields.insert("probe_failures".to_string(), json!(self.probe_failures));
        fields
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "runtime_metrics".to_string(),
            self.as_fields(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut metrics = RuntimeMetrics::new();
        metrics.record_tick();
        metrics.record_tick();
        metrics.record_redraw(5);
        metrics.record_probe_failure();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.ticks, 2);
        assert_eq!(snapshot.redraws, 1);
        assert_eq!(snapshot.rows_written, 5);
        assert_eq!(snapshot.probe_failures, 1);
        assert_eq!(snapshot.uptime_ms, 1500);
    }

    #[test]
    fn snapshot_serializes_all_fields() {
        let snapshot = RuntimeMetrics::new().snapshot(Duration::from_secs(1));
        let event = snapshot.to_log_event("hostwatch::runtime.metrics");
        assert_eq!(event.fields.len(), 5);
        assert_eq!(event.message, "runtime_metrics");
    }
}
