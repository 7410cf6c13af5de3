//! Boundary to the system-information collaborator.
//!
//! The rendering engine consumes snapshots through [`MetricsSource`] and
//! never looks behind it. Readings a host cannot supply surface as `None`
//! or empty collections, not as errors; an error from `snapshot` means the
//! whole read failed and the caller downgrades it to placeholder content.

use crate::error::Result;

/// Identity strings shown on the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostIdentity {
    pub hostname: String,
    pub platform: String,
}

/// Aggregate and per-core CPU readings, in percent.
#[derive(Debug, Clone, Default)]
pub struct CpuLoad {
    pub aggregate: f64,
    pub per_core: Vec<f64>,
    /// Package temperature in °C, when the host exposes a sensor.
    pub temperature: Option<f64>,
    /// Per-core temperatures; may be shorter than `per_core` or empty.
    pub core_temperatures: Vec<f64>,
}

/// Memory usage in bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUsage {
    pub active: u64,
    pub total: u64,
    pub available: u64,
}

/// One process as sampled this tick.
#[derive(Debug, Clone)]
pub struct ProcessSample {
    pub command: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

/// One mounted filesystem, sizes in bytes.
#[derive(Debug, Clone)]
pub struct FilesystemUsage {
    pub mount: String,
    pub size: u64,
    pub used: u64,
    pub available: u64,
}

/// One network interface's transfer rates in bytes per second.
#[derive(Debug, Clone)]
pub struct InterfaceRate {
    pub name: String,
    pub rx_per_sec: u64,
    pub tx_per_sec: u64,
}

/// Point-in-time reading of every metric the dashboard renders.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    pub cpu: CpuLoad,
    pub memory: MemoryUsage,
    pub processes: Vec<ProcessSample>,
    pub filesystems: Vec<FilesystemUsage>,
    pub interfaces: Vec<InterfaceRate>,
}

/// The metrics collaborator. All calls are read-only between ticks and
/// assumed idempotent.
pub trait MetricsSource {
    /// Refresh and return the full snapshot.
    fn snapshot(&mut self) -> Result<HostSnapshot>;

    /// Host identity strings; stable for the life of the process.
    fn identity(&mut self) -> HostIdentity;

    /// Seconds since boot.
    fn uptime_secs(&mut self) -> u64;
}
