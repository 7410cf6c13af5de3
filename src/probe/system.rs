use std::time::Instant;

use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    RefreshKind, System,
};

use super::core::{
    CpuLoad, FilesystemUsage, HostIdentity, HostSnapshot, InterfaceRate, MemoryUsage,
    MetricsSource, ProcessSample,
};
use crate::error::Result;

/// [`MetricsSource`] backed by the `sysinfo` crate.
///
/// Network counters are cumulative-per-refresh in sysinfo, so per-second
/// rates come from dividing by the wall time since the previous snapshot;
/// the first snapshot reports zero rates.
pub struct SystemProbe {
    system: System,
    disks: Disks,
    networks: Networks,
    components: Components,
    last_refresh: Option<Instant>,
}

impl SystemProbe {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything())
                .with_processes(ProcessRefreshKind::everything()),
        );
        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
            last_refresh: None,
        }
    }

    fn cpu(&self) -> CpuLoad {
        let mut temperature = None;
        let mut core_temperatures = Vec::new();
        for component in self.components.list() {
            let label = component.label().to_ascii_lowercase();
            if label.contains("core") {
                core_temperatures.push(f64::from(component.temperature()));
            } else if temperature.is_none()
                && (label.contains("cpu") || label.contains("package") || label.contains("tctl"))
            {
                temperature = Some(f64::from(component.temperature()));
            }
        }
        if temperature.is_none() {
            temperature = core_temperatures.first().copied();
        }

        CpuLoad {
            aggregate: f64::from(self.system.global_cpu_info().cpu_usage()),
            per_core: self
                .system
                .cpus()
                .iter()
                .map(|cpu| f64::from(cpu.cpu_usage()))
                .collect(),
            temperature,
            core_temperatures,
        }
    }

    fn memory(&self) -> MemoryUsage {
        MemoryUsage {
            active: self.system.used_memory(),
            total: self.system.total_memory(),
            available: self.system.available_memory(),
        }
    }

    fn processes(&self) -> Vec<ProcessSample> {
        let total_memory = self.system.total_memory().max(1);
        self.system
            .processes()
            .values()
            .map(|process| ProcessSample {
                command: process.name().to_string(),
                cpu_percent: f64::from(process.cpu_usage()),
                memory_percent: process.memory() as f64 / total_memory as f64 * 100.0,
            })
            .collect()
    }

    fn filesystems(&self) -> Vec<FilesystemUsage> {
        self.disks
            .list()
            .iter()
            .map(|disk| {
                let size = disk.total_space();
                let available = disk.available_space();
                FilesystemUsage {
                    mount: disk.mount_point().to_string_lossy().into_owned(),
                    size,
                    used: size.saturating_sub(available),
                    available,
                }
            })
            .collect()
    }

    fn interfaces(&self, elapsed_secs: f64) -> Vec<InterfaceRate> {
        self.networks
            .iter()
            .map(|(name, data)| {
                let rate = |bytes: u64| {
                    if elapsed_secs > 0.0 {
                        (bytes as f64 / elapsed_secs) as u64
                    } else {
                        0
                    }
                };
                InterfaceRate {
                    name: name.clone(),
                    rx_per_sec: rate(data.received()),
                    tx_per_sec: rate(data.transmitted()),
                }
            })
            .collect()
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SystemProbe {
    fn snapshot(&mut self) -> Result<HostSnapshot> {
        self.system
            .refresh_cpu_specifics(CpuRefreshKind::everything());
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::everything());
        self.system
            .refresh_processes_specifics(ProcessRefreshKind::everything());
        self.disks.refresh();
        self.networks.refresh();
        self.components.refresh();

        let elapsed_secs = self
            .last_refresh
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.last_refresh = Some(Instant::now());

        Ok(HostSnapshot {
            cpu: self.cpu(),
            memory: self.memory(),
            processes: self.processes(),
            filesystems: self.filesystems(),
            interfaces: self.interfaces(elapsed_secs),
        })
    }

    fn identity(&mut self) -> HostIdentity {
        HostIdentity {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        }
    }

    fn uptime_secs(&mut self) -> u64 {
        System::uptime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_succeeds_on_the_host() {
        let mut probe = SystemProbe::new();
        let snapshot = probe.snapshot().unwrap();
        assert!(snapshot.memory.total > 0);
        assert!(!snapshot.cpu.per_core.is_empty());
    }

    #[test]
    fn identity_is_populated() {
        let mut probe = SystemProbe::new();
        let identity = probe.identity();
        assert!(!identity.hostname.is_empty());
        assert!(!identity.platform.is_empty());
    }
}
