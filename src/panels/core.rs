//! Content producers for the two dashboard boxes.
//!
//! A panel owns no screen state; it turns the latest host snapshot into a
//! fresh content tree each tick. The runtime maps a panel's id onto a
//! bordered region and schedules its refreshes.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::bytes::Bytes;
use crate::content::Node;
use crate::error::{DashboardError, Result};
use crate::probe::{HostSnapshot, MetricsSource, ProcessSample};
use crate::style;

/// Rendered in place of content when a metrics read failed outright.
pub const PLACEHOLDER: &str = "Loading...";

/// Shared handle to the metrics collaborator.
pub type SharedSource = Arc<Mutex<dyn MetricsSource + Send>>;

const TOP_PROCESSES: usize = 4;

/// One box's content producer.
pub trait Panel {
    /// Region id; also keys the refresh schedule.
    fn id(&self) -> &str;

    /// Interval between refresh ticks.
    fn interval(&self) -> Duration;

    /// Produce this tick's content tree.
    fn content(&mut self) -> Result<Vec<Node>>;
}

fn lock_snapshot(source: &SharedSource) -> Result<HostSnapshot> {
    let mut guard = source
        .lock()
        .map_err(|_| DashboardError::Probe("metrics source poisoned".to_string()))?;
    guard.snapshot()
}

/// CPU, memory, process, and network overview for the left box.
pub struct SystemPanel {
    source: SharedSource,
    interval: Duration,
}

impl SystemPanel {
    pub fn new(source: SharedSource, interval: Duration) -> Self {
        Self { source, interval }
    }
}

impl Panel for SystemPanel {
    fn id(&self) -> &str {
        "system"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn content(&mut self) -> Result<Vec<Node>> {
        Ok(system_overview(&lock_snapshot(&self.source)?))
    }
}

/// Filesystem usage for the right box.
pub struct StoragePanel {
    source: SharedSource,
    interval: Duration,
}

impl StoragePanel {
    pub fn new(source: SharedSource, interval: Duration) -> Self {
        Self { source, interval }
    }
}

impl Panel for StoragePanel {
    fn id(&self) -> &str {
        "storage"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn content(&mut self) -> Result<Vec<Node>> {
        Ok(storage_overview(&lock_snapshot(&self.source)?))
    }
}

fn system_overview(snapshot: &HostSnapshot) -> Vec<Node> {
    // Width of the core count, so "CPU" and "Core #N:" meters line up.
    let core_digits = snapshot.cpu.per_core.len().to_string().len();

    let temp_suffix = |celsius: Option<f64>| {
        celsius
            .map(|t| format!(" | {}", style::temperature(t)))
            .unwrap_or_default()
    };

    let summary = format!(
        "CPU{}{} {}{}",
        " ".repeat(7 + core_digits),
        style::meter(snapshot.cpu.aggregate, style::METER_WIDTH),
        style::percent(snapshot.cpu.aggregate),
        temp_suffix(snapshot.cpu.temperature),
    );

    let cores = snapshot
        .cpu
        .per_core
        .iter()
        .enumerate()
        .map(|(index, load)| {
            Node::leaf(format!(
                "Core #{index}:{}{} {}{}",
                " ".repeat(core_digits),
                style::meter(*load, style::METER_WIDTH),
                style::percent(*load),
                temp_suffix(snapshot.cpu.core_temperatures.get(index).copied()),
            ))
        })
        .collect();

    let memory_line = format!(
        "{}/{} ({} available)",
        Bytes::from_bytes(snapshot.memory.active),
        Bytes::from_bytes(snapshot.memory.total),
        Bytes::from_bytes(snapshot.memory.available),
    );

    let interfaces = snapshot
        .interfaces
        .iter()
        .map(|iface| {
            Node::branch(vec![
                Node::leaf(format!("{}:", iface.name)),
                Node::branch(vec![
                    Node::leaf(format!(
                        "Received: {}/s",
                        Bytes::from_bytes(iface.rx_per_sec)
                    )),
                    Node::leaf(format!(
                        "Transmitted: {}/s",
                        Bytes::from_bytes(iface.tx_per_sec)
                    )),
                ]),
            ])
        })
        .collect();

    vec![
        Node::leaf(summary),
        Node::branch(cores),
        Node::leaf(""),
        Node::leaf("Top Processes CPU Usage"),
        Node::branch(top_processes(&snapshot.processes, |p| p.cpu_percent)),
        Node::leaf(""),
        Node::leaf("Memory"),
        Node::branch(vec![Node::leaf(memory_line)]),
        Node::leaf(""),
        Node::leaf("Top Processes Memory Usage"),
        Node::branch(top_processes(&snapshot.processes, |p| p.memory_percent)),
        Node::leaf(""),
        Node::leaf("Network"),
        Node::branch(interfaces),
    ]
}

fn top_processes(processes: &[ProcessSample], key: impl Fn(&ProcessSample) -> f64) -> Vec<Node> {
    let mut sorted: Vec<&ProcessSample> = processes.iter().collect();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted
        .into_iter()
        .take(TOP_PROCESSES)
        .map(|process| Node::leaf(format!("{} {}", style::percent(key(process)), process.command)))
        .collect()
}

fn storage_overview(snapshot: &HostSnapshot) -> Vec<Node> {
    let mut nodes = vec![Node::leaf("Disks:")];
    nodes.extend(snapshot.filesystems.iter().map(|fs| {
        let used_percent = if fs.size > 0 {
            fs.used as f64 / fs.size as f64 * 100.0
        } else {
            0.0
        };
        Node::branch(vec![
            Node::leaf(format!(
                "{}: {} used",
                fs.mount,
                style::percent(used_percent)
            )),
            Node::branch(vec![
                Node::leaf(Bytes::from_bytes(fs.size).to_string()),
                Node::leaf(format!("{} used", Bytes::from_bytes(fs.used))),
                Node::leaf(format!("{} available", Bytes::from_bytes(fs.available))),
                Node::leaf(""),
            ]),
        ])
    }));
    nodes
}
