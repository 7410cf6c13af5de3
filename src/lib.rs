//! Terminal host-metrics dashboard engine.
//!
//! The crate is organised around a small canvas/box layout core: an ANSI
//! cursor abstraction, visible-width-aware fitting, recursive content
//! flattening, and bordered scroll-window regions, driven by a cooperative
//! single-threaded refresh runtime. The `hostwatch` binary wires the engine
//! to a `sysinfo`-backed metrics probe.

pub mod bytes;
pub mod canvas;
pub mod content;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod panels;
pub mod probe;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod style;
pub mod width;

pub use bytes::Bytes;
pub use canvas::{Canvas, CursorPosition};
pub use content::{flatten, Node};
pub use error::{DashboardError, Result};
pub use geometry::{Rect, Size};
pub use layout::ScreenLayout;
pub use logging::{
    json_kv, FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
};
pub use metrics::{MetricSnapshot, RuntimeMetrics};
pub use panels::{Panel, SharedSource, StoragePanel, SystemPanel};
pub use probe::{
    CpuLoad, FilesystemUsage, HostIdentity, HostSnapshot, InterfaceRate, MemoryUsage,
    MetricsSource, ProcessSample, SystemProbe,
};
pub use registry::ScheduleRegistry;
pub use render::{format_uptime, Header, ScrollingBox};
pub use runtime::driver::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{Runtime, RuntimeConfig, RuntimeEvent};
pub use width::display_width;
