mod core;
mod system;

pub use core::{
    CpuLoad, FilesystemUsage, HostIdentity, HostSnapshot, InterfaceRate, MemoryUsage,
    MetricsSource, ProcessSample,
};
pub use system::SystemProbe;
