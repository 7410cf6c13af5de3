mod core;

pub use core::{Panel, SharedSource, StoragePanel, SystemPanel, PLACEHOLDER};
