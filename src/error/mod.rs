mod types;

pub use types::{DashboardError, Result};
