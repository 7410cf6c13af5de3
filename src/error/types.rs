use thiserror::Error;

/// Unified result type for the dashboard crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced by the canvas, layout, and refresh machinery.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("terminal too small: {width}x{height}")]
    TerminalTooSmall { width: u16, height: u16 },
    #[error("panel `{0}` is already registered")]
    DuplicatePanel(String),
    #[error("no screen region left for panel `{0}`")]
    RegionExhausted(String),
    #[error("metrics probe failure: {0}")]
    Probe(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
