use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::error::DashboardError;
use crate::runtime::Runtime;

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("runtime error: {0}")]
    Runtime(#[from] DashboardError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Owns raw mode and screen state around the runtime loop.
///
/// This is the single exit path: the terminal is restored (cursor shown,
/// alternate screen left, raw mode off) exactly once in `run`'s epilogue,
/// whichever way the loop ends.
pub struct CliDriver {
    runtime: Runtime<io::Stdout>,
}

impl CliDriver {
    pub fn new(runtime: Runtime<io::Stdout>) -> Self {
        Self { runtime }
    }

    pub fn run(mut self) -> DriverResult<()> {
        let mut stdout = io::stdout();
        Self::enter(&mut stdout)?;
        let result = self.runtime.run().map_err(CliDriverError::from);
        Self::exit(&mut stdout);
        result
    }

    fn enter(stdout: &mut impl Write) -> DriverResult<()> {
        terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    fn exit(stdout: &mut impl Write) {
        execute!(stdout, Clear(ClearType::All), Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}
