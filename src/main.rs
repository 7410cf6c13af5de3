use std::env;
use std::io;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::terminal;

use hostwatch::{
    CliDriver, FileSink, Logger, Runtime, RuntimeConfig, SharedSource, Size, StoragePanel,
    SystemPanel, SystemProbe,
};

/// Box refresh interval when no argument is given or it does not parse.
const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Environment variable naming the JSON-lines log file; unset disables
/// logging entirely.
const LOG_PATH_VAR: &str = "HOSTWATCH_LOG";

const LOG_MAX_BYTES: u64 = 4 << 20;

fn main() -> ExitCode {
    // One optional positional argument: the refresh interval in
    // milliseconds. Anything unparseable falls back silently.
    let interval_ms = env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(DEFAULT_INTERVAL_MS);
    let interval = Duration::from_millis(interval_ms.max(1));

    let mut config = RuntimeConfig::default();
    if let Ok(path) = env::var(LOG_PATH_VAR) {
        match FileSink::new(&path, LOG_MAX_BYTES) {
            Ok(sink) => config.logger = Some(Logger::new(sink)),
            Err(err) => {
                eprintln!("hostwatch: cannot open log file {path}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let size = match terminal::size() {
        Ok((width, height)) => Size::new(width, height),
        Err(err) => {
            eprintln!("hostwatch: cannot query terminal size: {err}");
            return ExitCode::FAILURE;
        }
    };

    let source: SharedSource = Arc::new(Mutex::new(SystemProbe::new()));
    let mut runtime = match Runtime::new(io::stdout(), size, source.clone(), config) {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("hostwatch: {err}");
            return ExitCode::FAILURE;
        }
    };

    let panels = [
        Box::new(SystemPanel::new(source.clone(), interval)) as Box<dyn hostwatch::Panel>,
        Box::new(StoragePanel::new(source, interval)),
    ];
    for panel in panels {
        if let Err(err) = runtime.register_panel(panel) {
            eprintln!("hostwatch: {err}");
            return ExitCode::FAILURE;
        }
    }

    match CliDriver::new(runtime).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hostwatch: {err}");
            ExitCode::FAILURE
        }
    }
}
