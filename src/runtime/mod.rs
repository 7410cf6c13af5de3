use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use serde_json::json;

use crate::canvas::Canvas;
use crate::content::Node;
use crate::error::{DashboardError, Result};
use crate::geometry::Size;
use crate::layout::{self, ScreenLayout};
use crate::logging::{json_kv, LogLevel, Logger};
use crate::metrics::RuntimeMetrics;
use crate::panels::{Panel, SharedSource, PLACEHOLDER};
use crate::probe::HostIdentity;
use crate::registry::ScheduleRegistry;
use crate::render::{Header, ScrollingBox};

pub mod driver;

/// Schedule id of the header redraw task.
pub const HEADER_ID: &str = "header";

/// Poll timeout when no task is scheduled; only reachable before the first
/// panel registers.
const IDLE_POLL: Duration = Duration::from_millis(200);

/// Configuration knobs for the refresh loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Title drawn centered on the top row.
    pub title: String,
    /// Interval between header redraws, independent of any box interval.
    pub header_interval: Duration,
    /// Fixed offset between consecutive boxes' deadlines so collaborator
    /// calls do not burst in the same instant.
    pub stagger: Duration,
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Hostwatch".to_string(),
            header_interval: Duration::from_millis(1000),
            stagger: Duration::from_millis(250),
            logger: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "hostwatch::runtime.metrics".to_string(),
        }
    }
}

/// Events the loop dispatches, in live and scripted runs alike.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A schedule fired for the named region.
    Tick { id: String },
    Key(KeyEvent),
    Resize(Size),
}

/// The cooperative single-threaded refresh loop.
///
/// All work runs on one logical thread; concurrency is multiple
/// independently scheduled periodic tasks interleaved by the poll loop.
/// Each box owns a disjoint screen region, so interleaved ticks never write
/// the same cell range.
pub struct Runtime<W: Write> {
    canvas: Canvas<W>,
    layout: ScreenLayout,
    header: Header,
    panels: Vec<Box<dyn Panel>>,
    boxes: HashMap<String, ScrollingBox>,
    source: SharedSource,
    identity: HostIdentity,
    registry: ScheduleRegistry,
    config: RuntimeConfig,
    metrics: RuntimeMetrics,
    should_exit: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl<W: Write> Runtime<W> {
    pub fn new(out: W, size: Size, source: SharedSource, config: RuntimeConfig) -> Result<Self> {
        let layout = layout::solve(size)?;
        let identity = match source.lock() {
            Ok(mut guard) => guard.identity(),
            Err(_) => HostIdentity::default(),
        };
        let header = Header::new(config.title.clone());
        Ok(Self {
            canvas: Canvas::new(out, size),
            layout,
            header,
            panels: Vec::new(),
            boxes: HashMap::new(),
            source,
            identity,
            registry: ScheduleRegistry::new(),
            config,
            metrics: RuntimeMetrics::new(),
            should_exit: false,
            start_instant: None,
            last_metrics_emit: None,
        })
    }

    pub fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    pub fn canvas(&self) -> &Canvas<W> {
        &self.canvas
    }

    pub fn schedules(&self) -> &ScheduleRegistry {
        &self.registry
    }

    pub fn exit_requested(&self) -> bool {
        self.should_exit
    }

    /// Current scroll offset of a box, mainly for assertions.
    pub fn scroll_offset(&self, id: &str) -> Option<usize> {
        self.boxes.get(id).map(ScrollingBox::scroll_offset)
    }

    /// Attach a content panel to the next free region, left box first.
    pub fn register_panel(&mut self, panel: Box<dyn Panel>) -> Result<()> {
        let id = panel.id().to_string();
        if self.boxes.contains_key(&id) {
            return Err(DashboardError::DuplicatePanel(id));
        }
        let rect = match self.panels.len() {
            0 => self.layout.left,
            1 => self.layout.right,
            _ => return Err(DashboardError::RegionExhausted(id)),
        };
        self.boxes.insert(id.clone(), ScrollingBox::new(id, rect));
        self.panels.push(panel);
        Ok(())
    }

    /// Run against the live terminal until an exit is requested.
    pub fn run(&mut self) -> Result<()> {
        self.bootstrap()?;

        while !self.should_exit {
            let now = Instant::now();
            let timeout = self
                .registry
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(now))
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => self.dispatch(RuntimeEvent::Key(key))?,
                    CrosstermEvent::Resize(width, height) => {
                        self.dispatch(RuntimeEvent::Resize(Size::new(width, height)))?;
                    }
                    _ => {}
                }
                if self.should_exit {
                    break;
                }
            }

            let now = Instant::now();
            for id in self.registry.take_due(now) {
                self.dispatch(RuntimeEvent::Tick { id })?;
            }
        }

        self.finalize();
        Ok(())
    }

    /// Drive the same dispatch path from a prepared event sequence. Used by
    /// tests and benches for deterministic runs.
    pub fn run_scripted<I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RuntimeEvent>,
    {
        self.bootstrap()?;
        for event in events {
            self.dispatch(event)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    fn bootstrap(&mut self) -> Result<()> {
        self.should_exit = false;
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        self.initialize(now)?;
        self.log(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("panels", json!(self.panels.len())),
                json_kv("schedules", json!(self.registry.len())),
            ],
        );
        Ok(())
    }

    /// Full (re-)initialization: clear the canvas, redraw the header once,
    /// redraw each box frame, refresh each box immediately, and make sure a
    /// schedule exists for every region. Idempotent with respect to the
    /// schedule table.
    fn initialize(&mut self, now: Instant) -> Result<()> {
        self.canvas.hide_cursor()?;
        self.canvas.clear()?;
        self.canvas.reset_cursor()?;
        self.draw_header()?;
        self.registry.register_if_absent(
            HEADER_ID,
            self.config.header_interval,
            now + self.config.header_interval,
        );

        for index in 0..self.panels.len() {
            let id = self.panels[index].id().to_string();
            let interval = self.panels[index].interval();
            let rect = if index == 0 {
                self.layout.left
            } else {
                self.layout.right
            };
            if let Some(region) = self.boxes.get_mut(&id) {
                region.relayout(rect);
            }
            if let Some(region) = self.boxes.get(&id) {
                region.draw_frame(&mut self.canvas)?;
            }
            self.refresh_box(&id)?;
            let first_due = now + interval + self.config.stagger * index as u32;
            self.registry.register_if_absent(id, interval, first_due);
        }

        self.canvas.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, event: RuntimeEvent) -> Result<()> {
        match event {
            RuntimeEvent::Tick { id } => self.fire(&id)?,
            RuntimeEvent::Key(key) => self.handle_key(key)?,
            RuntimeEvent::Resize(size) => self.handle_resize(size)?,
        }
        self.maybe_emit_metrics();
        Ok(())
    }

    fn fire(&mut self, id: &str) -> Result<()> {
        self.metrics.record_tick();
        if id == HEADER_ID {
            self.draw_header()?;
        } else {
            self.refresh_box(id)?;
        }
        self.canvas.flush()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_exit();
            }
            KeyCode::Char('q') => self.request_exit(),
            KeyCode::Char('r') => self.initialize(Instant::now())?,
            _ => {}
        }
        Ok(())
    }

    fn request_exit(&mut self) {
        self.should_exit = true;
        self.log(LogLevel::Info, "exit_requested", std::iter::empty());
    }

    fn handle_resize(&mut self, size: Size) -> Result<()> {
        self.canvas.set_size(size);
        match layout::solve(size) {
            Ok(layout) => {
                self.layout = layout;
                self.log(
                    LogLevel::Info,
                    "resized",
                    [
                        json_kv("width", json!(size.width)),
                        json_kv("height", json!(size.height)),
                    ],
                );
                self.initialize(Instant::now())
            }
            Err(err) => {
                // Keep drawing at the previous geometry until it grows back.
                self.log(
                    LogLevel::Warn,
                    "resize_rejected",
                    [json_kv("error", json!(err.to_string()))],
                );
                Ok(())
            }
        }
    }

    fn draw_header(&mut self) -> Result<()> {
        let uptime = match self.source.lock() {
            Ok(mut guard) => guard.uptime_secs(),
            Err(_) => 0,
        };
        self.header
            .draw(&mut self.canvas, &self.layout, &self.identity, uptime)
    }

    /// Refresh one box from its panel. A failed metrics read renders the
    /// placeholder and never cancels the schedule.
    fn refresh_box(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.panels.iter().position(|panel| panel.id() == id) else {
            return Ok(());
        };
        let content = match self.panels[index].content() {
            Ok(nodes) => nodes,
            Err(err) => {
                self.metrics.record_probe_failure();
                self.log(
                    LogLevel::Warn,
                    "probe_failed",
                    [
                        json_kv("panel", json!(id)),
                        json_kv("error", json!(err.to_string())),
                    ],
                );
                vec![Node::leaf(PLACEHOLDER)]
            }
        };
        if let Some(region) = self.boxes.get_mut(id) {
            let written = region.refresh(&mut self.canvas, &content)?;
            self.metrics.record_redraw(written);
        }
        Ok(())
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms as u64))],
        );
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval.is_zero() {
            return;
        }
        let Some(logger) = self.config.logger.clone() else {
            return;
        };

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();
        let event = self
            .metrics
            .snapshot(uptime)
            .to_log_event(&self.config.metrics_target);
        let _ = logger.log_event(event);
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let _ = logger.emit(level, "hostwatch::runtime", message, fields);
        }
    }
}
