//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - MonitorClient for the diagnostics-to-pose mapping
//! - Face widget for rendering
//!
//! The App holds no expression logic of its own. It:
//! 1. Notices host-side changes (diagnostics dump, config file)
//! 2. Forwards them to the embedded monitor via MonitorClient
//! 3. Receives MonitorMessages and applies them to the Face
//! 4. Feeds pointer/resize events and frame ticks to the Face

use std::io;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;

use kao_core::{FileProvider, KaoConfig};

use crate::face::{Face, TalkHandle, ThinkHandle};
use crate::monitor_client::MonitorClient;
use crate::theme::DIM_GRAY;

/// Status bar height (lines)
const STATUS_HEIGHT: u16 = 1;

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,

    // === Monitor Integration ===
    /// Client for communicating with the embedded monitor
    client: MonitorClient<FileProvider>,
    /// The face widget (display only)
    face: Face,

    // === Interaction State ===
    /// Active talk loop handle, if toggled on
    talk: Option<TalkHandle>,
    /// Active think handle, if toggled on
    think: Option<ThinkHandle>,

    // === Host Polling State ===
    /// Last seen mtime of the diagnostics dump
    diagnostics_mtime: Option<SystemTime>,
    /// Last seen mtime of the config file
    config_mtime: Option<SystemTime>,

    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create a new App instance
    pub fn new(config: KaoConfig) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let area = Rect::new(0, 0, size.0, size.1.saturating_sub(STATUS_HEIGHT));

        let client = MonitorClient::from_config(config)?;
        let face = Face::new(area);

        Ok(Self {
            running: true,
            client,
            face,
            talk: None,
            think: None,
            diagnostics_mtime: None,
            config_mtime: None,
            size,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Target ~10 FPS for terminal-style animations
        let frame_duration = Duration::from_millis(100);

        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Activation pushes the initial theme and pose
        self.diagnostics_mtime = mtime(self.client.config().diagnostics_path.as_path());
        self.config_mtime = KaoConfig::config_path().as_deref().and_then(mtime);
        self.client.activate(Instant::now()).await;

        // Render initial frame immediately so the face appears at once
        self.apply_monitor_messages();
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key)
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            Event::Resize(w, h) => self.handle_resize(w, h),
                            _ => {}
                        }
                    }
                }

                // Frame tick - poll the host for out-of-band changes
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    self.poll_host_changes(frame_start).await;
                }
            }

            // Receive and apply messages from the monitor
            self.apply_monitor_messages();

            // Advance timers on both halves
            let now = Instant::now();
            self.face.update(now);
            self.client.tick(now).await;

            // A stopped talk loop tears itself down in update
            if self.talk.is_some() && !self.face.is_talking() {
                self.talk = None;
            }

            self.render(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Apply all pending monitor messages to the face
    fn apply_monitor_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.face.apply_message(msg);
        }
    }

    /// Re-stat the host files and forward any change to the monitor
    async fn poll_host_changes(&mut self, now: Instant) {
        let diag_mtime = mtime(self.client.config().diagnostics_path.as_path());
        if diag_mtime != self.diagnostics_mtime {
            self.diagnostics_mtime = diag_mtime;
            if let Err(e) = self.client.provider_mut().reload() {
                tracing::warn!("diagnostics reload failed: {e}");
            }
            self.client.diagnostics_changed(now).await;
        }

        if let Some(path) = KaoConfig::config_path() {
            let config_mtime = mtime(&path);
            if config_mtime != self.config_mtime {
                self.config_mtime = config_mtime;
                match KaoConfig::from_file(&path) {
                    Ok(config) if config.color_theme != self.client.config().color_theme => {
                        self.client.config_changed(&config.color_theme).await;
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("config reload failed: {e}"),
                }
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Toggle the talking animation
            KeyCode::Char('t') => match self.talk.take() {
                Some(handle) => handle.stop(),
                None => self.talk = Some(self.face.talk(Instant::now())),
            },

            // Toggle the loading state
            KeyCode::Char('i') => match self.think.take() {
                Some(handle) => handle.stop(),
                None => self.think = Some(self.face.think()),
            },

            // Flash a transient wink
            KeyCode::Char('w') => self.face.emote("wink", Instant::now()),

            _ => {}
        }
    }

    /// Handle mouse input - every move feeds the gaze tracker
    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        if matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            self.face.pointer_moved(mouse.column, mouse.row);
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.face
            .handle_resize(Rect::new(0, 0, width, height.saturating_sub(STATUS_HEIGHT)));
    }

    /// Render the face and the status bar
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let face = &self.face;
        let pose = self.client.pose();

        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            let face_area = Rect::new(
                area.x,
                area.y,
                area.width,
                area.height.saturating_sub(STATUS_HEIGHT),
            );
            face.render(face_area, buf);

            if area.height > 0 {
                let status = format!(
                    " kao | {} | Esc quit  t talk  i think  w wink",
                    pose.name()
                );
                buf.set_string(
                    area.x,
                    area.y + area.height - 1,
                    &status,
                    Style::default().fg(DIM_GRAY),
                );
            }
        })?;

        Ok(())
    }
}

/// The modification time of a file, if it exists
fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
