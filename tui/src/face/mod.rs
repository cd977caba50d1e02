//! The Face - kao's Expression Surface
//!
//! A stateful widget with three independently-controlled regions (two
//! eyes, one mouth). Semantic state (base pose, theme) arrives from
//! the monitor; presentation timing (emote resets, talk/think loops,
//! gaze) is owned entirely by the widget.
//!
//! # Timer discipline
//!
//! All waiting is a deadline stored in widget state and fired by
//! [`Face::update`], called once per frame with the current instant.
//! Only one reset deadline may be pending at a time: a newer emote or
//! an external pose message always supersedes it, so a stale timer can
//! never clobber a newer expression. The talk loop carries its own
//! cancellation flag, checked at the top of every update before any
//! repaint.

mod gaze;
mod glyphs;

pub use gaze::{lerp, Gaze, GazeTracker};
pub use glyphs::{pattern, REGION_HEIGHT, REGION_WIDTH};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use kao_core::{MonitorMessage, Pose, Shape, ShapeTriple, Theme, TALK_EYES, TALK_MOUTHS};

use crate::theme;

/// Rendered face width in cells
pub const FACE_WIDTH: u16 = 16;

/// Rendered face height in cells
pub const FACE_HEIGHT: u16 = 6;

/// Emote auto-reset delay range (ms)
const EMOTE_RESET_MS: std::ops::Range<u64> = 1000..1750;

/// Talk loop tick interval range (ms)
const TALK_TICK_MS: std::ops::Range<u64> = 100..300;

/// Talk loop eye-change pace range (ticks)
const TALK_PACE: std::ops::Range<u32> = 3..5;

/// Self-rescheduling talk animation state
struct TalkLoop {
    /// When the next tick is due
    next_tick: Instant,
    /// Ticks since the last eye change
    step: u32,
    /// Ticks between eye changes
    pace: u32,
    /// Raised by [`TalkHandle::stop`]
    stopped: Arc<AtomicBool>,
}

/// Handle returned by [`Face::talk`]
pub struct TalkHandle {
    stopped: Arc<AtomicBool>,
}

impl TalkHandle {
    /// Stop the talk loop. The flag is checked at the top of the next
    /// update, which tears the loop down and resets the face before
    /// any further repaint.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }
}

/// Handle returned by [`Face::think`]
pub struct ThinkHandle {
    loading: Arc<AtomicBool>,
}

impl ThinkHandle {
    /// Clear the loading state
    pub fn stop(&self) {
        self.loading.store(false, Ordering::Relaxed);
    }
}

/// The animated face widget
pub struct Face<R: Rng = StdRng> {
    /// Externally-instructed base pose (source of truth; the rendered
    /// shapes are a write-only projection of it)
    base_pose: Pose,
    /// Current region shapes
    left_eye: Shape,
    mouth: Shape,
    right_eye: Shape,
    /// Direct-shapes override of the resting display, if one was set
    resting_shapes: Option<ShapeTriple>,
    /// Pending emote auto-reset deadline
    reset_at: Option<Instant>,
    /// Active talk loop, if any
    talk: Option<TalkLoop>,
    /// Loading flag shared with [`ThinkHandle`]s
    loading: Arc<AtomicBool>,
    /// Active theme
    theme: Theme,
    /// Gaze math over the cached viewport
    tracker: GazeTracker,
    /// Latest gaze outputs
    gaze: Gaze,
    /// Injected animation pacing source
    rng: R,
}

impl Face<StdRng> {
    /// Create a face for the given viewport with an entropy-seeded rng
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        Self::with_rng(viewport, StdRng::from_entropy())
    }
}

impl<R: Rng> Face<R> {
    /// Create a face with an injected rng (tests seed this)
    pub fn with_rng(viewport: Rect, rng: R) -> Self {
        let shapes = Pose::Default.shapes();
        Self {
            base_pose: Pose::Default,
            left_eye: shapes.left_eye,
            mouth: shapes.mouth,
            right_eye: shapes.right_eye,
            resting_shapes: None,
            reset_at: None,
            talk: None,
            loading: Arc::new(AtomicBool::new(false)),
            theme: Theme::Neon,
            tracker: GazeTracker::new(viewport),
            gaze: Gaze::default(),
            rng,
        }
    }

    // ========================================================================
    // Monitor messages
    // ========================================================================

    /// Apply a message from the monitor
    pub fn apply_message(&mut self, msg: MonitorMessage) {
        match msg {
            MonitorMessage::Pose { pose } => self.set_pose(pose),
            MonitorMessage::Theme { theme } => self.theme = theme,
        }
    }

    /// Set the base pose, overwriting all three regions atomically.
    ///
    /// Any pending emote reset is cancelled first so a stale deadline
    /// cannot clobber the newer externally-driven pose.
    pub fn set_pose(&mut self, pose: Pose) {
        self.reset_at = None;
        self.resting_shapes = None;
        self.base_pose = pose;
        self.apply(pose.shapes());
    }

    /// Set exact glyphs as the resting display, bypassing the pose
    /// table. Like a pose, this cancels any pending emote reset; the
    /// triple stays in force until the next pose or direct-shapes
    /// assignment, and emotes reset back to it.
    pub fn set_shapes(&mut self, shapes: ShapeTriple) {
        self.reset_at = None;
        self.resting_shapes = Some(shapes);
        self.apply(shapes);
    }

    // ========================================================================
    // Transient expressions
    // ========================================================================

    /// Flash a transient expression, then reset to the base pose after
    /// a randomized delay in [1000, 1750) ms. A newer emote or pose
    /// message supersedes the pending reset.
    pub fn emote(&mut self, name: &str, now: Instant) {
        let pose = Pose::from_name(name);
        self.apply(pose.shapes());
        self.reset_at = Some(now + Duration::from_millis(self.rng.gen_range(EMOTE_RESET_MS)));
    }

    /// Cancel any pending reset and reapply the resting display
    /// (the direct-shapes override if one is set, the base pose
    /// otherwise)
    pub fn reset(&mut self) {
        self.reset_at = None;
        self.apply(self.resting_shapes.unwrap_or_else(|| self.base_pose.shapes()));
    }

    /// Start the talking animation loop.
    ///
    /// The face snaps to the default shapes, then on every tick (a
    /// randomized [100, 300) ms apart) the mouth is redrawn from the
    /// mouth palette; every few ticks both eyes are redrawn together
    /// from the eye palette, always matching each other.
    pub fn talk(&mut self, now: Instant) -> TalkHandle {
        self.apply(Pose::Default.shapes());
        let stopped = Arc::new(AtomicBool::new(false));
        self.talk = Some(TalkLoop {
            next_tick: now,
            step: 0,
            pace: self.rng.gen_range(TALK_PACE),
            stopped: stopped.clone(),
        });
        TalkHandle { stopped }
    }

    /// Turn on the loading state. No shapes change and no timers run;
    /// it is purely a flag the renderer shows as a pulse overlay.
    pub fn think(&mut self) -> ThinkHandle {
        self.loading.store(true, Ordering::Relaxed);
        ThinkHandle {
            loading: self.loading.clone(),
        }
    }

    // ========================================================================
    // Frame tick
    // ========================================================================

    /// Advance timers. Call once per frame with the current instant.
    pub fn update(&mut self, now: Instant) {
        if let Some(mut talk) = self.talk.take() {
            if talk.stopped.load(Ordering::Relaxed) {
                self.reset();
            } else {
                while now >= talk.next_tick {
                    talk.step += 1;
                    if talk.step == talk.pace {
                        let eye = TALK_EYES[self.rng.gen_range(0..TALK_EYES.len())];
                        self.left_eye = eye;
                        self.right_eye = eye;
                        talk.pace = self.rng.gen_range(TALK_PACE);
                        talk.step = 0;
                    }
                    self.mouth = TALK_MOUTHS[self.rng.gen_range(0..TALK_MOUTHS.len())];
                    talk.next_tick += Duration::from_millis(self.rng.gen_range(TALK_TICK_MS));
                }
                self.talk = Some(talk);
            }
        }

        if let Some(at) = self.reset_at {
            if now >= at {
                self.reset();
            }
        }
    }

    // ========================================================================
    // Pointer and viewport
    // ========================================================================

    /// Feed a pointer position (full-viewport mouse move)
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        self.gaze = self.tracker.pointer_moved(column, row);
    }

    /// Refresh the cached viewport bounds
    pub fn handle_resize(&mut self, viewport: Rect) {
        self.tracker.handle_resize(viewport);
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    /// The externally-instructed base pose
    #[must_use]
    pub fn base_pose(&self) -> Pose {
        self.base_pose
    }

    /// The shapes currently on the three regions
    #[must_use]
    pub fn shapes(&self) -> ShapeTriple {
        ShapeTriple::new(self.left_eye, self.mouth, self.right_eye)
    }

    /// The active theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Latest gaze outputs
    #[must_use]
    pub fn gaze(&self) -> Gaze {
        self.gaze
    }

    /// Whether the loading state is on
    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Whether a talk loop is active
    #[must_use]
    pub fn is_talking(&self) -> bool {
        self.talk.is_some()
    }

    /// Whether an emote reset is pending
    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_at.is_some()
    }

    fn apply(&mut self, shapes: ShapeTriple) {
        self.left_eye = shapes.left_eye;
        self.mouth = shapes.mouth;
        self.right_eye = shapes.right_eye;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the face centered in `area`.
    ///
    /// The gaze outputs drive presentation only: normalized x/y offset
    /// the pupils by up to one cell, and a steep rotation leans the
    /// mouth a cell toward the pointer.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let palette = theme::palette(self.theme);

        let x0 = i32::from(area.x) + i32::from(area.width.saturating_sub(FACE_WIDTH)) / 2;
        let y0 = i32::from(area.y) + i32::from(area.height.saturating_sub(FACE_HEIGHT)) / 2;

        let dx = (self.gaze.x * 2.0).round().clamp(-1.0, 1.0) as i32;
        let dy = (self.gaze.y * 2.0).round().clamp(-1.0, 1.0) as i32;
        let lean = if self.gaze.rotation_deg <= -17.5 {
            if self.gaze.x < 0.0 {
                -1
            } else {
                1
            }
        } else {
            0
        };

        self.draw_region(buf, area, x0 + 1 + dx, y0 + 1 + dy, self.left_eye, palette.eyes);
        self.draw_region(
            buf,
            area,
            x0 + 11 + dx,
            y0 + 1 + dy,
            self.right_eye,
            palette.eyes,
        );
        self.draw_region(buf, area, x0 + 6 + lean, y0 + 4, self.mouth, palette.mouth);

        if self.is_thinking()
            && y0 >= i32::from(area.y)
            && y0 < i32::from(area.y) + i32::from(area.height)
            && area.width >= FACE_WIDTH
        {
            buf.set_string(
                (x0 + 5) as u16,
                y0 as u16,
                "· · ·",
                Style::default().fg(palette.loading),
            );
        }
    }

    fn draw_region(
        &self,
        buf: &mut Buffer,
        area: Rect,
        x: i32,
        y: i32,
        shape: Shape,
        color: ratatui::style::Color,
    ) {
        for (row_idx, row) in pattern(shape).iter().enumerate() {
            let yy = y + row_idx as i32;
            if yy < i32::from(area.y) || yy >= i32::from(area.y) + i32::from(area.height) {
                continue;
            }
            for (col_idx, ch) in row.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let xx = x + col_idx as i32;
                if xx < i32::from(area.x) || xx >= i32::from(area.x) + i32::from(area.width) {
                    continue;
                }
                buf.set_string(
                    xx as u16,
                    yy as u16,
                    ch.to_string(),
                    Style::default().fg(color),
                );
            }
        }
    }
}
