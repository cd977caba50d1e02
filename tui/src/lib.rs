//! kao TUI - Terminal Face Surface
//!
//! The presentation half of kao: an animated face in the terminal,
//! driven by pose and theme messages from the embedded diagnostics
//! monitor in `kao-core`.
//!
//! # Architecture
//!
//! ```text
//! kao-core monitor --(mpsc: MonitorMessage)--> App --> Face widget
//!        ^                                      |
//!        +--- diagnostics dump / config file <--+  (mtime polling)
//! ```
//!
//! The surface is a thin client. It owns presentation timing (emote
//! resets, talk/think loops, gaze) but no diagnostics-to-pose logic;
//! that lives entirely in the monitor.

pub mod app;
pub mod face;
pub mod monitor_client;
pub mod theme;

pub use app::App;
pub use face::{Face, Gaze, GazeTracker, TalkHandle, ThinkHandle};
pub use monitor_client::MonitorClient;
