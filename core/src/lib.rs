//! kao-core - Headless diagnostics-to-expression engine
//!
//! The host-side half of kao: watches a workspace diagnostics source,
//! maps the problem count to a named pose, and pushes pose/theme
//! messages to whatever surface is rendering the face. The core knows
//! nothing about terminals or rendering; the surface knows nothing
//! about diagnostics.
//!
//! # Architecture
//!
//! ```text
//! DiagnosticsProvider ──> DiagnosticsMonitor ──mpsc──> face surface
//!                              │
//!                         KaoConfig (theme name, dump path)
//! ```

pub mod config;
pub mod diagnostics;
pub mod messages;
pub mod monitor;
pub mod pose;

pub use config::{ConfigError, KaoConfig};
pub use diagnostics::{
    count_problems, Diagnostic, DiagnosticsProvider, DocumentDiagnostics, FileProvider,
    ProviderError, Severity,
};
pub use messages::{MonitorMessage, Theme};
pub use monitor::{DiagnosticsMonitor, SETTLE_DELAY};
pub use pose::{Pose, Shape, ShapeTriple, TALK_EYES, TALK_MOUTHS};
