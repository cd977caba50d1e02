//! Diagnostics Monitor
//!
//! The host-side half of kao: translates the workspace's aggregate
//! diagnostics state into a pose instruction stream for the surface.
//! The monitor owns no rendering and no presentation timing beyond the
//! single happy-to-default settle; everything else is the surface's
//! business.
//!
//! All waiting is expressed as a deadline held in monitor state and
//! fired by [`DiagnosticsMonitor::tick`], which the host loop calls
//! every frame. That keeps the monitor synchronous to drive in tests
//! (explicit instants, no mocked clock) and guarantees a newer pose
//! assignment always supersedes a stale settle.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::diagnostics::{count_problems, DiagnosticsProvider};
use crate::messages::{MonitorMessage, Theme};
use crate::pose::Pose;

/// Delay before a zero-problem celebration settles back to default
pub const SETTLE_DELAY: Duration = Duration::from_millis(600);

/// Maps diagnostic counts to poses and pushes them to the surface
pub struct DiagnosticsMonitor {
    /// Channel to the surface
    tx: mpsc::Sender<MonitorMessage>,
    /// Currently instructed pose (decides the zero-count branch)
    pose: Pose,
    /// Pending happy-to-default settle deadline
    settle_at: Option<Instant>,
}

impl DiagnosticsMonitor {
    /// Create a monitor pushing to the given surface channel
    #[must_use]
    pub fn new(tx: mpsc::Sender<MonitorMessage>) -> Self {
        Self {
            tx,
            pose: Pose::Default,
            settle_at: None,
        }
    }

    /// The pose most recently pushed to the surface
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Re-derive the problem count and push the mapped pose.
    ///
    /// Called once at activation and again on every diagnostics-change
    /// event. The count is never cached across events.
    pub async fn handle_diagnostics_change(
        &mut self,
        provider: &dyn DiagnosticsProvider,
        now: Instant,
    ) {
        let problems = count_problems(&provider.diagnostics());
        tracing::debug!(problems, "diagnostics changed");

        // A fresh assignment owns the pose; drop any stale settle.
        self.settle_at = None;

        if problems == 0 {
            if matches!(self.pose, Pose::Happy | Pose::Default) {
                self.set_pose(Pose::Default).await;
            } else {
                // Brief celebration before settling, so clearing the
                // last problem never snaps the face straight to rest.
                self.set_pose(Pose::Happy).await;
                self.settle_at = Some(now + SETTLE_DELAY);
            }
        } else if problems == 1 {
            self.set_pose(Pose::Sad).await;
        } else if problems <= 3 {
            self.set_pose(Pose::Disappointed).await;
        } else if problems <= 6 {
            self.set_pose(Pose::Shocked).await;
        } else {
            self.set_pose(Pose::Cry).await;
        }
    }

    /// Recompute the theme flag from the color-theme name and push it.
    ///
    /// Called at activation and whenever the configuration changes.
    pub async fn handle_config_change(&mut self, color_theme: &str) {
        let theme = Theme::from_theme_name(color_theme);
        tracing::debug!(?theme, color_theme, "theme changed");
        self.send(MonitorMessage::Theme { theme }).await;
    }

    /// Fire any due settle deadline
    pub async fn tick(&mut self, now: Instant) {
        if let Some(at) = self.settle_at {
            if now >= at {
                self.settle_at = None;
                self.set_pose(Pose::Default).await;
            }
        }
    }

    /// Whether a settle is pending (for the host loop's pacing)
    #[must_use]
    pub fn settle_pending(&self) -> bool {
        self.settle_at.is_some()
    }

    async fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.send(MonitorMessage::Pose { pose }).await;
    }

    async fn send(&self, msg: MonitorMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("surface channel closed: {e}");
        }
    }
}
