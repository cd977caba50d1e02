//! Monitor Client
//!
//! Thin wrapper around the diagnostics monitor for TUI integration.
//! This client embeds the monitor directly (no network) and provides
//! a convenient interface for feeding host events and draining the
//! messages the monitor pushes back.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it holds no mapping logic. All
//! diagnostics-to-pose decisions happen in the monitor. The TUI's job:
//! 1. Notice host-side changes (diagnostics dump, config)
//! 2. Forward them to the monitor
//! 3. Receive [`MonitorMessage`]s
//! 4. Apply them to the face widget

use std::time::Instant;

use tokio::sync::mpsc;

use kao_core::{
    DiagnosticsMonitor, DiagnosticsProvider, FileProvider, KaoConfig, MonitorMessage, Pose,
    ProviderError,
};

/// Client for communicating with the embedded monitor
pub struct MonitorClient<P: DiagnosticsProvider> {
    /// The embedded monitor instance
    monitor: DiagnosticsMonitor,
    /// Receiver for messages from the monitor
    rx: mpsc::Receiver<MonitorMessage>,
    /// Source of the current diagnostics snapshot
    provider: P,
    /// Active configuration
    config: KaoConfig,
}

impl MonitorClient<FileProvider> {
    /// Create a client reading diagnostics from the configured dump file
    pub fn from_config(config: KaoConfig) -> Result<Self, ProviderError> {
        let provider = FileProvider::new(&config.diagnostics_path)?;
        Ok(Self::new(provider, config))
    }
}

impl<P: DiagnosticsProvider> MonitorClient<P> {
    /// Create a client around an arbitrary provider
    pub fn new(provider: P, config: KaoConfig) -> Self {
        // Channel for monitor -> TUI messages
        let (tx, rx) = mpsc::channel(100);
        let monitor = DiagnosticsMonitor::new(tx);

        Self {
            monitor,
            rx,
            provider,
            config,
        }
    }

    /// Activate: push the initial theme and pose for the current state
    pub async fn activate(&mut self, now: Instant) {
        self.monitor
            .handle_config_change(&self.config.color_theme)
            .await;
        self.monitor
            .handle_diagnostics_change(&self.provider, now)
            .await;
    }

    /// Notify the monitor that the diagnostics snapshot changed
    pub async fn diagnostics_changed(&mut self, now: Instant) {
        self.monitor
            .handle_diagnostics_change(&self.provider, now)
            .await;
    }

    /// Notify the monitor that the color theme changed
    pub async fn config_changed(&mut self, color_theme: &str) {
        self.config.color_theme = color_theme.to_string();
        self.monitor.handle_config_change(color_theme).await;
    }

    /// Fire any due monitor deadline (must be called regularly)
    pub async fn tick(&mut self, now: Instant) {
        self.monitor.tick(now).await;
    }

    /// Try to receive a message from the monitor (non-blocking)
    pub fn try_recv(&mut self) -> Option<MonitorMessage> {
        self.rx.try_recv().ok()
    }

    /// Receive all pending messages from the monitor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<MonitorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// The pose the monitor most recently pushed
    pub fn pose(&self) -> Pose {
        self.monitor.pose()
    }

    /// Whether a celebration settle is pending
    pub fn settle_pending(&self) -> bool {
        self.monitor.settle_pending()
    }

    /// The diagnostics provider (for host-side refreshes)
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Active configuration
    pub fn config(&self) -> &KaoConfig {
        &self.config
    }
}
