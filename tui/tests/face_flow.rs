//! Integration Tests for Face + Monitor
//!
//! These tests verify the full interaction flow between the face
//! surface and the diagnostics monitor, using a mutable mock provider
//! to simulate a workspace whose problems come and go.
//!
//! # Test Coverage
//!
//! 1. **Activation Flow**: monitor activates, pushes theme and pose,
//!    the face shows the mapped expression
//! 2. **Fix Everything**: clearing the last problem celebrates briefly
//!    and settles back to the resting face
//! 3. **Theme Switching**: a config change swaps the palette flag
//! 4. **Wire Tolerance**: unknown pose names on the wire fall back to
//!    the default expression instead of failing

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;

use kao_core::{
    Diagnostic, DiagnosticsProvider, DocumentDiagnostics, KaoConfig, MonitorMessage, Pose,
    Severity, Theme, SETTLE_DELAY,
};
use kao_tui::{Face, MonitorClient};

// ============================================================================
// Mutable Mock Provider
// ============================================================================

/// A provider whose snapshot can be swapped out mid-test, the way a
/// real workspace's diagnostics change between events.
#[derive(Clone)]
struct SharedProvider {
    documents: Arc<Mutex<Vec<DocumentDiagnostics>>>,
}

impl SharedProvider {
    fn new(documents: Vec<DocumentDiagnostics>) -> Self {
        Self {
            documents: Arc::new(Mutex::new(documents)),
        }
    }

    fn set(&self, documents: Vec<DocumentDiagnostics>) {
        *self.documents.lock().unwrap() = documents;
    }
}

impl DiagnosticsProvider for SharedProvider {
    fn diagnostics(&self) -> Vec<DocumentDiagnostics> {
        self.documents.lock().unwrap().clone()
    }
}

fn document(path: &str, severities: &[Severity]) -> DocumentDiagnostics {
    DocumentDiagnostics {
        path: path.into(),
        diagnostics: severities
            .iter()
            .map(|&severity| Diagnostic {
                severity,
                message: "problem".to_string(),
                line: Some(1),
            })
            .collect(),
    }
}

fn face() -> Face<StdRng> {
    Face::with_rng(Rect::new(0, 0, 80, 24), StdRng::seed_from_u64(42))
}

/// Drain the monitor channel into the face, like the app loop does
fn pump(client: &mut MonitorClient<SharedProvider>, face: &mut Face<StdRng>) {
    for msg in client.recv_all() {
        face.apply_message(msg);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_activation_maps_problems_across_documents() {
    // Five errors spread over two documents count as one workspace total.
    let provider = SharedProvider::new(vec![
        document("src/lib.rs", &[Severity::Error, Severity::Error, Severity::Error]),
        document("src/main.rs", &[Severity::Error, Severity::Error]),
    ]);
    let mut client = MonitorClient::new(provider, KaoConfig::default());
    let mut face = face();

    client.activate(Instant::now()).await;
    pump(&mut client, &mut face);

    assert_eq!(face.base_pose(), Pose::Shocked);
    assert_eq!(face.shapes(), Pose::Shocked.shapes());
    assert_eq!(face.theme(), Theme::Neon);
}

#[tokio::test]
async fn test_fixing_everything_celebrates_then_settles() {
    let provider = SharedProvider::new(vec![document("src/lib.rs", &[Severity::Warning])]);
    let mut client = MonitorClient::new(provider.clone(), KaoConfig::default());
    let mut face = face();
    let t0 = Instant::now();

    client.activate(t0).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Sad);

    // The last problem goes away.
    provider.set(Vec::new());
    client.diagnostics_changed(t0).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Happy);
    assert!(client.settle_pending());

    // Just before the deadline the celebration holds.
    client.tick(t0 + SETTLE_DELAY - Duration::from_millis(1)).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Happy);

    // At the deadline the face settles to rest.
    client.tick(t0 + SETTLE_DELAY).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Default);
    assert!(!client.settle_pending());
}

#[tokio::test]
async fn test_clean_start_never_celebrates() {
    let provider = SharedProvider::new(Vec::new());
    let mut client = MonitorClient::new(provider, KaoConfig::default());
    let mut face = face();

    client.activate(Instant::now()).await;
    pump(&mut client, &mut face);

    assert_eq!(face.base_pose(), Pose::Default);
    assert!(!client.settle_pending());
}

#[tokio::test]
async fn test_config_change_switches_palette_flag() {
    let provider = SharedProvider::new(Vec::new());
    let mut client = MonitorClient::new(provider, KaoConfig::default());
    let mut face = face();

    client.activate(Instant::now()).await;
    pump(&mut client, &mut face);
    assert_eq!(face.theme(), Theme::Neon);

    // Matching is a case-insensitive substring check on the theme name.
    client.config_changed("Kao MINT High Contrast").await;
    pump(&mut client, &mut face);
    assert_eq!(face.theme(), Theme::Mint);

    client.config_changed("Solarized Dark").await;
    pump(&mut client, &mut face);
    assert_eq!(face.theme(), Theme::Neon);
}

#[tokio::test]
async fn test_problems_reappearing_cancel_the_celebration() {
    let provider = SharedProvider::new(vec![document("src/lib.rs", &[Severity::Error])]);
    let mut client = MonitorClient::new(provider.clone(), KaoConfig::default());
    let mut face = face();
    let t0 = Instant::now();

    client.activate(t0).await;
    provider.set(Vec::new());
    client.diagnostics_changed(t0).await;

    // A new problem arrives inside the celebration window.
    provider.set(vec![document(
        "src/lib.rs",
        &[Severity::Error, Severity::Warning],
    )]);
    client.diagnostics_changed(t0 + Duration::from_millis(100)).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Disappointed);

    // The stale settle deadline must not fire.
    client.tick(t0 + SETTLE_DELAY * 2).await;
    pump(&mut client, &mut face);
    assert_eq!(face.base_pose(), Pose::Disappointed);
}

#[test]
fn test_unknown_wire_pose_falls_back_to_default() {
    // A newer host may name poses this build doesn't know.
    let msg: MonitorMessage = serde_json::from_str(r#"{"type":"pose","pose":"ecstatic"}"#).unwrap();
    assert_eq!(msg, MonitorMessage::Pose { pose: Pose::Default });

    let mut face = face();
    face.apply_message(msg);
    assert_eq!(face.shapes(), Pose::Default.shapes());
}

#[test]
fn test_wire_shapes_round_trip() {
    let pose = serde_json::to_string(&MonitorMessage::Pose { pose: Pose::Cry }).unwrap();
    assert_eq!(pose, r#"{"type":"pose","pose":"cry"}"#);

    let theme = serde_json::to_string(&MonitorMessage::Theme { theme: Theme::Mint }).unwrap();
    assert_eq!(theme, r#"{"type":"theme","theme":"mint"}"#);
}
