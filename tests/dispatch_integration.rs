//! Integration tests for the action dispatch and validation layer.
//!
//! These drive the registry against a recording fake desktop, verifying that
//! invalid argument bags never reach the capability layer and that valid ones
//! translate into the expected invocations.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use image::RgbaImage;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use deskpilot::actions::{register_desktop_actions, ActionRegistry, ActionResult};
use deskpilot::desktop::{DesktopControl, KeyCode, Modifier, MouseButton, SharedDesktop};

/// Capability invocations observed by the fake desktop.
///
/// Bounds queries (`screen_size`, `cursor_position`) are reads, not
/// invocations, and are deliberately not recorded.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    MoveCursor(i32, i32),
    MoveCursorSmooth(i32, i32, f64),
    Click(MouseButton, bool),
    TypeText(String),
    TapKey(KeyCode, Vec<Modifier>),
    CaptureScreen,
}

struct FakeDesktop {
    screen: (i32, i32),
    cursor: (i32, i32),
    /// When set, every invocation fails with this reason
    fail_with: Option<String>,
    calls: Arc<StdMutex<Vec<Call>>>,
    type_instants: Arc<StdMutex<Vec<Instant>>>,
}

impl FakeDesktop {
    fn new() -> Self {
        Self {
            screen: (1920, 1080),
            cursor: (640, 480),
            fail_with: None,
            calls: Arc::new(StdMutex::new(Vec::new())),
            type_instants: Arc::new(StdMutex::new(Vec::new())),
        }
    }

    fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(reason) => Err(anyhow!("{}", reason)),
            None => Ok(()),
        }
    }

    fn record(&self, call: Call) -> Result<()> {
        self.check()?;
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl DesktopControl for FakeDesktop {
    fn screen_size(&mut self) -> Result<(i32, i32)> {
        Ok(self.screen)
    }

    fn cursor_position(&mut self) -> Result<(i32, i32)> {
        self.check()?;
        Ok(self.cursor)
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.record(Call::MoveCursor(x, y))
    }

    fn move_cursor_smooth(&mut self, x: i32, y: i32, duration_secs: f64) -> Result<()> {
        self.record(Call::MoveCursorSmooth(x, y, duration_secs))
    }

    fn click(&mut self, button: MouseButton, double: bool) -> Result<()> {
        self.record(Call::Click(button, double))
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.type_instants.lock().unwrap().push(Instant::now());
        self.record(Call::TypeText(text.to_string()))
    }

    fn tap_key(&mut self, key: KeyCode, modifiers: &[Modifier]) -> Result<()> {
        self.record(Call::TapKey(key, modifiers.to_vec()))
    }

    fn capture_screen(&mut self) -> Result<RgbaImage> {
        self.record(Call::CaptureScreen)?;
        Ok(RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255])))
    }
}

struct Harness {
    registry: ActionRegistry,
    calls: Arc<StdMutex<Vec<Call>>>,
    type_instants: Arc<StdMutex<Vec<Instant>>>,
}

impl Harness {
    fn with_desktop(fake: FakeDesktop) -> Self {
        let calls = fake.calls.clone();
        let type_instants = fake.type_instants.clone();
        let desktop: SharedDesktop = Arc::new(Mutex::new(fake));

        let mut registry = ActionRegistry::new();
        register_desktop_actions(&mut registry, desktop);

        Self {
            registry,
            calls,
            type_instants,
        }
    }

    fn new() -> Self {
        Self::with_desktop(FakeDesktop::new())
    }

    async fn dispatch(&self, name: &str, params: Value) -> ActionResult {
        self.registry.execute(name, params).await
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn assert_failure(result: &ActionResult, fragment: &str) {
    assert!(!result.success, "expected failure, got {:?}", result);
    let error = result.error.as_deref().unwrap_or_default();
    assert!(
        error.contains(fragment),
        "expected error containing '{}', got '{}'",
        fragment,
        error
    );
}

// ============================================================================
// Coordinate validation
// ============================================================================

#[tokio::test]
async fn test_negative_coordinates_rejected_before_capability() {
    for op in ["click", "right_click", "double_click", "move_mouse"] {
        let harness = Harness::new();
        let result = harness.dispatch(op, json!({"x": -5, "y": 10})).await;
        assert_failure(&result, "negative");
        assert!(
            harness.calls().is_empty(),
            "{} must not touch the desktop on invalid input",
            op
        );
    }
}

#[tokio::test]
async fn test_out_of_bounds_coordinates_rejected() {
    for op in ["click", "right_click", "double_click", "move_mouse"] {
        let harness = Harness::new();
        let result = harness.dispatch(op, json!({"x": 100, "y": 2000})).await;
        assert_failure(&result, "exceeds screen");
        assert!(harness.calls().is_empty());
    }
}

#[tokio::test]
async fn test_upper_bound_is_inclusive() {
    let harness = Harness::new();
    let result = harness.dispatch("click", json!({"x": 1920, "y": 1080})).await;

    assert!(result.success, "edge-of-screen click should pass: {:?}", result);
    assert_eq!(
        harness.calls(),
        vec![
            Call::MoveCursor(1920, 1080),
            Call::Click(MouseButton::Left, false)
        ]
    );
}

#[tokio::test]
async fn test_missing_required_parameter_short_circuits() {
    let harness = Harness::new();
    let result = harness.dispatch("click", json!({"y": 10})).await;
    assert_failure(&result, "'x'");
    assert!(harness.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_kind_parameter_short_circuits() {
    let harness = Harness::new();
    let result = harness.dispatch("click", json!({"x": "left", "y": 10})).await;
    assert_failure(&result, "must be a number");
    assert!(harness.calls().is_empty());
}

// ============================================================================
// Click variants
// ============================================================================

#[tokio::test]
async fn test_right_click_requests_secondary_button() {
    let harness = Harness::new();
    let result = harness.dispatch("right_click", json!({"x": 10, "y": 20})).await;

    assert!(result.success);
    assert_eq!(
        harness.calls(),
        vec![
            Call::MoveCursor(10, 20),
            Call::Click(MouseButton::Right, false)
        ]
    );
}

#[tokio::test]
async fn test_double_click_is_one_move_one_double_press() {
    let harness = Harness::new();
    let result = harness.dispatch("double_click", json!({"x": 10, "y": 20})).await;

    assert!(result.success);
    assert_eq!(
        harness.calls(),
        vec![
            Call::MoveCursor(10, 20),
            Call::Click(MouseButton::Left, true)
        ]
    );
}

// ============================================================================
// Mouse movement
// ============================================================================

#[tokio::test]
async fn test_move_mouse_instant_by_default() {
    let harness = Harness::new();
    let result = harness.dispatch("move_mouse", json!({"x": 300, "y": 400})).await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::MoveCursor(300, 400)]);
}

#[tokio::test]
async fn test_move_mouse_smooth_carries_duration() {
    let harness = Harness::new();
    let result = harness
        .dispatch(
            "move_mouse",
            json!({"x": 300, "y": 400, "smooth": true, "duration": 0.5}),
        )
        .await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::MoveCursorSmooth(300, 400, 0.5)]);
}

#[tokio::test]
async fn test_move_mouse_smooth_defaults_to_one_second() {
    let harness = Harness::new();
    let result = harness
        .dispatch("move_mouse", json!({"x": 1, "y": 2, "smooth": true}))
        .await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::MoveCursorSmooth(1, 2, 1.0)]);
}

#[tokio::test]
async fn test_move_mouse_smooth_rejects_non_positive_duration() {
    for duration in [0.0, -1.5] {
        let harness = Harness::new();
        let result = harness
            .dispatch(
                "move_mouse",
                json!({"x": 1, "y": 2, "smooth": true, "duration": duration}),
            )
            .await;
        assert_failure(&result, "duration must be positive");
        assert!(harness.calls().is_empty());
    }
}

#[tokio::test]
async fn test_explicit_null_optional_resolves_to_default() {
    let harness = Harness::new();
    let result = harness
        .dispatch(
            "move_mouse",
            json!({"x": 7, "y": 8, "smooth": null, "duration": null}),
        )
        .await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::MoveCursor(7, 8)]);
}

// ============================================================================
// Keyboard
// ============================================================================

#[tokio::test]
async fn test_type_text_empty_is_noop_success() {
    let harness = Harness::new();
    let result = harness.dispatch("type_text", json!({"text": ""})).await;

    assert!(result.success);
    assert!(harness.calls().is_empty());
}

#[tokio::test]
async fn test_type_text_without_delay_emits_once() {
    let harness = Harness::new();
    let result = harness.dispatch("type_text", json!({"text": "AB"})).await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::TypeText("AB".to_string())]);
}

#[tokio::test]
async fn test_type_text_zero_delay_behaves_like_no_delay() {
    let harness = Harness::new();
    let result = harness
        .dispatch("type_text", json!({"text": "AB", "delay": 0}))
        .await;

    assert!(result.success);
    assert_eq!(harness.calls(), vec![Call::TypeText("AB".to_string())]);
}

#[tokio::test]
async fn test_type_text_with_delay_emits_per_character() {
    let harness = Harness::new();
    let result = harness
        .dispatch("type_text", json!({"text": "AB", "delay": 10}))
        .await;

    assert!(result.success);
    assert_eq!(
        harness.calls(),
        vec![
            Call::TypeText("A".to_string()),
            Call::TypeText("B".to_string())
        ]
    );

    let instants = harness.type_instants.lock().unwrap();
    assert!(
        instants[1].duration_since(instants[0]) >= Duration::from_millis(10),
        "delay between characters not honored"
    );
}

#[tokio::test]
async fn test_type_text_negative_delay_rejected() {
    let harness = Harness::new();
    let result = harness
        .dispatch("type_text", json!({"text": "AB", "delay": -1}))
        .await;
    assert_failure(&result, "delay cannot be negative");
    assert!(harness.calls().is_empty());
}

#[tokio::test]
async fn test_press_key_plain_tap() {
    let harness = Harness::new();
    let result = harness.dispatch("press_key", json!({"key": "c"})).await;

    assert!(result.success);
    assert_eq!(
        harness.calls(),
        vec![Call::TapKey(KeyCode::Char('c'), vec![])]
    );
}

#[tokio::test]
async fn test_press_key_chorded_with_modifiers() {
    let harness = Harness::new();
    let result = harness
        .dispatch("press_key", json!({"key": "c", "modifiers": ["ctrl"]}))
        .await;

    assert!(result.success);
    assert_eq!(
        harness.calls(),
        vec![Call::TapKey(KeyCode::Char('c'), vec![Modifier::Control])]
    );
}

#[tokio::test]
async fn test_press_key_unknown_names_rejected() {
    let harness = Harness::new();

    let result = harness.dispatch("press_key", json!({"key": "warp"})).await;
    assert_failure(&result, "unknown key");

    let result = harness
        .dispatch("press_key", json!({"key": "c", "modifiers": ["hyper"]}))
        .await;
    assert_failure(&result, "unknown modifier");

    assert!(harness.calls().is_empty());
}

// ============================================================================
// Position and screenshot
// ============================================================================

#[tokio::test]
async fn test_get_mouse_position_succeeds_and_is_idempotent() {
    let harness = Harness::new();

    let first = harness.dispatch("get_mouse_position", json!({})).await;
    let second = harness.dispatch("get_mouse_position", json!({})).await;

    assert!(first.success);
    let data = first.data.as_ref().unwrap();
    assert_eq!(data["x"].as_i64(), Some(640));
    assert_eq!(data["y"].as_i64(), Some(480));
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn test_screenshot_returns_base64_png() {
    let harness = Harness::new();
    let result = harness.dispatch("screenshot", json!({})).await;

    assert!(result.success);
    let data = result.data.as_ref().unwrap();
    assert!(data["screenshot"].as_str().is_some());
    assert_eq!(data["width"].as_u64(), Some(4));
    assert_eq!(harness.calls(), vec![Call::CaptureScreen]);
}

// ============================================================================
// Dispatch boundary
// ============================================================================

#[tokio::test]
async fn test_unknown_action_returns_failure() {
    let harness = Harness::new();

    let result = harness.dispatch("warp_mouse", json!({"x": 1})).await;
    assert_failure(&result, "Unknown action: warp_mouse");

    let result = harness.dispatch("warp_mouse", json!({})).await;
    assert_failure(&result, "Unknown action");
}

#[tokio::test]
async fn test_capability_failure_wrapped_with_operation_context() {
    let harness = Harness::with_desktop(FakeDesktop::failing("device busy"));

    let result = harness.dispatch("click", json!({"x": 10, "y": 10})).await;
    assert_failure(&result, "click failed");
    assert_failure(&result, "device busy");

    let result = harness.dispatch("type_text", json!({"text": "hi"})).await;
    assert_failure(&result, "type_text failed");
}
