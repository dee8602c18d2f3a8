//! Desktop automation actions
//!
//! One action per operation: argument extraction, bounds validation, a single
//! automation invocation, and a result echoing what was done. The shared
//! desktop lock is held for the whole invocation so concurrent requests never
//! interleave on the physical cursor or keyboard.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::params::{
    optional_bool, optional_number, optional_number_opt, optional_string, optional_string_list,
    require_number, require_string, validate_coordinate, validate_delay, validate_duration,
};
use super::registry::{Action, ActionDefinition, ActionRegistry, ActionResult};
use crate::desktop::{DesktopControl, KeyCode, Modifier, MouseButton, ScreenCapture, SharedDesktop};
use crate::error::ValidationError;

/// Extract `x`/`y` and validate them against the live screen bounds.
///
/// Bounds come from the capability at call time, not from a cache, so a
/// resolution change between requests is picked up on the next validation.
fn bounded_point(params: &Value, desktop: &mut dyn DesktopControl) -> Result<(i32, i32)> {
    let x = require_number(params, "x")?;
    let y = require_number(params, "y")?;

    let (width, height) = desktop.screen_size()?;
    let x = validate_coordinate(x, "x", width)?;
    let y = validate_coordinate(y, "y", height)?;
    Ok((x, y))
}

fn coordinate_schema(verb: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "x": {
                "type": "number",
                "description": format!("X coordinate for {}", verb)
            },
            "y": {
                "type": "number",
                "description": format!("Y coordinate for {}", verb)
            }
        },
        "required": ["x", "y"]
    })
}

// ============================================================================
// Mouse Actions
// ============================================================================

/// Left-click at validated coordinates
pub struct ClickAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for ClickAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "click".to_string(),
            description: "Click at specified coordinates".to_string(),
            parameters: coordinate_schema("click"),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let mut desktop = self.desktop.lock().await;
        let (x, y) = bounded_point(&params, &mut *desktop)?;

        let pressed = desktop
            .move_cursor(x, y)
            .and_then(|()| desktop.click(MouseButton::Left, false));

        match pressed {
            Ok(()) => Ok(ActionResult::success(format!("Clicked at ({}, {})", x, y))),
            Err(e) => Ok(ActionResult::error(format!("click failed: {}", e))),
        }
    }
}

/// Right-click at validated coordinates
pub struct RightClickAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for RightClickAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "right_click".to_string(),
            description: "Right click at specified coordinates".to_string(),
            parameters: coordinate_schema("right click"),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let mut desktop = self.desktop.lock().await;
        let (x, y) = bounded_point(&params, &mut *desktop)?;

        let pressed = desktop
            .move_cursor(x, y)
            .and_then(|()| desktop.click(MouseButton::Right, false));

        match pressed {
            Ok(()) => Ok(ActionResult::success(format!(
                "Right clicked at ({}, {})",
                x, y
            ))),
            Err(e) => Ok(ActionResult::error(format!("right_click failed: {}", e))),
        }
    }
}

/// Double-click at validated coordinates
pub struct DoubleClickAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for DoubleClickAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "double_click".to_string(),
            description: "Double click at specified coordinates".to_string(),
            parameters: coordinate_schema("double click"),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let mut desktop = self.desktop.lock().await;
        let (x, y) = bounded_point(&params, &mut *desktop)?;

        let pressed = desktop
            .move_cursor(x, y)
            .and_then(|()| desktop.click(MouseButton::Left, true));

        match pressed {
            Ok(()) => Ok(ActionResult::success(format!(
                "Double clicked at ({}, {})",
                x, y
            ))),
            Err(e) => Ok(ActionResult::error(format!("double_click failed: {}", e))),
        }
    }
}

/// Move the cursor, instantly or eased over a duration
pub struct MoveMouseAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for MoveMouseAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "move_mouse".to_string(),
            description: "Move mouse to specified coordinates".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "x": {
                        "type": "number",
                        "description": "X coordinate to move to"
                    },
                    "y": {
                        "type": "number",
                        "description": "Y coordinate to move to"
                    },
                    "smooth": {
                        "type": "boolean",
                        "description": "Use smooth movement (default: false)",
                        "default": false
                    },
                    "duration": {
                        "type": "number",
                        "description": "Duration for smooth movement in seconds (default: 1.0)",
                        "default": 1.0
                    }
                },
                "required": ["x", "y"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let smooth = optional_bool(&params, "smooth", false)?;
        let duration = optional_number(&params, "duration", 1.0)?;

        let mut desktop = self.desktop.lock().await;
        let (x, y) = bounded_point(&params, &mut *desktop)?;

        let moved = if smooth {
            let duration = validate_duration(duration)?;
            desktop.move_cursor_smooth(x, y, duration)
        } else {
            desktop.move_cursor(x, y)
        };

        match moved {
            Ok(()) => Ok(ActionResult::success(format!(
                "Moved mouse to ({}, {})",
                x, y
            ))),
            Err(e) => Ok(ActionResult::error(format!("move_mouse failed: {}", e))),
        }
    }
}

/// Report the current cursor position
pub struct MousePositionAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for MousePositionAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "get_mouse_position".to_string(),
            description: "Get current mouse cursor position".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _params: Value) -> Result<ActionResult> {
        let mut desktop = self.desktop.lock().await;

        match desktop.cursor_position() {
            Ok((x, y)) => Ok(ActionResult::success_with_data(
                format!("Mouse position: ({}, {})", x, y),
                json!({ "x": x, "y": y }),
            )),
            Err(e) => Ok(ActionResult::error(format!(
                "get_mouse_position failed: {}",
                e
            ))),
        }
    }
}

// ============================================================================
// Keyboard Actions
// ============================================================================

/// Type text at the current focus, optionally character by character
pub struct TypeTextAction {
    pub desktop: SharedDesktop,
}

async fn type_per_char(
    desktop: &mut dyn DesktopControl,
    text: &str,
    delay_ms: u64,
) -> Result<()> {
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        desktop.type_text(ch.encode_utf8(&mut buf))?;
    }
    Ok(())
}

#[async_trait]
impl Action for TypeTextAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "type_text".to_string(),
            description: "Type text at current cursor position".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to type"
                    },
                    "delay": {
                        "type": "number",
                        "description": "Delay between characters in milliseconds (optional)"
                    }
                },
                "required": ["text"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let text = require_string(&params, "text")?.to_string();
        let delay_ms = match optional_number_opt(&params, "delay")? {
            Some(value) => Some(validate_delay(value)?),
            None => None,
        };

        // Empty text is a no-op success; the desktop is never touched.
        if text.is_empty() {
            return Ok(ActionResult::success("Typed: ''"));
        }

        let mut desktop = self.desktop.lock().await;

        // Zero delay behaves like no delay: one emission of the whole string.
        let typed = match delay_ms {
            Some(ms) if ms > 0 => type_per_char(&mut *desktop, &text, ms).await,
            _ => desktop.type_text(&text),
        };

        match typed {
            Ok(()) => Ok(ActionResult::success(format!("Typed: '{}'", text))),
            Err(e) => Ok(ActionResult::error(format!("type_text failed: {}", e))),
        }
    }
}

/// Press a key, optionally chorded with modifiers
pub struct PressKeyAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for PressKeyAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "press_key".to_string(),
            description: "Press a key or key combination".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "key": {
                        "type": "string",
                        "description": "Key to press (e.g., 'enter', 'space', 'c')"
                    },
                    "modifiers": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Modifier keys (e.g., ['ctrl', 'shift'])"
                    }
                },
                "required": ["key"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let key_name = require_string(&params, "key")?;
        let key = KeyCode::from_str(key_name)
            .ok_or_else(|| ValidationError::UnknownKey(key_name.to_string()))?;

        let modifier_names = optional_string_list(&params, "modifiers")?;
        let mut modifiers = Vec::with_capacity(modifier_names.len());
        for name in &modifier_names {
            let modifier = Modifier::from_str(name)
                .ok_or_else(|| ValidationError::UnknownModifier(name.clone()))?;
            modifiers.push(modifier);
        }

        let mut desktop = self.desktop.lock().await;

        match desktop.tap_key(key, &modifiers) {
            Ok(()) if modifiers.is_empty() => {
                Ok(ActionResult::success(format!("Pressed key: {}", key_name)))
            }
            Ok(()) => Ok(ActionResult::success(format!(
                "Pressed key combination: {} + {}",
                modifier_names.join("+"),
                key_name
            ))),
            Err(e) => Ok(ActionResult::error(format!("press_key failed: {}", e))),
        }
    }
}

// ============================================================================
// Screen Actions
// ============================================================================

/// Capture the primary screen as PNG
pub struct ScreenshotAction {
    pub desktop: SharedDesktop,
}

#[async_trait]
impl Action for ScreenshotAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition {
            name: "screenshot".to_string(),
            description: "Capture the primary screen. Returns base64 PNG, or saves \
                          to 'path' when given."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "File path to save the PNG to (optional)"
                    }
                },
                "required": []
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ActionResult> {
        let path = optional_string(&params, "path")?.map(str::to_string);

        let mut desktop = self.desktop.lock().await;
        let image = match desktop.capture_screen() {
            Ok(image) => image,
            Err(e) => return Ok(ActionResult::error(format!("screenshot failed: {}", e))),
        };
        drop(desktop);

        match path {
            Some(path) => match ScreenCapture::save_png(&image, Path::new(&path)) {
                Ok(()) => Ok(ActionResult::success(format!(
                    "Screenshot saved to {}",
                    path
                ))),
                Err(e) => Ok(ActionResult::error(format!("screenshot failed: {}", e))),
            },
            None => match ScreenCapture::image_to_base64(&image) {
                Ok(base64) => Ok(ActionResult::success_with_data(
                    "Screenshot captured",
                    json!({
                        "screenshot": base64,
                        "width": image.width(),
                        "height": image.height()
                    }),
                )),
                Err(e) => Ok(ActionResult::error(format!("screenshot failed: {}", e))),
            },
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Register all desktop actions with the given registry.
///
/// The desktop handle is shared between all actions; the mutex inside it is
/// the serialization boundary for the physical desktop.
pub fn register_desktop_actions(registry: &mut ActionRegistry, desktop: SharedDesktop) {
    registry.register(Arc::new(ClickAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(RightClickAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(DoubleClickAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(MoveMouseAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(MousePositionAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(TypeTextAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(PressKeyAction {
        desktop: desktop.clone(),
    }));
    registry.register(Arc::new(ScreenshotAction { desktop }));
}
