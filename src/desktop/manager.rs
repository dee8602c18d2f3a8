use anyhow::Result;
use image::RgbaImage;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::input::{InputController, KeyCode, Modifier, MouseButton};
use super::screen::ScreenCapture;

/// Capability interface for the physical desktop.
///
/// Actions talk to the desktop only through this trait, so tests can substitute
/// a recording fake. Implementations are driven behind [`SharedDesktop`]: one
/// cursor, one keyboard focus, so at most one invocation runs at a time.
pub trait DesktopControl: Send {
    /// Live screen dimensions; queried per validation, never cached.
    fn screen_size(&mut self) -> Result<(i32, i32)>;

    fn cursor_position(&mut self) -> Result<(i32, i32)>;

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()>;

    fn move_cursor_smooth(&mut self, x: i32, y: i32, duration_secs: f64) -> Result<()>;

    /// Press the given button at the current cursor position; `double` taps twice.
    fn click(&mut self, button: MouseButton, double: bool) -> Result<()>;

    fn type_text(&mut self, text: &str) -> Result<()>;

    /// Tap `key` with `modifiers` held around it; empty modifiers is a plain tap.
    fn tap_key(&mut self, key: KeyCode, modifiers: &[Modifier]) -> Result<()>;

    fn capture_screen(&mut self) -> Result<RgbaImage>;
}

/// The one-at-a-time serialization boundary around the shared desktop.
pub type SharedDesktop = Arc<Mutex<dyn DesktopControl>>;

/// Production desktop controller backed by enigo and xcap
pub struct DesktopManager {
    input: InputController,
}

impl DesktopManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            input: InputController::new()?,
        })
    }

    /// Wrap a manager in the shared handle used by actions
    pub fn into_shared(self) -> SharedDesktop {
        Arc::new(Mutex::new(self))
    }
}

impl DesktopControl for DesktopManager {
    fn screen_size(&mut self) -> Result<(i32, i32)> {
        let (w, h) = ScreenCapture::primary_screen_size()?;
        Ok((w as i32, h as i32))
    }

    fn cursor_position(&mut self) -> Result<(i32, i32)> {
        self.input.cursor_position()
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<()> {
        self.input.move_mouse(x, y)
    }

    fn move_cursor_smooth(&mut self, x: i32, y: i32, duration_secs: f64) -> Result<()> {
        self.input.move_mouse_smooth(x, y, duration_secs)
    }

    fn click(&mut self, button: MouseButton, double: bool) -> Result<()> {
        if double {
            self.input.double_click(button)
        } else {
            self.input.click(button)
        }
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.input.type_text(text)
    }

    fn tap_key(&mut self, key: KeyCode, modifiers: &[Modifier]) -> Result<()> {
        if modifiers.is_empty() {
            self.input.key_tap(key)
        } else {
            self.input.key_chord(modifiers, key)
        }
    }

    fn capture_screen(&mut self) -> Result<RgbaImage> {
        ScreenCapture::capture_primary_screen()
    }
}
