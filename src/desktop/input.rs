//! Cross-platform mouse and keyboard input using enigo
//!
//! Provides a simple API for simulating user input across Windows, macOS, and Linux.

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::thread;
use std::time::Duration;

/// Input controller for mouse and keyboard simulation
pub struct InputController {
    enigo: Enigo,
}

impl InputController {
    /// Create a new input controller
    pub fn new() -> anyhow::Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow::anyhow!("Failed to create input controller: {:?}", e))?;
        Ok(Self { enigo })
    }

    // ============ Mouse Operations ============

    /// Move mouse to absolute screen coordinates
    pub fn move_mouse(&mut self, x: i32, y: i32) -> anyhow::Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| anyhow::anyhow!("Failed to move mouse: {:?}", e))
    }

    /// Move mouse to absolute coordinates over `duration_secs` with easing.
    ///
    /// Interpolates from the current position in small steps, sleeping between
    /// them so the whole sweep takes roughly the requested duration.
    pub fn move_mouse_smooth(&mut self, x: i32, y: i32, duration_secs: f64) -> anyhow::Result<()> {
        let (start_x, start_y) = self.cursor_position()?;

        let steps = ((duration_secs * 100.0).ceil() as usize).clamp(2, 300);
        let pause = Duration::from_secs_f64(duration_secs / steps as f64);

        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            // Ease in-out quad
            let eased = if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            };
            let px = start_x + ((x - start_x) as f64 * eased).round() as i32;
            let py = start_y + ((y - start_y) as f64 * eased).round() as i32;
            self.move_mouse(px, py)?;
            thread::sleep(pause);
        }

        Ok(())
    }

    /// Current mouse position in screen coordinates
    pub fn cursor_position(&self) -> anyhow::Result<(i32, i32)> {
        self.enigo
            .location()
            .map_err(|e| anyhow::anyhow!("Failed to get mouse position: {:?}", e))
    }

    /// Click at the current mouse position
    pub fn click(&mut self, button: MouseButton) -> anyhow::Result<()> {
        self.enigo
            .button(button.to_enigo(), Direction::Click)
            .map_err(|e| anyhow::anyhow!("Failed to click: {:?}", e))
    }

    /// Double-click at the current mouse position
    pub fn double_click(&mut self, button: MouseButton) -> anyhow::Result<()> {
        self.click(button)?;
        thread::sleep(Duration::from_millis(50)); // Small delay for reliability
        self.click(button)
    }

    // ============ Keyboard Operations ============

    /// Type text string
    pub fn type_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.enigo
            .text(text)
            .map_err(|e| anyhow::anyhow!("Failed to type text: {:?}", e))
    }

    /// Press and release a single key
    pub fn key_tap(&mut self, key: KeyCode) -> anyhow::Result<()> {
        self.enigo
            .key(key.to_enigo(), Direction::Click)
            .map_err(|e| anyhow::anyhow!("Failed to press key: {:?}", e))
    }

    fn key_down(&mut self, key: Key) -> anyhow::Result<()> {
        self.enigo
            .key(key, Direction::Press)
            .map_err(|e| anyhow::anyhow!("Failed to press key down: {:?}", e))
    }

    fn key_up(&mut self, key: Key) -> anyhow::Result<()> {
        self.enigo
            .key(key, Direction::Release)
            .map_err(|e| anyhow::anyhow!("Failed to release key: {:?}", e))
    }

    /// Tap a key while holding the given modifiers (e.g., Ctrl+C, Alt+Tab)
    pub fn key_chord(&mut self, modifiers: &[Modifier], key: KeyCode) -> anyhow::Result<()> {
        for modifier in modifiers {
            self.key_down(modifier.to_enigo())?;
        }

        thread::sleep(Duration::from_millis(20));
        self.key_tap(key)?;
        thread::sleep(Duration::from_millis(20));

        // Release in reverse order
        for modifier in modifiers.iter().rev() {
            self.key_up(modifier.to_enigo())?;
        }

        Ok(())
    }
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn to_enigo(self) -> Button {
        match self {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Control,
    Alt,
    Shift,
    Meta, // Windows key / Command key
}

impl Modifier {
    fn to_enigo(self) -> Key {
        match self {
            Modifier::Control => Key::Control,
            Modifier::Alt => Key::Alt,
            Modifier::Shift => Key::Shift,
            Modifier::Meta => Key::Meta,
        }
    }

    /// Parse a modifier from a request string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifier::Control),
            "alt" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            "meta" | "win" | "cmd" | "command" => Some(Modifier::Meta),
            _ => None,
        }
    }
}

/// Keys addressable by name in requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Printable character key (letters, digits, punctuation)
    Char(char),
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Control, Alt, Shift, Meta,
    Up, Down, Left, Right,
    Home, End, PageUp, PageDown,
    Backspace, Delete, Enter, Tab, Escape, Space,
}

impl KeyCode {
    fn to_enigo(self) -> Key {
        match self {
            KeyCode::Char(c) => Key::Unicode(c),
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            KeyCode::Control => Key::Control,
            KeyCode::Alt => Key::Alt,
            KeyCode::Shift => Key::Shift,
            KeyCode::Meta => Key::Meta,
            KeyCode::Up => Key::UpArrow,
            KeyCode::Down => Key::DownArrow,
            KeyCode::Left => Key::LeftArrow,
            KeyCode::Right => Key::RightArrow,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Enter => Key::Return,
            KeyCode::Tab => Key::Tab,
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
        }
    }

    /// Parse a key from a request string (e.g., "enter", "f5", "a")
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "f1" => KeyCode::F1,
            "f2" => KeyCode::F2,
            "f3" => KeyCode::F3,
            "f4" => KeyCode::F4,
            "f5" => KeyCode::F5,
            "f6" => KeyCode::F6,
            "f7" => KeyCode::F7,
            "f8" => KeyCode::F8,
            "f9" => KeyCode::F9,
            "f10" => KeyCode::F10,
            "f11" => KeyCode::F11,
            "f12" => KeyCode::F12,
            "ctrl" | "control" => KeyCode::Control,
            "alt" => KeyCode::Alt,
            "shift" => KeyCode::Shift,
            "meta" | "win" | "cmd" | "command" => KeyCode::Meta,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "backspace" | "bs" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "escape" | "esc" => KeyCode::Escape,
            "space" => KeyCode::Space,
            _ => {
                // Single printable character keys: "a", "7", "/"
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_parsing() {
        assert_eq!(KeyCode::from_str("a"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_str("A"), Some(KeyCode::Char('a')));
        assert_eq!(KeyCode::from_str("7"), Some(KeyCode::Char('7')));
        assert_eq!(KeyCode::from_str("CTRL"), Some(KeyCode::Control));
        assert_eq!(KeyCode::from_str("enter"), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_str("f11"), Some(KeyCode::F11));
        assert_eq!(KeyCode::from_str("unknown"), None);
        assert_eq!(KeyCode::from_str(""), None);
    }

    #[test]
    fn test_modifier_parsing() {
        assert_eq!(Modifier::from_str("ctrl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_str("ALT"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_str("cmd"), Some(Modifier::Meta));
        assert_eq!(Modifier::from_str("hyper"), None);
    }
}
