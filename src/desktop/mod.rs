//! Desktop automation module
//!
//! Wraps the physical mouse, keyboard, and screen behind the [`DesktopControl`]
//! capability trait:
//! - `InputController` - mouse/keyboard simulation via enigo
//! - `ScreenCapture` - screenshots and screen dimensions via xcap
//! - `DesktopManager` - production `DesktopControl` implementation
//!
//! The desktop is a single shared resource (one cursor, one keyboard focus),
//! so callers hold it as [`SharedDesktop`] and lock around every invocation.

pub mod input;
pub mod manager;
pub mod screen;

pub use input::{InputController, KeyCode, Modifier, MouseButton};
pub use manager::{DesktopControl, DesktopManager, SharedDesktop};
pub use screen::ScreenCapture;
