// Actions module - action registry and desktop automation implementations

pub mod desktop_actions;
pub mod params;
pub mod registry;

pub use desktop_actions::register_desktop_actions;
pub use registry::*;
