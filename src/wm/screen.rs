//! Screen Module
//!
//! The root window and the screen values handlers need. Read once at
//! startup and never changed afterwards.

use x11rb::protocol::xproto::{Screen, Visualid, Window};

/// Immutable description of the managed screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Root window
    pub root: Window,

    /// Screen width in pixels
    pub width: u16,

    /// Screen height in pixels
    pub height: u16,

    /// Default visual of the root window
    pub root_visual: Visualid,

    /// Light pixel, used for the title strip
    pub white_pixel: u32,
}

impl From<&Screen> for ScreenInfo {
    fn from(screen: &Screen) -> Self {
        Self {
            root: screen.root,
            width: screen.width_in_pixels,
            height: screen.height_in_pixels,
            root_visual: screen.root_visual,
            white_pixel: screen.white_pixel,
        }
    }
}
