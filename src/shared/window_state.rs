//! Plain window values exchanged between the handlers and the X connection

use x11rb::protocol::xproto::{EventMask, StackMode, Window};

/// Window geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// A ConfigureWindow request; only the fields that are `Some` are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowChanges {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub border_width: Option<u32>,
    pub stack_mode: Option<StackMode>,
}

impl WindowChanges {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn geometry(geometry: Geometry, border_width: u32) -> Self {
        Self {
            x: Some(geometry.x),
            y: Some(geometry.y),
            width: Some(geometry.width),
            height: Some(geometry.height),
            border_width: Some(border_width),
            stack_mode: None,
        }
    }

    pub fn stack_mode(stack_mode: StackMode) -> Self {
        Self {
            stack_mode: Some(stack_mode),
            ..Self::default()
        }
    }
}

/// Parameters for a frame window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub geometry: Geometry,
    pub border_width: u16,
    pub visual: u32,
    pub background_pixel: u32,
    pub border_pixel: u32,
    pub event_mask: EventMask,
}

/// Pointer position as reported by QueryPointer on the root window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerInfo {
    /// Top-level window under the pointer, `x11rb::NONE` if there is none
    pub child: Window,
    pub root_x: i16,
    pub root_y: i16,
}

/// The parts of GetWindowAttributes the manager cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAttributes {
    pub viewable: bool,
    pub override_redirect: bool,
}
