//! Move Module
//!
//! Pointer-driven window operations. A left-button press on a frame starts
//! a drag that follows the pointer until release; a right-button press
//! destroys the window under the pointer.

use tracing::{debug, info};
use x11rb::protocol::xproto::Window;

use super::WindowManager;
use crate::error::Result;
use crate::shared::WindowChanges;
use crate::x11_conn::XConn;

pub const LEFT_BUTTON: u8 = 1;
pub const RIGHT_BUTTON: u8 = 3;

/// Pointer drag in progress, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// `x`/`y` are the root coordinates of the last pointer event seen
    Dragging { window: Window, x: i16, y: i16 },
}

impl DragState {
    /// The window being dragged
    pub fn window(&self) -> Option<Window> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { window, .. } => Some(*window),
        }
    }
}

/// Origin after moving by `delta`, clamped so a window never leaves the
/// top or left edge of the root.
pub fn drag_origin(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).max(0)
}

impl<C: XConn> WindowManager<C> {
    pub(crate) fn handle_button_press(
        &mut self,
        button: u8,
        child: Window,
        root_x: i16,
        root_y: i16,
    ) -> Result<()> {
        match button {
            LEFT_BUTTON => self.begin_drag(child, root_x, root_y),
            RIGHT_BUTTON => self.destroy_clicked(child),
            _ => Ok(()),
        }
    }

    pub(crate) fn handle_motion_notify(&mut self, root_x: i16, root_y: i16) -> Result<()> {
        let DragState::Dragging { window, x, y } = self.drag else {
            return Ok(());
        };

        let dx = i32::from(root_x) - i32::from(x);
        let dy = i32::from(root_y) - i32::from(y);

        let current = self.conn.get_geometry(window)?;
        let new_x = drag_origin(current.x, dx);
        let new_y = drag_origin(current.y, dy);
        self.conn
            .configure_window(window, &WindowChanges::position(new_x, new_y))?;

        self.drag = DragState::Dragging {
            window,
            x: root_x,
            y: root_y,
        };
        Ok(())
    }

    pub(crate) fn handle_button_release(&mut self, button: u8) -> Result<()> {
        match self.drag {
            DragState::Dragging { window, .. } => {
                debug!("Button {} released, finished dragging {}", button, window);
                self.end_drag()
            }
            DragState::Idle => self.focus_under_pointer(),
        }
    }

    /// Drop the drag if it is moving `window`, which is going away
    pub(crate) fn cancel_drag_of(&mut self, window: Window) -> Result<()> {
        if self.drag.window() == Some(window) {
            debug!("Dragged window {} disappeared", window);
            self.end_drag()?;
        }
        Ok(())
    }

    fn begin_drag(&mut self, target: Window, x: i16, y: i16) -> Result<()> {
        if let Some(window) = self.drag.window() {
            debug!("Ignoring press on {} while dragging {}", target, window);
            return Ok(());
        }
        if !self.frames.is_frame(target) {
            return Ok(());
        }

        self.conn.grab_pointer(self.screen.root)?;
        self.drag = DragState::Dragging { window: target, x, y };
        debug!("Dragging frame {} from ({}, {})", target, x, y);
        Ok(())
    }

    fn end_drag(&mut self) -> Result<()> {
        self.drag = DragState::Idle;
        self.conn.ungrab_pointer()
    }

    fn destroy_clicked(&mut self, target: Window) -> Result<()> {
        if target == x11rb::NONE || target == self.screen.root {
            return Ok(());
        }
        if self.frames.remove_frame(target).is_some() {
            // The client goes down with its frame; its DestroyNotify
            // then finds nothing to tear down.
            self.cancel_drag_of(target)?;
        }
        info!("Destroying window {}", target);
        self.conn.destroy_window(target)
    }
}
