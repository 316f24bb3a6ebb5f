//! Focus Module
//!
//! Focus is not tracked in the manager; the server reports it and the
//! handlers here turn each report into a border colour and a restack.

use tracing::debug;
use x11rb::protocol::xproto::{StackMode, Window};

use super::WindowManager;
use crate::error::Result;
use crate::shared::WindowChanges;
use crate::x11_conn::XConn;

impl<C: XConn> WindowManager<C> {
    pub(crate) fn handle_focus_in(&mut self, window: Window) -> Result<()> {
        if window == self.screen.root {
            return Ok(());
        }
        self.conn.set_border_pixel(window, self.config.focused_border)?;
        self.restack(window, StackMode::ABOVE)
    }

    pub(crate) fn handle_focus_out(&mut self, window: Window) -> Result<()> {
        if window == self.screen.root {
            return Ok(());
        }
        self.conn.set_border_pixel(window, self.config.unfocused_border)?;
        self.restack(window, StackMode::BELOW)
    }

    /// Click-to-focus: give input focus to whatever is under the pointer,
    /// or to the root if nothing is.
    pub(crate) fn focus_under_pointer(&mut self) -> Result<()> {
        let pointer = self.conn.query_pointer(self.screen.root)?;
        let target = match pointer.child {
            x11rb::NONE => self.screen.root,
            child => self.frames.client_of(child).unwrap_or(child),
        };
        debug!(
            "Focusing window {} under pointer at ({}, {})",
            target, pointer.root_x, pointer.root_y
        );
        self.conn.set_input_focus(target)
    }

    /// Managed clients are restacked through their frame, which is the
    /// sibling that actually overlaps other windows.
    fn restack(&self, window: Window, mode: StackMode) -> Result<()> {
        let target = self.frames.frame_of(window).unwrap_or(window);
        self.conn
            .configure_window(target, &WindowChanges::stack_mode(mode))
    }
}
