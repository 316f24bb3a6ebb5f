//! Placement Module
//!
//! Map requests are granted at the geometry the client asked for, with a
//! fixed border, and the newly visible window takes input focus.

use tracing::debug;
use x11rb::protocol::xproto::{EventMask, Window};

use super::WindowManager;
use crate::error::Result;
use crate::shared::WindowChanges;
use crate::x11_conn::XConn;

/// Events selected on a client once it is mapped
fn client_event_mask() -> EventMask {
    EventMask::ENTER_WINDOW | EventMask::FOCUS_CHANGE
}

impl<C: XConn> WindowManager<C> {
    pub(crate) fn handle_map_request(&mut self, window: Window) -> Result<()> {
        let geometry = self.conn.get_geometry(window)?;

        self.conn.map_window(window)?;
        self.conn.configure_window(
            window,
            &WindowChanges::geometry(geometry, self.config.client_border_width),
        )?;
        self.conn.select_input(window, client_event_mask())?;
        self.conn.set_input_focus(window)?;

        debug!(
            "Mapped window {} at {}x{}+{}+{}",
            window, geometry.width, geometry.height, geometry.x, geometry.y
        );
        Ok(())
    }
}
