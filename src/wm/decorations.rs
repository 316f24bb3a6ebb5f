//! Window decorations
//!
//! Every client that appears under the root is reparented into a frame:
//! a plain window as wide as the client and `title_height` taller. The
//! frame's background is the screen's light pixel, so the uncovered strip
//! above the client shows as a flat title bar without any drawing on our
//! side.

use tracing::{debug, info};
use x11rb::protocol::xproto::{EventMask, Window};

use super::WindowManager;
use crate::error::Result;
use crate::shared::{Geometry, WindowSpec};
use crate::x11_conn::XConn;

/// Frames redirect their children's map requests and report their
/// destruction, which the root no longer sees once a client is reparented.
fn frame_event_mask() -> EventMask {
    EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY
}

/// Frame geometry for a client at `client`: same origin and width, with
/// the title strip added on top. Saturates at the largest size the
/// protocol can carry.
pub fn frame_geometry(client: Geometry, title_height: u16) -> Geometry {
    let max = u32::from(u16::MAX);
    Geometry {
        width: client.width.min(max),
        height: client
            .height
            .saturating_add(u32::from(title_height))
            .min(max),
        ..client
    }
}

impl<C: XConn> WindowManager<C> {
    pub(crate) fn handle_create_notify(
        &mut self,
        window: Window,
        override_redirect: bool,
    ) -> Result<()> {
        if self.frames.contains(window) {
            // One of our own frames, or a client we already wrapped
            debug!("Ignoring CreateNotify for managed window {}", window);
            return Ok(());
        }
        if override_redirect {
            debug!("Ignoring override-redirect window {}", window);
            return Ok(());
        }

        self.frame_window(window)
    }

    pub(crate) fn handle_destroy_notify(&mut self, window: Window) -> Result<()> {
        if let Some(frame) = self.frames.remove_client(window) {
            info!("Window {} destroyed, destroying frame {}", window, frame);
            self.cancel_drag_of(frame)?;
            self.conn.destroy_window(frame)?;
        } else if let Some(client) = self.frames.remove_frame(window) {
            // Destroyed by someone else while still tracked
            info!("Frame {} of window {} destroyed", window, client);
            self.cancel_drag_of(window)?;
        }
        Ok(())
    }

    /// Frame every viewable top-level window that existed before we started
    pub(crate) fn adopt_existing(&mut self) -> Result<()> {
        let children = self.conn.query_tree(self.screen.root)?;
        for window in children {
            let Some(attrs) = self.conn.get_window_attributes(window)? else {
                continue;
            };
            if attrs.viewable && !attrs.override_redirect && !self.frames.contains(window) {
                self.frame_window(window)?;
            }
        }
        info!("Managing {} existing windows", self.frames.len());

        self.conn.flush()
    }

    /// Create a frame for `client`, reparent the client into it and map it
    fn frame_window(&mut self, client: Window) -> Result<()> {
        let geometry = self.conn.get_geometry(client)?;
        let title_height = self.config.title_height;

        let frame = self.conn.generate_id()?;
        self.conn.create_window(
            frame,
            self.screen.root,
            &WindowSpec {
                geometry: frame_geometry(geometry, title_height),
                border_width: self.config.frame_border_width,
                visual: self.screen.root_visual,
                background_pixel: self.screen.white_pixel,
                border_pixel: self.config.unfocused_border,
                event_mask: frame_event_mask(),
            },
        )?;
        let offset = i16::try_from(title_height).unwrap_or(i16::MAX);
        self.conn.reparent_window(client, frame, 0, offset)?;
        self.conn.map_window(frame)?;

        let inserted = self.frames.insert(client, frame);
        debug_assert!(inserted, "client {} was already framed", client);
        info!("Framed window {} in frame {}", client, frame);

        Ok(())
    }
}
