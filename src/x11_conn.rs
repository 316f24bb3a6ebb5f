//! X11 connection seam
//!
//! The window manager core talks to the X server only through [`XConn`].
//! [`X11Connection`] implements it on top of an x11rb `RustConnection`;
//! tests implement it with an in-memory recorder.

use tracing::info;
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::COPY_FROM_PARENT;

use crate::error::{Result, WmError};
use crate::shared::{Geometry, PointerInfo, WindowAttributes, WindowChanges, WindowSpec};
use crate::wm::screen::ScreenInfo;

/// Protocol primitives used by the window manager.
///
/// Requests are buffered until [`XConn::flush`]; queries block for their
/// reply. Every call may fail, and a failed query is fatal to the caller.
pub trait XConn {
    /// Block until the next event arrives. `None` means the connection
    /// handed back an empty event.
    fn wait_for_event(&self) -> Result<Option<Vec<u8>>>;

    fn flush(&self) -> Result<()>;

    fn generate_id(&self) -> Result<Window>;

    /// Select `mask` on the root window and wait for the server to accept
    /// it. Fails with [`WmError::AlreadyRunning`] when another client holds
    /// substructure redirection.
    fn select_root_events(&self, root: Window, mask: EventMask) -> Result<()>;

    fn select_input(&self, window: Window, mask: EventMask) -> Result<()>;

    fn grab_button(&self, root: Window, button: ButtonIndex, modifiers: ModMask) -> Result<()>;

    /// Actively grab the pointer for motion and release events.
    fn grab_pointer(&self, root: Window) -> Result<()>;

    fn ungrab_pointer(&self) -> Result<()>;

    fn query_pointer(&self, root: Window) -> Result<PointerInfo>;

    fn get_geometry(&self, window: Window) -> Result<Geometry>;

    fn query_tree(&self, window: Window) -> Result<Vec<Window>>;

    /// `None` if the window no longer exists.
    fn get_window_attributes(&self, window: Window) -> Result<Option<WindowAttributes>>;

    fn create_window(&self, window: Window, parent: Window, spec: &WindowSpec) -> Result<()>;

    fn reparent_window(&self, window: Window, parent: Window, x: i16, y: i16) -> Result<()>;

    fn map_window(&self, window: Window) -> Result<()>;

    fn destroy_window(&self, window: Window) -> Result<()>;

    fn configure_window(&self, window: Window, changes: &WindowChanges) -> Result<()>;

    fn set_border_pixel(&self, window: Window, pixel: u32) -> Result<()>;

    fn set_input_focus(&self, window: Window) -> Result<()>;
}

/// Live connection to an X server
pub struct X11Connection {
    conn: RustConnection,
    screen_num: usize,
}

impl X11Connection {
    /// Connect to the display named by `$DISPLAY`
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;
        info!("Connected to X server, screen {}", screen_num);
        Ok(Self { conn, screen_num })
    }

    /// The screen the connection was opened on
    pub fn screen(&self) -> ScreenInfo {
        ScreenInfo::from(&self.conn.setup().roots[self.screen_num])
    }
}

impl XConn for X11Connection {
    fn wait_for_event(&self) -> Result<Option<Vec<u8>>> {
        let raw = self.conn.wait_for_raw_event()?;
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }

    fn generate_id(&self) -> Result<Window> {
        Ok(self.conn.generate_id()?)
    }

    fn select_root_events(&self, root: Window, mask: EventMask) -> Result<()> {
        let result = self
            .conn
            .change_window_attributes(root, &ChangeWindowAttributesAux::new().event_mask(mask))?
            .check();
        match result {
            Ok(()) => Ok(()),
            Err(ReplyError::ConnectionError(e)) => Err(e.into()),
            Err(e) => Err(WmError::AlreadyRunning(e)),
        }
    }

    fn select_input(&self, window: Window, mask: EventMask) -> Result<()> {
        self.conn
            .change_window_attributes(window, &ChangeWindowAttributesAux::new().event_mask(mask))?;
        Ok(())
    }

    fn grab_button(&self, root: Window, button: ButtonIndex, modifiers: ModMask) -> Result<()> {
        self.conn.grab_button(
            false,
            root,
            EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE,
            GrabMode::ASYNC,
            GrabMode::ASYNC,
            x11rb::NONE,
            x11rb::NONE,
            button,
            modifiers,
        )?;
        Ok(())
    }

    fn grab_pointer(&self, root: Window) -> Result<()> {
        self.conn.grab_pointer(
            false,
            root,
            EventMask::BUTTON_RELEASE | EventMask::POINTER_MOTION,
            GrabMode::ASYNC,
            GrabMode::ASYNC,
            x11rb::NONE,
            x11rb::NONE,
            x11rb::CURRENT_TIME,
        )?;
        Ok(())
    }

    fn ungrab_pointer(&self) -> Result<()> {
        self.conn.ungrab_pointer(x11rb::CURRENT_TIME)?;
        Ok(())
    }

    fn query_pointer(&self, root: Window) -> Result<PointerInfo> {
        let reply = self
            .conn
            .query_pointer(root)?
            .reply()
            .map_err(WmError::PointerQuery)?;
        Ok(PointerInfo {
            child: reply.child,
            root_x: reply.root_x,
            root_y: reply.root_y,
        })
    }

    fn get_geometry(&self, window: Window) -> Result<Geometry> {
        let reply = self
            .conn
            .get_geometry(window)?
            .reply()
            .map_err(|source| WmError::GeometryQuery { window, source })?;
        Ok(Geometry::new(
            reply.x as i32,
            reply.y as i32,
            reply.width as u32,
            reply.height as u32,
        ))
    }

    fn query_tree(&self, window: Window) -> Result<Vec<Window>> {
        Ok(self.conn.query_tree(window)?.reply()?.children)
    }

    fn get_window_attributes(&self, window: Window) -> Result<Option<WindowAttributes>> {
        match self.conn.get_window_attributes(window)?.reply() {
            Ok(attrs) => Ok(Some(WindowAttributes {
                viewable: attrs.map_state == MapState::VIEWABLE,
                override_redirect: attrs.override_redirect,
            })),
            Err(ReplyError::ConnectionError(e)) => Err(e.into()),
            Err(ReplyError::X11Error(_)) => Ok(None),
        }
    }

    fn create_window(&self, window: Window, parent: Window, spec: &WindowSpec) -> Result<()> {
        let geometry = spec.geometry;
        self.conn.create_window(
            COPY_FROM_PARENT as u8,
            window,
            parent,
            clamp_coordinate(geometry.x),
            clamp_coordinate(geometry.y),
            clamp_extent(geometry.width),
            clamp_extent(geometry.height),
            spec.border_width,
            WindowClass::INPUT_OUTPUT,
            spec.visual,
            &CreateWindowAux::new()
                .background_pixel(spec.background_pixel)
                .border_pixel(spec.border_pixel)
                .event_mask(spec.event_mask),
        )?;
        Ok(())
    }

    fn reparent_window(&self, window: Window, parent: Window, x: i16, y: i16) -> Result<()> {
        self.conn.reparent_window(window, parent, x, y)?;
        Ok(())
    }

    fn map_window(&self, window: Window) -> Result<()> {
        self.conn.map_window(window)?;
        Ok(())
    }

    fn destroy_window(&self, window: Window) -> Result<()> {
        self.conn.destroy_window(window)?;
        Ok(())
    }

    fn configure_window(&self, window: Window, changes: &WindowChanges) -> Result<()> {
        // ConfigureWindowAux emits its values in ascending mask order
        let mut aux = ConfigureWindowAux::new();
        aux.x = changes.x;
        aux.y = changes.y;
        aux.width = changes.width;
        aux.height = changes.height;
        aux.border_width = changes.border_width;
        aux.stack_mode = changes.stack_mode;
        self.conn.configure_window(window, &aux)?;
        Ok(())
    }

    fn set_border_pixel(&self, window: Window, pixel: u32) -> Result<()> {
        let aux = ChangeWindowAttributesAux::new().border_pixel(pixel);
        self.conn.change_window_attributes(window, &aux)?;
        Ok(())
    }

    fn set_input_focus(&self, window: Window) -> Result<()> {
        self.conn
            .set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)?;
        Ok(())
    }
}

/// Window coordinate as carried on the wire, saturating at the `i16` range
fn clamp_coordinate(value: i32) -> i16 {
    i16::try_from(value).unwrap_or(if value < 0 { i16::MIN } else { i16::MAX })
}

/// Window width or height as carried on the wire, saturating at `u16::MAX`
fn clamp_extent(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
