//! Window Manager Module
//!
//! The event loop and the state it drives. Handlers live in the
//! submodules as further `impl WindowManager` blocks:
//!
//! - [`decorations`]: framing new clients, tearing frames down
//! - [`placement`]: map requests
//! - [`moveresize`]: the drag state machine and destructive clicks
//! - [`focus`]: border colour, stacking and click-to-focus

pub mod decorations;
pub mod events;
pub mod focus;
pub mod frame_map;
pub mod moveresize;
pub mod placement;
pub mod screen;
#[cfg(test)]
pub(crate) mod testing;

use tracing::{debug, info, warn};
use x11rb::protocol::xproto::{ButtonIndex, EventMask};

use crate::config::Config;
use crate::error::Result;
use crate::x11_conn::XConn;
use events::{Event, Received};
use frame_map::FrameMap;
use moveresize::DragState;
use screen::ScreenInfo;

/// Events selected on the root window at startup
fn root_event_mask() -> EventMask {
    EventMask::SUBSTRUCTURE_REDIRECT
        | EventMask::STRUCTURE_NOTIFY
        | EventMask::SUBSTRUCTURE_NOTIFY
        | EventMask::PROPERTY_CHANGE
        | EventMask::FOCUS_CHANGE
}

/// The reparenting window manager.
///
/// Owns the connection, the frame map and the drag state. Everything runs
/// on the thread that calls [`WindowManager::run`]; handlers finish before
/// the next event is read, so the state needs no locking.
pub struct WindowManager<C: XConn> {
    conn: C,
    screen: ScreenInfo,
    config: Config,
    frames: FrameMap,
    drag: DragState,
}

impl<C: XConn> WindowManager<C> {
    pub fn new(conn: C, screen: ScreenInfo, config: Config) -> Self {
        Self {
            conn,
            screen,
            config,
            frames: FrameMap::new(),
            drag: DragState::Idle,
        }
    }

    /// Become the window manager and process events until the connection
    /// fails. Only returns with an error.
    pub fn run(&mut self) -> Result<()> {
        self.configure()?;
        self.adopt_existing()?;

        info!("Entering event loop");
        loop {
            let raw = self.conn.wait_for_event()?;
            self.process(raw.as_deref())?;
        }
    }

    /// Client ↔ frame pairs currently managed
    #[cfg(test)]
    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    #[cfg(test)]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Subscribe to the root window and install the global button grabs
    fn configure(&self) -> Result<()> {
        let root = self.screen.root;
        self.conn.select_root_events(root, root_event_mask())?;
        info!("Registered as window manager on root {}", root);

        for button in [ButtonIndex::M1, ButtonIndex::M3] {
            self.conn.grab_button(root, button, self.config.grab_modifiers)?;
        }
        info!("Left-drag on a frame moves it, right-click destroys a window");

        self.conn.flush()
    }

    /// Handle one raw event and flush whatever the handler queued
    fn process(&mut self, raw: Option<&[u8]>) -> Result<()> {
        match events::classify(raw)? {
            Received::Empty => warn!("Empty event was received"),
            Received::Error {
                error_code,
                major_opcode,
            } => warn!(
                "X11 error event: error_code={}, major_opcode={}",
                error_code, major_opcode
            ),
            Received::Unhandled { code } => debug!("Ignoring event of type {}", code),
            Received::Event(event) => {
                debug!("Received {:?}", event);
                self.handle_event(event)?;
            }
        }

        self.conn.flush()
    }

    /// Dispatch a decoded event to its handler
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::CreateNotify {
                window,
                override_redirect,
            } => self.handle_create_notify(window, override_redirect),
            Event::DestroyNotify { window } => self.handle_destroy_notify(window),
            Event::MapRequest { window } => self.handle_map_request(window),
            Event::ButtonPress {
                button,
                child,
                root_x,
                root_y,
            } => self.handle_button_press(button, child, root_x, root_y),
            Event::ButtonRelease { button } => self.handle_button_release(button),
            Event::MotionNotify { root_x, root_y } => self.handle_motion_notify(root_x, root_y),
            Event::FocusIn { window } => self.handle_focus_in(window),
            Event::FocusOut { window } => self.handle_focus_out(window),
        }
    }
}
