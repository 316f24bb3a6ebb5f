//! In-memory `XConn` for handler tests
//!
//! Records every request, hands out fresh ids and answers geometry and
//! pointer queries from tables the test fills in. Configure requests
//! update the geometry table so consecutive queries see earlier moves.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::xproto::*;

use super::screen::ScreenInfo;
use super::WindowManager;
use crate::config::Config;
use crate::error::{Result, WmError};
use crate::shared::{Geometry, PointerInfo, WindowAttributes, WindowChanges, WindowSpec};
use crate::x11_conn::XConn;

pub const ROOT: Window = 0x100;
pub const WHITE: u32 = 0xffffff;

/// First id handed out by `generate_id`
pub const FIRST_ID: Window = 0x0040_0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    SelectRootEvents(Window, u32),
    SelectInput(Window, u32),
    GrabButton(u8, u16),
    GrabPointer,
    UngrabPointer,
    CreateWindow(Window, Window, WindowSpec),
    Reparent(Window, Window, i16, i16),
    Map(Window),
    Destroy(Window),
    Configure(Window, WindowChanges),
    BorderPixel(Window, u32),
    InputFocus(Window),
    Flush,
}

pub struct FakeConn {
    next_id: Cell<Window>,
    requests: RefCell<Vec<Request>>,
    geometries: RefCell<HashMap<Window, Geometry>>,
    pointer: Cell<PointerInfo>,
    events: RefCell<VecDeque<Option<Vec<u8>>>>,
    toplevels: RefCell<Vec<(Window, WindowAttributes)>>,
    reject_root_events: Cell<bool>,
}

impl FakeConn {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(FIRST_ID),
            requests: RefCell::new(Vec::new()),
            geometries: RefCell::new(HashMap::new()),
            pointer: Cell::new(PointerInfo::default()),
            events: RefCell::new(VecDeque::new()),
            toplevels: RefCell::new(Vec::new()),
            reject_root_events: Cell::new(false),
        }
    }

    pub fn set_geometry(&self, window: Window, geometry: Geometry) {
        self.geometries.borrow_mut().insert(window, geometry);
    }

    pub fn geometry(&self, window: Window) -> Option<Geometry> {
        self.geometries.borrow().get(&window).copied()
    }

    pub fn set_pointer_child(&self, child: Window) {
        self.pointer.set(PointerInfo {
            child,
            ..self.pointer.get()
        });
    }

    pub fn push_event(&self, raw: Option<Vec<u8>>) {
        self.events.borrow_mut().push_back(raw);
    }

    pub fn add_toplevel(&self, window: Window, attributes: WindowAttributes) {
        self.toplevels.borrow_mut().push((window, attributes));
    }

    /// Make root event selection fail as if another manager held it
    pub fn reject_root_events(&self) {
        self.reject_root_events.set(true);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Drain the recorded requests, dropping flushes
    pub fn take_requests(&self) -> Vec<Request> {
        self.requests
            .borrow_mut()
            .drain(..)
            .filter(|r| *r != Request::Flush)
            .collect()
    }

    fn record(&self, request: Request) -> Result<()> {
        self.requests.borrow_mut().push(request);
        Ok(())
    }
}

fn unknown_error() -> ReplyError {
    ReplyError::ConnectionError(ConnectionError::UnknownError)
}

impl XConn for FakeConn {
    fn wait_for_event(&self) -> Result<Option<Vec<u8>>> {
        self.events
            .borrow_mut()
            .pop_front()
            .ok_or(WmError::Connection(ConnectionError::UnknownError))
    }

    fn flush(&self) -> Result<()> {
        self.record(Request::Flush)
    }

    fn generate_id(&self) -> Result<Window> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ok(id)
    }

    fn select_root_events(&self, root: Window, mask: EventMask) -> Result<()> {
        if self.reject_root_events.get() {
            return Err(WmError::AlreadyRunning(unknown_error()));
        }
        self.record(Request::SelectRootEvents(root, u32::from(mask)))
    }

    fn select_input(&self, window: Window, mask: EventMask) -> Result<()> {
        self.record(Request::SelectInput(window, u32::from(mask)))
    }

    fn grab_button(&self, _root: Window, button: ButtonIndex, modifiers: ModMask) -> Result<()> {
        self.record(Request::GrabButton(u8::from(button), u16::from(modifiers)))
    }

    fn grab_pointer(&self, _root: Window) -> Result<()> {
        self.record(Request::GrabPointer)
    }

    fn ungrab_pointer(&self) -> Result<()> {
        self.record(Request::UngrabPointer)
    }

    fn query_pointer(&self, _root: Window) -> Result<PointerInfo> {
        Ok(self.pointer.get())
    }

    fn get_geometry(&self, window: Window) -> Result<Geometry> {
        self.geometry(window).ok_or(WmError::GeometryQuery {
            window,
            source: unknown_error(),
        })
    }

    fn query_tree(&self, _window: Window) -> Result<Vec<Window>> {
        Ok(self.toplevels.borrow().iter().map(|(w, _)| *w).collect())
    }

    fn get_window_attributes(&self, window: Window) -> Result<Option<WindowAttributes>> {
        Ok(self
            .toplevels
            .borrow()
            .iter()
            .find(|(w, _)| *w == window)
            .map(|(_, attrs)| *attrs))
    }

    fn create_window(&self, window: Window, parent: Window, spec: &WindowSpec) -> Result<()> {
        self.set_geometry(window, spec.geometry);
        self.record(Request::CreateWindow(window, parent, *spec))
    }

    fn reparent_window(&self, window: Window, parent: Window, x: i16, y: i16) -> Result<()> {
        self.record(Request::Reparent(window, parent, x, y))
    }

    fn map_window(&self, window: Window) -> Result<()> {
        self.record(Request::Map(window))
    }

    fn destroy_window(&self, window: Window) -> Result<()> {
        self.geometries.borrow_mut().remove(&window);
        self.record(Request::Destroy(window))
    }

    fn configure_window(&self, window: Window, changes: &WindowChanges) -> Result<()> {
        if let Some(geometry) = self.geometries.borrow_mut().get_mut(&window) {
            geometry.x = changes.x.unwrap_or(geometry.x);
            geometry.y = changes.y.unwrap_or(geometry.y);
            geometry.width = changes.width.unwrap_or(geometry.width);
            geometry.height = changes.height.unwrap_or(geometry.height);
        }
        self.record(Request::Configure(window, *changes))
    }

    fn set_border_pixel(&self, window: Window, pixel: u32) -> Result<()> {
        self.record(Request::BorderPixel(window, pixel))
    }

    fn set_input_focus(&self, window: Window) -> Result<()> {
        self.record(Request::InputFocus(window))
    }
}

pub fn screen() -> ScreenInfo {
    ScreenInfo {
        root: ROOT,
        width: 1920,
        height: 1080,
        root_visual: 0x21,
        white_pixel: WHITE,
    }
}

pub fn manager(conn: FakeConn) -> WindowManager<FakeConn> {
    WindowManager::new(conn, screen(), Config::default())
}

pub fn raw_event(response_type: u8) -> Vec<u8> {
    let mut raw = vec![0u8; 32];
    raw[0] = response_type;
    raw
}

pub fn raw_error(error_code: u8) -> Vec<u8> {
    let mut raw = raw_event(0);
    raw[1] = error_code;
    raw
}

pub fn raw_create_notify(window: Window) -> Vec<u8> {
    let mut raw = raw_event(CREATE_NOTIFY_EVENT);
    raw[4..8].copy_from_slice(&ROOT.to_ne_bytes());
    raw[8..12].copy_from_slice(&window.to_ne_bytes());
    raw
}
