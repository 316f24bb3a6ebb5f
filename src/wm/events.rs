//! Events Module
//!
//! Turns raw wire events into the typed [`Event`]s the handlers consume.
//! The event loop only looks at the result of [`classify`]; payloads are
//! decoded here, one event kind at a time.

use x11rb::protocol::xproto::*;
use x11rb::x11_utils::TryParse;

use crate::error::{Result, WmError};

/// Set on the response type of events sent with SendEvent
const SYNTHETIC_FLAG: u8 = 0x80;

/// Events the window manager reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CreateNotify {
        window: Window,
        override_redirect: bool,
    },
    DestroyNotify {
        window: Window,
    },
    MapRequest {
        window: Window,
    },
    ButtonPress {
        button: u8,
        /// Child of the root the press happened in, `x11rb::NONE` for the root itself
        child: Window,
        root_x: i16,
        root_y: i16,
    },
    ButtonRelease {
        button: u8,
    },
    MotionNotify {
        root_x: i16,
        root_y: i16,
    },
    FocusIn {
        window: Window,
    },
    FocusOut {
        window: Window,
    },
}

/// What arrived from the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// The connection produced an empty event
    Empty,
    /// An X11 error packet
    Error { error_code: u8, major_opcode: u8 },
    /// A well-formed event nobody handles
    Unhandled { code: u8 },
    Event(Event),
}

/// Classify a raw event and decode the payload of the kinds we handle
pub fn classify(raw: Option<&[u8]>) -> Result<Received> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Received::Empty),
    };

    if raw[0] == 0 {
        return Ok(Received::Error {
            error_code: raw.get(1).copied().unwrap_or(0),
            major_opcode: raw.get(10).copied().unwrap_or(0),
        });
    }

    let code = raw[0] & !SYNTHETIC_FLAG;
    let event = match code {
        CREATE_NOTIFY_EVENT => {
            let e = parse::<CreateNotifyEvent>(code, raw)?;
            Event::CreateNotify {
                window: e.window,
                override_redirect: e.override_redirect,
            }
        }
        DESTROY_NOTIFY_EVENT => {
            let e = parse::<DestroyNotifyEvent>(code, raw)?;
            Event::DestroyNotify { window: e.window }
        }
        MAP_REQUEST_EVENT => {
            let e = parse::<MapRequestEvent>(code, raw)?;
            Event::MapRequest { window: e.window }
        }
        BUTTON_PRESS_EVENT => {
            let e = parse::<ButtonPressEvent>(code, raw)?;
            Event::ButtonPress {
                button: e.detail,
                child: e.child,
                root_x: e.root_x,
                root_y: e.root_y,
            }
        }
        BUTTON_RELEASE_EVENT => {
            let e = parse::<ButtonReleaseEvent>(code, raw)?;
            Event::ButtonRelease { button: e.detail }
        }
        MOTION_NOTIFY_EVENT => {
            let e = parse::<MotionNotifyEvent>(code, raw)?;
            Event::MotionNotify {
                root_x: e.root_x,
                root_y: e.root_y,
            }
        }
        FOCUS_IN_EVENT => {
            let e = parse::<FocusInEvent>(code, raw)?;
            Event::FocusIn { window: e.event }
        }
        FOCUS_OUT_EVENT => {
            let e = parse::<FocusOutEvent>(code, raw)?;
            Event::FocusOut { window: e.event }
        }
        _ => return Ok(Received::Unhandled { code }),
    };

    Ok(Received::Event(event))
}

fn parse<T: TryParse>(code: u8, raw: &[u8]) -> Result<T> {
    T::try_parse(raw)
        .map(|(event, _)| event)
        .map_err(|source| WmError::Parse { code, source })
}
