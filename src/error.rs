//! Error types for the window manager

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};

pub type Result<T, E = WmError> = std::result::Result<T, E>;

/// Everything that can stop the window manager.
///
/// Per-event trouble (null events, X11 error packets) never becomes a
/// `WmError`; the event loop logs it and moves on.
#[derive(Debug, Error)]
pub enum WmError {
    #[error("failed to connect to the X server")]
    Connect(#[from] ConnectError),

    #[error("X server connection failed")]
    Connection(#[from] ConnectionError),

    #[error("failed to subscribe to root window events (is another window manager running?)")]
    AlreadyRunning(#[source] ReplyError),

    #[error("failed to query geometry of window {window}")]
    GeometryQuery {
        window: u32,
        #[source]
        source: ReplyError,
    },

    #[error("failed to query pointer")]
    PointerQuery(#[source] ReplyError),

    #[error("X request failed")]
    Request(#[from] ReplyError),

    #[error("failed to allocate an X resource id")]
    Id(#[from] ReplyOrIdError),

    #[error("malformed payload for event type {code}")]
    Parse {
        code: u8,
        #[source]
        source: x11rb::errors::ParseError,
    },
}
