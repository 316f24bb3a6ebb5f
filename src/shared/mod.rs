//! Types shared between the window manager core and its X connection

mod window_state;

pub use window_state::{Geometry, PointerInfo, WindowAttributes, WindowChanges, WindowSpec};
