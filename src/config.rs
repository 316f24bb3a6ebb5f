//! Window manager policy settings
//!
//! perch reads no configuration files. The values below are the built-in
//! policy; `Config::default()` is what the binary runs with.

use x11rb::protocol::xproto::ModMask;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "perch=debug,info";

/// Policy knobs shared by every handler
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Border around each frame window
    pub frame_border_width: u16,

    /// Border applied to a client when it is mapped
    pub client_border_width: u32,

    /// Height of the title strip above the client, also the client's
    /// vertical offset inside its frame
    pub title_height: u16,

    /// Border pixel of the window that has input focus
    pub focused_border: u32,

    /// Border pixel of a window that lost input focus
    pub unfocused_border: u32,

    /// Modifiers the root button grabs apply to
    pub grab_modifiers: ModMask,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_border_width: 3,
            client_border_width: 3,
            title_height: 10,
            focused_border: 0xffffff,
            unfocused_border: 0xcccccc,
            grab_modifiers: ModMask::ANY,
        }
    }
}
