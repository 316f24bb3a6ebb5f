//! Client ↔ frame bookkeeping

use std::collections::HashMap;
use x11rb::protocol::xproto::Window;

/// One-to-one mapping between managed clients and their frames.
///
/// Both directions are kept so a click target can be resolved to its
/// client and a destroyed client to its frame without a scan.
#[derive(Debug, Default)]
pub struct FrameMap {
    frames: HashMap<Window, Window>,
    clients: HashMap<Window, Window>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `client` as framed by `frame`.
    ///
    /// Returns `false` and leaves the map untouched if either window is
    /// already part of a pair.
    pub fn insert(&mut self, client: Window, frame: Window) -> bool {
        if self.contains(client) || self.contains(frame) {
            return false;
        }
        self.frames.insert(client, frame);
        self.clients.insert(frame, client);
        true
    }

    /// Frame wrapping `client`
    pub fn frame_of(&self, client: Window) -> Option<Window> {
        self.frames.get(&client).copied()
    }

    /// Client wrapped by `frame`
    pub fn client_of(&self, frame: Window) -> Option<Window> {
        self.clients.get(&frame).copied()
    }

    pub fn is_frame(&self, window: Window) -> bool {
        self.clients.contains_key(&window)
    }

    pub fn is_client(&self, window: Window) -> bool {
        self.frames.contains_key(&window)
    }

    /// Whether `window` is a client or a frame
    pub fn contains(&self, window: Window) -> bool {
        self.is_client(window) || self.is_frame(window)
    }

    /// Forget `client`, returning the frame it had
    pub fn remove_client(&mut self, client: Window) -> Option<Window> {
        let frame = self.frames.remove(&client)?;
        self.clients.remove(&frame);
        Some(frame)
    }

    /// Forget `frame`, returning the client it wrapped
    pub fn remove_frame(&mut self, frame: Window) -> Option<Window> {
        let client = self.clients.remove(&frame)?;
        self.frames.remove(&client);
        Some(client)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
