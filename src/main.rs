//! perch
//!
//! A minimal reparenting X11 window manager. New top-level windows are
//! wrapped in a flat frame; left-drag a frame to move it, right-click a
//! window to destroy it, click to focus.

mod config;
mod error;
mod shared;
mod wm;
mod x11_conn;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, DEFAULT_LOG_FILTER};
use crate::wm::WindowManager;
use crate::x11_conn::X11Connection;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting perch");

    let conn = X11Connection::connect().context("Failed to connect to X server")?;
    let screen = conn.screen();
    info!("Screen size: {}x{}", screen.width, screen.height);

    let mut wm = WindowManager::new(conn, screen, Config::default());
    wm.run().context("Critical error in window manager")
}
