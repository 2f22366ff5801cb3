//! Platform abstraction layer
//!
//! The dialog logic only talks to a [`DisplaySession`]: open a window, pull
//! decoded events, draw a handful of primitives, close. Each OS supplies its
//! own session (or skips sessions entirely and wraps a system message box) as
//! a [`NativeBackend`].

#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

#[cfg(all(feature = "x11", unix, not(target_os = "macos")))]
pub mod x11;

#[cfg(windows)]
pub mod win32;

#[cfg(target_os = "macos")]
pub mod macos;

use crate::config::Config;
use crate::dialog::{ButtonSpec, DialogEvent, DialogRequest, ResultCode};
use crate::error::{DialogError, Result};
use std::sync::Arc;

/// Axis-aligned pixel rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Inclusive on all four edges
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One open native window plus the connection it lives on.
///
/// Dropping or closing a session releases both; `close` must be safe to call
/// more than once.
pub trait DisplaySession {
    /// Block until the next event arrives
    fn next_event(&mut self) -> Result<DialogEvent>;

    /// Make `name` the text font. `Ok(false)` means the name did not resolve.
    fn load_font(&mut self, name: &str) -> Result<bool>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// One-pixel outline just inside `rect`
    fn stroke_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw `text` with its baseline at `y`, filling the glyph cells with `bg`
    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color) -> Result<()>;

    /// Push queued drawing to the server
    fn flush(&mut self) -> Result<()>;

    /// Clear, destroy the window, flush, sync, disconnect
    fn close(&mut self) -> Result<()>;
}

/// Shows one dialog with whatever the OS offers.
pub trait NativeBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn show(&self, request: &DialogRequest, buttons: &ButtonSpec) -> Result<ResultCode>;
}

/// Detected platform type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformType {
    X11,
    Windows,
    MacOs,
    Unsupported(&'static str),
}

impl PlatformType {
    pub fn detect() -> Self {
        if cfg!(windows) {
            PlatformType::Windows
        } else if cfg!(target_os = "macos") {
            PlatformType::MacOs
        } else if cfg!(unix) {
            PlatformType::X11
        } else {
            PlatformType::Unsupported(std::env::consts::OS)
        }
    }
}

/// Native backend for the running OS
pub fn native_backend(config: &Config) -> Result<Arc<dyn NativeBackend>> {
    match PlatformType::detect() {
        PlatformType::X11 => x11_backend(config),
        PlatformType::Windows => win32_backend(config),
        PlatformType::MacOs => macos_backend(config),
        PlatformType::Unsupported(os) => Err(DialogError::UnsupportedPlatform(os)),
    }
}

#[cfg(all(feature = "x11", unix, not(target_os = "macos")))]
fn x11_backend(config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Ok(Arc::new(x11::X11Backend::new(config)))
}

#[cfg(not(all(feature = "x11", unix, not(target_os = "macos"))))]
fn x11_backend(_config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Err(DialogError::UnsupportedPlatform("x11 (support not compiled in)"))
}

#[cfg(windows)]
fn win32_backend(_config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Ok(Arc::new(win32::WindowsBackend))
}

#[cfg(not(windows))]
fn win32_backend(_config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Err(DialogError::UnsupportedPlatform("windows"))
}

#[cfg(target_os = "macos")]
fn macos_backend(_config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Ok(Arc::new(macos::MacOsBackend))
}

#[cfg(not(target_os = "macos"))]
fn macos_backend(_config: &Config) -> Result<Arc<dyn NativeBackend>> {
    Err(DialogError::UnsupportedPlatform("macos"))
}
