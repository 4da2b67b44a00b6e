/*
 * Public entry point of snapframe: custom-drawn title bars for Win32 windows
 * that keep the native behaviors a caption normally provides. Resizing from
 * the frame, the Windows 11 snap-layout flyout on the maximize button, and
 * reaching an auto-hide taskbar from a maximized window all keep working.
 *
 * The message handling core (`router`, `window_context`, `handlers`) is
 * portable and only talks to the OS through the `Platform` trait, so it builds
 * and tests on every target. The Win32 implementation of that trait and the
 * subclassing host live in `win32`, compiled on Windows only.
 */
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod messages;
pub mod platform;
pub mod router;
pub mod types;
#[cfg(target_os = "windows")]
pub mod win32;
pub mod window_context;

#[cfg(test)]
mod test_support;

pub use config::{ChainMode, FramelessConfig};
pub use context::{ChromeLayout, WindowItemDelegate};
pub use error::{PlatformError, Result as PlatformResult};
pub use platform::{Capabilities, MonitorInfo, OsVersion, Platform, WindowSnapshot};
pub use router::{ForwardedResult, ResultForwarder, SharedRegistry, WindowRegistry, chain_to_next};
pub use types::{
    ItemId, LParam, LResult, MessageOutcome, NativePoint, NativeRect, Point, Rect, ScreenEdge,
    Size, SystemButton, WParam, WindowHandle, WindowPart,
};
#[cfg(target_os = "windows")]
pub use win32::{Win32Host, Win32Platform};
pub use window_context::WindowContext;
