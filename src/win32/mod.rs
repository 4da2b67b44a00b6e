/*
 * Win32 backend: `Win32Platform` implements `Platform` over user32, shell32
 * and shcore, and `Win32Host` attaches the intercepting procedure to real
 * windows.
 */
mod host;
mod platform;

pub use host::Win32Host;
pub use platform::Win32Platform;
