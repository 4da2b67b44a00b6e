/*
 * The narrow OS adapter consumed by every handler. Handlers never call Win32
 * directly: they query window/monitor state, poll input, post synthesized
 * messages, and run default processing through `Platform`, which keeps the
 * classification and emulation logic testable with a scripted implementation.
 *
 * `Capabilities` is the value object describing which optional OS APIs exist.
 * It is detected once when the registry is created and handed down to the
 * handlers, so nothing re-probes DLL exports per message.
 */
use crate::types::{LParam, LResult, NativePoint, NativeRect, ScreenEdge, WParam, WindowHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl OsVersion {
    pub const WINDOWS_8_1: OsVersion = OsVersion {
        major: 6,
        minor: 3,
        build: 0,
    };
    pub const WINDOWS_10: OsVersion = OsVersion {
        major: 10,
        minor: 0,
        build: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub os_version: OsVersion,
    /// user32!GetDpiForWindow
    pub has_dpi_for_window: bool,
    /// user32!GetSystemMetricsForDpi
    pub has_system_metrics_for_dpi: bool,
    /// shcore!GetDpiForMonitor
    pub has_dpi_for_monitor: bool,
}

impl Capabilities {
    /// Windows 10 and later keep the native frame on three edges and only
    /// remove the caption.
    pub fn is_win10_or_greater(&self) -> bool {
        self.os_version >= OsVersion::WINDOWS_10
    }

    /// Windows 8.1 introduced the per-edge auto-hide appbar query.
    pub fn is_win8_1_or_greater(&self) -> bool {
        self.os_version >= OsVersion::WINDOWS_8_1
    }

    pub fn has_per_monitor_dpi(&self) -> bool {
        self.has_dpi_for_window || self.has_dpi_for_monitor
    }
}

/// Style and placement facts needed to decide whether a window may be
/// processed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSnapshot {
    pub style: u32,
    pub ex_style: u32,
    pub rect: NativeRect,
    pub visible: bool,
    /// The window is its own root ancestor.
    pub top_level: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorInfo {
    /// Full bounds of the monitor.
    pub monitor: NativeRect,
    /// Bounds minus docked taskbars and app bars.
    pub work: NativeRect,
}

pub trait Platform {
    /// `None` when the handle no longer identifies a window.
    fn window_snapshot(&self, hwnd: WindowHandle) -> Option<WindowSnapshot>;

    fn window_rect(&self, hwnd: WindowHandle) -> Option<NativeRect>;

    fn is_maximized(&self, hwnd: WindowHandle) -> bool;

    /// Monitor nearest to the window; resolves even for minimized windows.
    fn nearest_monitor(&self, hwnd: WindowHandle) -> Option<MonitorInfo>;

    fn dpi_for_window(&self, hwnd: WindowHandle) -> Option<u32>;

    fn dpi_for_monitor(&self, hwnd: WindowHandle) -> Option<u32>;

    /// DPI of the screen device context, available on every version.
    fn screen_dpi(&self) -> u32;

    fn system_metric(&self, index: i32) -> i32;

    /// `None` when the DPI-aware metrics API is unavailable. Zero is a valid
    /// answer for some metrics.
    fn system_metric_for_dpi(&self, index: i32, dpi: u32) -> Option<i32>;

    /// Whether the shell taskbar is configured to auto-hide.
    fn is_taskbar_auto_hide(&self) -> bool;

    /// Per-edge auto-hide appbar probe (Windows 8.1+).
    fn has_auto_hide_bar_on_edge(&self, edge: ScreenEdge, monitor: NativeRect) -> bool;

    /// Edge of the system tray taskbar, if it lives on the same monitor as
    /// `hwnd`. Used where the per-edge probe does not exist.
    fn tray_taskbar_edge(&self, hwnd: WindowHandle) -> Option<ScreenEdge>;

    /// Screen position of the message currently being processed.
    fn message_pos(&self) -> NativePoint;

    fn screen_to_client(&self, hwnd: WindowHandle, point: NativePoint) -> Option<NativePoint>;

    fn is_key_down(&self, virtual_key: i32) -> bool;

    /// Queue a message for later dispatch; never delivers inline.
    fn post_message(&self, hwnd: WindowHandle, msg: u32, wparam: WParam, lparam: LParam) -> bool;

    /// Request a one-shot WM_MOUSELEAVE for the client area.
    fn track_client_mouse_leave(&self, hwnd: WindowHandle) -> bool;

    fn default_window_proc(
        &self,
        hwnd: WindowHandle,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult;

    /// Reads the proposed rectangle of a WM_NCCALCSIZE message.
    ///
    /// # Safety
    /// `wparam`/`lparam` must be the parameters of a WM_NCCALCSIZE message
    /// that is currently being delivered.
    unsafe fn read_calc_size_rect(&self, wparam: WParam, lparam: LParam) -> Option<NativeRect>;

    /// Writes the client rectangle back into a WM_NCCALCSIZE message.
    ///
    /// # Safety
    /// Same contract as [`Platform::read_calc_size_rect`].
    unsafe fn write_calc_size_rect(&self, wparam: WParam, lparam: LParam, rect: NativeRect);
}
