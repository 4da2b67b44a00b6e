/*
 * Window and monitor queries shared by the hit-test and frame handlers. All
 * functions are re-derived from current OS state on every call; nothing is
 * cached beyond the process-wide `Capabilities`.
 */
use crate::messages::{
    SM_CXPADDEDBORDER, SM_CXSIZEFRAME, USER_DEFAULT_SCREEN_DPI, WS_DISABLED, WS_EX_TOOLWINDOW,
};
use crate::platform::{Capabilities, MonitorInfo, Platform};
use crate::types::{ScreenEdge, WindowHandle};

pub fn monitor_for_window(platform: &impl Platform, hwnd: WindowHandle) -> Option<MonitorInfo> {
    if hwnd.is_null() {
        return None;
    }
    platform.nearest_monitor(hwnd)
}

/// True only when the window covers its monitor's full bounds. Covering just
/// the work area (a maximized window beside a visible taskbar) does not count.
pub fn is_full_screen(platform: &impl Platform, hwnd: WindowHandle) -> bool {
    if hwnd.is_null() {
        return false;
    }
    let Some(window_rect) = platform.window_rect(hwnd) else {
        return false;
    };
    monitor_for_window(platform, hwnd)
        .map(|info| info.monitor == window_rect)
        .unwrap_or(false)
}

pub fn is_maximized(platform: &impl Platform, hwnd: WindowHandle) -> bool {
    !hwnd.is_null() && platform.is_maximized(hwnd)
}

/// Effective DPI of the window: per-window API, then per-monitor API, then the
/// screen device context.
pub fn window_dpi(platform: &impl Platform, caps: &Capabilities, hwnd: WindowHandle) -> u32 {
    if hwnd.is_null() {
        return USER_DEFAULT_SCREEN_DPI;
    }
    if caps.has_dpi_for_window
        && let Some(dpi) = platform.dpi_for_window(hwnd)
    {
        return dpi;
    }
    if caps.has_dpi_for_monitor
        && let Some(dpi) = platform.dpi_for_monitor(hwnd)
    {
        return dpi;
    }
    platform.screen_dpi()
}

/// Frame thickness plus padded border at the window's DPI. Falls back to the
/// DPI-unaware metrics on systems without GetSystemMetricsForDpi.
pub fn resize_border_thickness(
    platform: &impl Platform,
    caps: &Capabilities,
    hwnd: WindowHandle,
) -> i32 {
    if hwnd.is_null() {
        return 0;
    }
    if caps.has_system_metrics_for_dpi {
        let dpi = window_dpi(platform, caps, hwnd);
        // A zero frame means the call failed; a zero padded border is legal.
        if let (Some(frame), Some(padding)) = (
            platform.system_metric_for_dpi(SM_CXSIZEFRAME, dpi),
            platform.system_metric_for_dpi(SM_CXPADDEDBORDER, dpi),
        ) && frame > 0
        {
            return frame + padding;
        }
        log::warn!("[Geometry] GetSystemMetricsForDpi failed for {hwnd}; using unscaled metrics");
    }
    platform.system_metric(SM_CXSIZEFRAME) + platform.system_metric(SM_CXPADDEDBORDER)
}

/// Edge of the window's monitor hosting an auto-hide taskbar, if any. Uses the
/// per-edge appbar probe where it exists; older systems only know about the
/// tray taskbar, and only when it shares the window's monitor.
pub fn auto_hide_taskbar_edge(
    platform: &impl Platform,
    caps: &Capabilities,
    hwnd: WindowHandle,
) -> Option<ScreenEdge> {
    if hwnd.is_null() || !platform.is_taskbar_auto_hide() {
        return None;
    }
    if caps.is_win8_1_or_greater() {
        let monitor = monitor_for_window(platform, hwnd)?.monitor;
        ScreenEdge::PROBE_ORDER
            .into_iter()
            .find(|edge| platform.has_auto_hide_bar_on_edge(*edge, monitor))
    } else {
        platform.tray_taskbar_edge(hwnd)
    }
}

/// Whether `hwnd` still identifies a live, enabled, non-tool window with a
/// non-degenerate rectangle, optionally also visible and top-level.
pub fn is_valid_window(
    platform: &impl Platform,
    hwnd: WindowHandle,
    check_visible: bool,
    check_top_level: bool,
) -> bool {
    if hwnd.is_null() {
        return false;
    }
    let Some(snapshot) = platform.window_snapshot(hwnd) else {
        return false;
    };
    if snapshot.style & WS_DISABLED != 0 {
        return false;
    }
    if snapshot.ex_style & WS_EX_TOOLWINDOW != 0 {
        return false;
    }
    if snapshot.rect.is_empty() {
        return false;
    }
    if check_visible && !snapshot.visible {
        return false;
    }
    if check_top_level && !snapshot.top_level {
        return false;
    }
    true
}
