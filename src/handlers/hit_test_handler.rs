/*
 * Answers WM_NCHITTEST for a frameless window. The OS no longer knows where
 * the caption and caption buttons are, so the code it would normally compute
 * is derived here from the registered chrome layout: resize edges first (only
 * while the window is restored), then system buttons, then interactive items
 * painted over the title bar, then the draggable title bar itself. Everything
 * else is client area.
 */
use crate::config::FramelessConfig;
use crate::context::ChromeLayout;
use crate::geometry;
use crate::messages::{
    HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTCLOSE, HTHELP, HTLEFT,
    HTNOWHERE, HTREDUCE, HTRIGHT, HTSYSMENU, HTTOP, HTTOPLEFT, HTTOPRIGHT, HTZOOM, x_from_lparam,
    y_from_lparam,
};
use crate::platform::{Capabilities, Platform};
use crate::types::{LParam, NativePoint, NativeRect, Point, SystemButton, WindowHandle};

/// Native code reported for a caption button. Maximize answers HTZOOM, which
/// is what makes the OS show the snap layout flyout.
pub fn system_button_hit_code(button: SystemButton) -> i32 {
    match button {
        SystemButton::WindowIcon => HTSYSMENU,
        SystemButton::Help => HTHELP,
        SystemButton::Minimize => HTREDUCE,
        SystemButton::Maximize => HTZOOM,
        SystemButton::Close => HTCLOSE,
        SystemButton::Unknown => HTCLIENT,
    }
}

/// Directional resize code for a screen point lying within `border` pixels of
/// the window edge, if any.
fn resize_edge_code(window: NativeRect, point: NativePoint, border: i32) -> Option<i32> {
    if border <= 0 {
        return None;
    }
    let left = point.x < window.left + border;
    let right = point.x >= window.right - border;
    let top = point.y < window.top + border;
    let bottom = point.y >= window.bottom - border;
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(HTTOPLEFT),
        (_, true, true, _) => Some(HTTOPRIGHT),
        (true, _, _, true) => Some(HTBOTTOMLEFT),
        (_, true, _, true) => Some(HTBOTTOMRIGHT),
        (true, _, _, _) => Some(HTLEFT),
        (_, true, _, _) => Some(HTRIGHT),
        (_, _, true, _) => Some(HTTOP),
        (_, _, _, true) => Some(HTBOTTOM),
        _ => None,
    }
}

/// Hit-test code for `screen` (screen coordinates). `None` when the window
/// state cannot be read, leaving the message to default processing.
pub fn hit_test_code(
    platform: &impl Platform,
    caps: &Capabilities,
    config: &FramelessConfig,
    layout: &ChromeLayout,
    hwnd: WindowHandle,
    screen: NativePoint,
) -> Option<i32> {
    let window = platform.window_rect(hwnd)?;
    if !window.contains(screen) {
        return Some(HTNOWHERE);
    }

    if config.emulate_resize_borders
        && !geometry::is_maximized(platform, hwnd)
        && !geometry::is_full_screen(platform, hwnd)
    {
        let border = geometry::resize_border_thickness(platform, caps, hwnd);
        if let Some(code) = resize_edge_code(window, screen, border) {
            return Some(code);
        }
    }

    let client: Point = platform.screen_to_client(hwnd, screen)?.into();
    if let Some(button) = layout.system_button_at(client) {
        return Some(system_button_hit_code(button));
    }
    if layout.is_in_hit_test_visible_area(client) {
        return Some(HTCLIENT);
    }
    if layout.is_in_title_bar_draggable_area(client) {
        return Some(HTCAPTION);
    }
    Some(HTCLIENT)
}

/// Decodes the WM_NCHITTEST point and computes the code for it.
pub fn handle_nc_hit_test(
    platform: &impl Platform,
    caps: &Capabilities,
    config: &FramelessConfig,
    layout: &ChromeLayout,
    hwnd: WindowHandle,
    lparam: LParam,
) -> Option<i32> {
    let screen = NativePoint {
        x: x_from_lparam(lparam),
        y: y_from_lparam(lparam),
    };
    let code = hit_test_code(platform, caps, config, layout, hwnd, screen);
    match code {
        Some(code) => log::trace!("[HitTest] {hwnd} ({}, {}) -> {code}", screen.x, screen.y),
        None => log::trace!("[HitTest] {hwnd} window state unavailable; deferring to default"),
    }
    code
}
