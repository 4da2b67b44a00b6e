/*
 * WM_NCCALCSIZE: tells the OS which part of the proposed window rectangle is
 * client area. Leaving the rectangle untouched makes the whole window client
 * area, which removes the caption. Two corrections are then applied by hand:
 * maximized windows are oversized by the OS beyond the monitor, so the frame
 * thickness is clipped back off; and a window covering the whole monitor
 * would hide an auto-hide taskbar for good, so a thin strip is left free on
 * the taskbar's edge.
 */
use crate::config::FramelessConfig;
use crate::geometry;
use crate::messages::{HTERROR, HTNOWHERE, WM_NCCALCSIZE, WVR_REDRAW};
use crate::platform::{Capabilities, Platform};
use crate::types::{LParam, LResult, MessageOutcome, NativeRect, ScreenEdge, WParam, WindowHandle};

/// Window facts the client-rect correction depends on, sampled once per
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameState {
    pub maximized: bool,
    pub full_screen: bool,
    /// The OS already computed the left/right/bottom frame.
    pub native_side_frame: bool,
    pub resize_border: i32,
    pub auto_hide_edge: Option<ScreenEdge>,
    pub auto_hide_thickness: i32,
}

/// Pure correction of a proposed client rectangle.
pub fn adjust_client_rect(mut rect: NativeRect, frame: &FrameState) -> NativeRect {
    if frame.maximized && !frame.full_screen {
        let border = frame.resize_border;
        rect.top += border;
        if !frame.native_side_frame {
            rect.bottom -= border;
            rect.left += border;
            rect.right -= border;
        }
    }
    if frame.maximized || frame.full_screen {
        let inset = frame.auto_hide_thickness;
        match frame.auto_hide_edge {
            Some(ScreenEdge::Top) => rect.top += inset,
            Some(ScreenEdge::Bottom) => rect.bottom -= inset,
            Some(ScreenEdge::Left) => rect.left += inset,
            Some(ScreenEdge::Right) => rect.right -= inset,
            None => {}
        }
    }
    rect
}

fn sample_frame_state(
    platform: &impl Platform,
    caps: &Capabilities,
    config: &FramelessConfig,
    hwnd: WindowHandle,
) -> FrameState {
    let maximized = geometry::is_maximized(platform, hwnd);
    let full_screen = geometry::is_full_screen(platform, hwnd);
    let resize_border = if maximized && !full_screen {
        geometry::resize_border_thickness(platform, caps, hwnd)
    } else {
        0
    };
    let auto_hide_edge = if maximized || full_screen {
        geometry::auto_hide_taskbar_edge(platform, caps, hwnd)
    } else {
        None
    };
    FrameState {
        maximized,
        full_screen,
        native_side_frame: caps.is_win10_or_greater(),
        resize_border,
        auto_hide_edge,
        auto_hide_thickness: config.auto_hide_taskbar_thickness,
    }
}

/// Handles WM_NCCALCSIZE in place.
///
/// # Safety
/// `wparam`/`lparam` must be the parameters of the WM_NCCALCSIZE message
/// currently being delivered to `hwnd`.
pub unsafe fn handle_nc_calc_size(
    platform: &impl Platform,
    caps: &Capabilities,
    config: &FramelessConfig,
    hwnd: WindowHandle,
    wparam: WParam,
    lparam: LParam,
) -> MessageOutcome {
    // SAFETY: forwarded from the caller's contract.
    let Some(proposed) = (unsafe { platform.read_calc_size_rect(wparam, lparam) }) else {
        log::warn!("[NcCalcSize] {hwnd} has no rectangle to adjust");
        return MessageOutcome::NotHandled;
    };

    let mut rect = proposed;
    if caps.is_win10_or_greater() {
        // Let the system compute the three side frames, then drop its caption.
        let result = platform.default_window_proc(hwnd, WM_NCCALCSIZE, wparam, lparam);
        if result.0 != HTERROR as isize && result.0 != HTNOWHERE as isize {
            log::trace!("[NcCalcSize] {hwnd} default processing answered {}", result.0);
            return MessageOutcome::Handled(result);
        }
        // SAFETY: as above.
        rect = unsafe { platform.read_calc_size_rect(wparam, lparam) }.unwrap_or(proposed);
        rect.top = proposed.top;
    }

    let frame = sample_frame_state(platform, caps, config, hwnd);
    let adjusted = adjust_client_rect(rect, &frame);
    log::trace!("[NcCalcSize] {hwnd} {frame:?} -> {adjusted:?}");
    // SAFETY: as above.
    unsafe { platform.write_calc_size_rect(wparam, lparam, adjusted) };

    // Full recalculation must redraw; plain translation must not, or child
    // content ends up misplaced.
    let result = if wparam.0 == 0 { 0 } else { WVR_REDRAW };
    MessageOutcome::Handled(LResult(result))
}
