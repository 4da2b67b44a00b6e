/*
 * Per-window message handling. A `WindowContext` owns the chrome layout and the
 * snap-layout state of one top-level window and runs each intercepted message
 * through, in order: the teardown filter, the validity check, the snap-layout
 * state machine, and the frame handlers (WM_NCHITTEST, WM_NCCALCSIZE).
 */
use std::rc::Rc;

use crate::config::FramelessConfig;
use crate::context::{ChromeLayout, WindowItemDelegate};
use crate::geometry;
use crate::handlers::hit_test_handler::handle_nc_hit_test;
use crate::handlers::nc_calc_size_handler::handle_nc_calc_size;
use crate::handlers::region_classifier::classify_hit_test;
use crate::handlers::snap_layout_handler::{SnapInput, SnapLayoutState, handle_snap_layout};
use crate::messages::{USER_DEFAULT_SCREEN_DPI, WM_NCCALCSIZE, WM_NCHITTEST, is_teardown_message};
use crate::platform::{Capabilities, Platform};
use crate::types::{LParam, LResult, MessageOutcome, WParam, WindowHandle, WindowPart};

#[derive(Debug)]
pub struct WindowContext {
    hwnd: WindowHandle,
    layout: ChromeLayout,
    snap: SnapLayoutState,
}

impl WindowContext {
    pub fn new(hwnd: WindowHandle, delegate: Rc<dyn WindowItemDelegate>) -> Self {
        Self {
            hwnd,
            layout: ChromeLayout::new(delegate),
            snap: SnapLayoutState::default(),
        }
    }

    pub fn handle(&self) -> WindowHandle {
        self.hwnd
    }

    /// Backend identifier.
    pub fn key(&self) -> &'static str {
        "win32"
    }

    pub fn layout(&self) -> &ChromeLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ChromeLayout {
        &mut self.layout
    }

    pub fn last_hit_test_result(&self) -> WindowPart {
        self.snap.last_hit
    }

    pub fn is_mouse_leave_blocked(&self) -> bool {
        self.snap.is_leave_suppressed()
    }

    pub fn snap_state(&self) -> SnapLayoutState {
        self.snap
    }

    /// Whether the widget layer has to paint the top border. From Windows 10
    /// on, WM_NCCALCSIZE drops the whole top frame together with the caption.
    pub fn needs_border_painter(&self, caps: &Capabilities) -> bool {
        caps.is_win10_or_greater()
    }

    /// Thickness of the painted border: one pixel at 96 DPI, scaled to the
    /// window's DPI.
    pub fn border_thickness(&self, platform: &impl Platform, caps: &Capabilities) -> i32 {
        let dpi = geometry::window_dpi(platform, caps, self.hwnd);
        let scaled = (dpi + USER_DEFAULT_SCREEN_DPI / 2) / USER_DEFAULT_SCREEN_DPI;
        scaled.max(1) as i32
    }

    /// Runs one message through the handler chain.
    ///
    /// # Safety
    /// `msg`, `wparam` and `lparam` must be the parameters of a message that
    /// is currently being delivered to this context's window; WM_NCCALCSIZE
    /// dereferences `lparam`.
    pub unsafe fn window_proc(
        &mut self,
        platform: &impl Platform,
        caps: &Capabilities,
        config: &FramelessConfig,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> MessageOutcome {
        if is_teardown_message(msg) {
            return MessageOutcome::NotHandled;
        }
        if !geometry::is_valid_window(platform, self.hwnd, false, true) {
            log::trace!("[Router] {} is no longer a usable window; skipping 0x{msg:04X}", self.hwnd);
            return MessageOutcome::NotHandled;
        }

        let outcome = handle_snap_layout(
            &mut self.snap,
            platform,
            &self.layout,
            self.hwnd,
            msg,
            wparam,
            lparam,
        );
        if outcome.is_handled() {
            return outcome;
        }

        match msg {
            WM_NCHITTEST => {
                let Some(code) =
                    handle_nc_hit_test(platform, caps, config, &self.layout, self.hwnd, lparam)
                else {
                    return MessageOutcome::NotHandled;
                };
                self.snap = self
                    .snap
                    .transition(SnapInput::HitTestAnswered {
                        part: classify_hit_test(code),
                    })
                    .next;
                MessageOutcome::Handled(LResult(code as isize))
            }
            // SAFETY: forwarded from the caller's contract.
            WM_NCCALCSIZE => unsafe {
                handle_nc_calc_size(platform, caps, config, self.hwnd, wparam, lparam)
            },
            _ => MessageOutcome::NotHandled,
        }
    }
}
