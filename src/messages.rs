/*
 * Native window-message vocabulary used by the interception layer. The values
 * are the Win32 wire values, declared here so the portable state machines can
 * be exercised on any host; the Win32 adapter checks them against the
 * `windows` crate in its own tests.
 */
use crate::types::{LParam, WParam};

// Lifecycle
pub const WM_DESTROY: u32 = 0x0002;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_NCDESTROY: u32 = 0x0082;
pub const WM_NCCALCSIZE: u32 = 0x0083;
pub const WM_NCHITTEST: u32 = 0x0084;

// Undocumented teardown notifications.
pub const WM_UAHDESTROYWINDOW: u32 = 0x0090;
pub const WM_UNREGISTER_WINDOW_SERVICES: u32 = 0x0272;

// Non-client mouse
pub const WM_NCMOUSEMOVE: u32 = 0x00A0;
pub const WM_NCLBUTTONDOWN: u32 = 0x00A1;
pub const WM_NCLBUTTONUP: u32 = 0x00A2;
pub const WM_NCLBUTTONDBLCLK: u32 = 0x00A3;
pub const WM_NCRBUTTONDOWN: u32 = 0x00A4;
pub const WM_NCRBUTTONUP: u32 = 0x00A5;
pub const WM_NCRBUTTONDBLCLK: u32 = 0x00A6;
pub const WM_NCMBUTTONDOWN: u32 = 0x00A7;
pub const WM_NCMBUTTONUP: u32 = 0x00A8;
pub const WM_NCMBUTTONDBLCLK: u32 = 0x00A9;
pub const WM_NCXBUTTONDOWN: u32 = 0x00AB;
pub const WM_NCXBUTTONUP: u32 = 0x00AC;
pub const WM_NCXBUTTONDBLCLK: u32 = 0x00AD;
pub const WM_NCMOUSEHOVER: u32 = 0x02A0;
pub const WM_NCMOUSELEAVE: u32 = 0x02A2;

// Client mouse
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_XBUTTONDBLCLK: u32 = 0x020D;
pub const WM_MOUSEHOVER: u32 = 0x02A1;
pub const WM_MOUSELEAVE: u32 = 0x02A3;

// Hit-test codes
pub const HTERROR: i32 = -2;
pub const HTTRANSPARENT: i32 = -1;
pub const HTNOWHERE: i32 = 0;
pub const HTCLIENT: i32 = 1;
pub const HTCAPTION: i32 = 2;
pub const HTSYSMENU: i32 = 3;
pub const HTGROWBOX: i32 = 4;
pub const HTMENU: i32 = 5;
pub const HTREDUCE: i32 = 8;
pub const HTZOOM: i32 = 9;
pub const HTLEFT: i32 = 10;
pub const HTRIGHT: i32 = 11;
pub const HTTOP: i32 = 12;
pub const HTTOPLEFT: i32 = 13;
pub const HTTOPRIGHT: i32 = 14;
pub const HTBOTTOM: i32 = 15;
pub const HTBOTTOMLEFT: i32 = 16;
pub const HTBOTTOMRIGHT: i32 = 17;
pub const HTBORDER: i32 = 18;
pub const HTCLOSE: i32 = 20;
pub const HTHELP: i32 = 21;

// Modifier-key mask bits carried in mouse message wParams.
pub const MK_LBUTTON: usize = 0x0001;
pub const MK_RBUTTON: usize = 0x0002;
pub const MK_SHIFT: usize = 0x0004;
pub const MK_CONTROL: usize = 0x0008;
pub const MK_MBUTTON: usize = 0x0010;
pub const MK_XBUTTON1: usize = 0x0020;
pub const MK_XBUTTON2: usize = 0x0040;

// Virtual keys polled to rebuild the modifier mask.
pub const VK_LBUTTON: i32 = 0x01;
pub const VK_RBUTTON: i32 = 0x02;
pub const VK_MBUTTON: i32 = 0x04;
pub const VK_XBUTTON1: i32 = 0x05;
pub const VK_XBUTTON2: i32 = 0x06;
pub const VK_SHIFT: i32 = 0x10;
pub const VK_CONTROL: i32 = 0x11;

// System metrics
pub const SM_SWAPBUTTON: i32 = 23;
pub const SM_CXSIZEFRAME: i32 = 32;
pub const SM_CXPADDEDBORDER: i32 = 92;

// Window styles
pub const WS_DISABLED: u32 = 0x0800_0000;
pub const WS_EX_TOOLWINDOW: u32 = 0x0000_0080;

/// WM_NCCALCSIZE return value asking the system to redraw the whole window.
pub const WVR_REDRAW: isize = 0x0300;

pub const USER_DEFAULT_SCREEN_DPI: u32 = 96;

/// wParam stamped on leave messages this layer posts, so they can be told
/// apart from the ones the system generates.
pub const SYNTHETIC_MESSAGE_TAG: WParam = WParam(0x97CC_EA99);

#[inline]
pub fn is_tagged_message(wparam: WParam) -> bool {
    wparam == SYNTHETIC_MESSAGE_TAG
}

#[inline]
pub(crate) fn loword_from_wparam(wparam: WParam) -> u16 {
    (wparam.0 & 0xFFFF) as u16
}

#[inline]
pub(crate) fn hiword_from_wparam(wparam: WParam) -> u16 {
    ((wparam.0 >> 16) & 0xFFFF) as u16
}

/// Signed x coordinate packed into the low word (GET_X_LPARAM).
#[inline]
pub(crate) fn x_from_lparam(lparam: LParam) -> i32 {
    (lparam.0 & 0xFFFF) as u16 as i16 as i32
}

/// Signed y coordinate packed into the high word (GET_Y_LPARAM).
#[inline]
pub(crate) fn y_from_lparam(lparam: LParam) -> i32 {
    ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32
}

#[inline]
pub(crate) fn make_lparam(low: i32, high: i32) -> LParam {
    LParam((((low as u32) & 0xFFFF) | (((high as u32) & 0xFFFF) << 16)) as isize)
}

#[inline]
pub(crate) fn make_wparam(low: usize, high: usize) -> WParam {
    WParam((low & 0xFFFF) | ((high & 0xFFFF) << 16))
}

/// Screen position packed by GetMessagePos (same layout as a mouse lParam).
#[inline]
pub(crate) fn point_from_message_pos(pos: u32) -> (i32, i32) {
    let lparam = LParam(pos as isize);
    (x_from_lparam(lparam), y_from_lparam(lparam))
}

/// Hit-test code carried by a non-client mouse message. X-button messages
/// share the wParam with the button id, so only the low word is read.
#[inline]
pub(crate) fn hit_test_code_from_wparam(wparam: WParam) -> i32 {
    loword_from_wparam(wparam) as i16 as i32
}

/// Whether `msg` is one of the non-client mouse messages whose client-area
/// twin can be emulated.
pub(crate) fn is_non_client_mouse_message(msg: u32) -> bool {
    matches!(
        msg,
        WM_NCMOUSEMOVE
            | WM_NCLBUTTONDOWN
            | WM_NCLBUTTONUP
            | WM_NCLBUTTONDBLCLK
            | WM_NCRBUTTONDOWN
            | WM_NCRBUTTONUP
            | WM_NCRBUTTONDBLCLK
            | WM_NCMBUTTONDOWN
            | WM_NCMBUTTONUP
            | WM_NCMBUTTONDBLCLK
            | WM_NCXBUTTONDOWN
            | WM_NCXBUTTONUP
            | WM_NCXBUTTONDBLCLK
            | WM_NCMOUSEHOVER
    )
}

#[inline]
pub(crate) fn is_non_client_xbutton_message(msg: u32) -> bool {
    (WM_NCXBUTTONDOWN..=WM_NCXBUTTONDBLCLK).contains(&msg)
}

/// Messages that arrive while a window is being torn down. Touching window
/// state for any of them can crash the host, so they bypass all handlers.
pub(crate) fn is_teardown_message(msg: u32) -> bool {
    matches!(
        msg,
        WM_CLOSE | WM_DESTROY | WM_NCDESTROY | WM_UAHDESTROYWINDOW | WM_UNREGISTER_WINDOW_SERVICES
    )
}
