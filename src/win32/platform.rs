/*
 * `Platform` over the real Win32 API.
 *
 * APIs missing from older Windows releases (per-window and per-monitor DPI,
 * DPI-scaled metrics) and the true OS version are resolved from their DLLs
 * once, when the adapter is constructed. `Win32Platform::capabilities`
 * reports what was found so the handlers can take the coarser fallback paths.
 */
use std::ffi::c_void;

use windows::Win32::{
    Foundation::{GetLastError, HWND, LPARAM, POINT, RECT, WPARAM},
    Graphics::Gdi::{
        GetDC, GetDeviceCaps, GetMonitorInfoW, HMONITOR, LOGPIXELSX, MONITOR_DEFAULTTONEAREST,
        MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromWindow, ReleaseDC, ScreenToClient,
    },
    System::{
        LibraryLoader::{GetProcAddress, LoadLibraryW},
        SystemInformation::OSVERSIONINFOW,
    },
    UI::{
        Input::KeyboardAndMouse::{GetAsyncKeyState, TME_LEAVE, TRACKMOUSEEVENT, TrackMouseEvent},
        Shell::{
            ABE_BOTTOM, ABE_LEFT, ABE_RIGHT, ABE_TOP, ABM_GETAUTOHIDEBAREX, ABM_GETSTATE,
            ABM_GETTASKBARPOS, ABS_AUTOHIDE, APPBARDATA, SHAppBarMessage,
        },
        WindowsAndMessaging::{
            DefWindowProcW, FindWindowW, GA_ROOT, GWL_EXSTYLE, GWL_STYLE, GetAncestor,
            GetMessagePos, GetSystemMetrics, GetWindowLongPtrW, GetWindowRect, IsWindowVisible,
            IsZoomed, NCCALCSIZE_PARAMS, PostMessageW, SYSTEM_METRICS_INDEX,
        },
    },
};
use windows::core::{HRESULT, PCSTR, PCWSTR, s, w};

use crate::messages::{USER_DEFAULT_SCREEN_DPI, point_from_message_pos};
use crate::platform::{Capabilities, MonitorInfo, OsVersion, Platform, WindowSnapshot};
use crate::types::{LParam, LResult, NativePoint, NativeRect, ScreenEdge, WParam, WindowHandle};

type GetDpiForWindowFn = unsafe extern "system" fn(HWND) -> u32;
type GetSystemMetricsForDpiFn = unsafe extern "system" fn(i32, u32) -> i32;
type GetDpiForMonitorFn = unsafe extern "system" fn(HMONITOR, i32, *mut u32, *mut u32) -> HRESULT;
type RtlGetVersionFn = unsafe extern "system" fn(*mut OSVERSIONINFOW) -> i32;

const MDT_EFFECTIVE_DPI: i32 = 0;

pub(crate) fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

impl From<HWND> for WindowHandle {
    fn from(hwnd: HWND) -> Self {
        WindowHandle(hwnd.0 as isize)
    }
}

fn native_rect(rect: RECT) -> NativeRect {
    NativeRect::new(rect.left, rect.top, rect.right, rect.bottom)
}

fn win32_rect(rect: NativeRect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

fn appbar_edge(edge: ScreenEdge) -> u32 {
    match edge {
        ScreenEdge::Left => ABE_LEFT,
        ScreenEdge::Top => ABE_TOP,
        ScreenEdge::Right => ABE_RIGHT,
        ScreenEdge::Bottom => ABE_BOTTOM,
    }
}

fn screen_edge(appbar_edge: u32) -> Option<ScreenEdge> {
    match appbar_edge {
        ABE_LEFT => Some(ScreenEdge::Left),
        ABE_TOP => Some(ScreenEdge::Top),
        ABE_RIGHT => Some(ScreenEdge::Right),
        ABE_BOTTOM => Some(ScreenEdge::Bottom),
        _ => None,
    }
}

fn appbar_data() -> APPBARDATA {
    APPBARDATA {
        cbSize: std::mem::size_of::<APPBARDATA>() as u32,
        ..Default::default()
    }
}

fn resolve_proc(library: PCWSTR, name: PCSTR) -> Option<*const c_void> {
    let module = match unsafe { LoadLibraryW(library) } {
        Ok(module) => module,
        Err(err) => {
            log::debug!("[Win32] Library unavailable: {err:?}");
            return None;
        }
    };
    unsafe { GetProcAddress(module, name) }.map(|func| func as *const c_void)
}

/// RtlGetVersion reports the real version regardless of the application
/// manifest, unlike GetVersionEx.
fn query_os_version() -> OsVersion {
    let Some(ptr) = resolve_proc(w!("ntdll.dll"), s!("RtlGetVersion")) else {
        log::warn!("[Win32] RtlGetVersion unavailable; assuming legacy Windows");
        return OsVersion::default();
    };
    let rtl_get_version = unsafe { std::mem::transmute::<*const c_void, RtlGetVersionFn>(ptr) };
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    if unsafe { rtl_get_version(&mut info) } != 0 {
        log::warn!("[Win32] RtlGetVersion failed; assuming legacy Windows");
        return OsVersion::default();
    }
    OsVersion {
        major: info.dwMajorVersion,
        minor: info.dwMinorVersion,
        build: info.dwBuildNumber,
    }
}

pub struct Win32Platform {
    os_version: OsVersion,
    get_dpi_for_window: Option<GetDpiForWindowFn>,
    get_system_metrics_for_dpi: Option<GetSystemMetricsForDpiFn>,
    get_dpi_for_monitor: Option<GetDpiForMonitorFn>,
}

impl std::fmt::Debug for Win32Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Win32Platform")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl Win32Platform {
    pub fn new() -> Self {
        let platform = unsafe {
            Self {
                os_version: query_os_version(),
                get_dpi_for_window: resolve_proc(w!("user32.dll"), s!("GetDpiForWindow"))
                    .map(|ptr| std::mem::transmute::<*const c_void, GetDpiForWindowFn>(ptr)),
                get_system_metrics_for_dpi: resolve_proc(
                    w!("user32.dll"),
                    s!("GetSystemMetricsForDpi"),
                )
                .map(|ptr| std::mem::transmute::<*const c_void, GetSystemMetricsForDpiFn>(ptr)),
                get_dpi_for_monitor: resolve_proc(w!("shcore.dll"), s!("GetDpiForMonitor"))
                    .map(|ptr| std::mem::transmute::<*const c_void, GetDpiForMonitorFn>(ptr)),
            }
        };
        log::debug!("[Win32] Detected {:?}", platform.capabilities());
        platform
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            os_version: self.os_version,
            has_dpi_for_window: self.get_dpi_for_window.is_some(),
            has_system_metrics_for_dpi: self.get_system_metrics_for_dpi.is_some(),
            has_dpi_for_monitor: self.get_dpi_for_monitor.is_some(),
        }
    }
}

impl Default for Win32Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Win32Platform {
    fn window_snapshot(&self, hwnd: WindowHandle) -> Option<WindowSnapshot> {
        let rect = self.window_rect(hwnd)?;
        let hwnd = to_hwnd(hwnd);
        unsafe {
            Some(WindowSnapshot {
                style: GetWindowLongPtrW(hwnd, GWL_STYLE) as u32,
                ex_style: GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32,
                rect,
                visible: IsWindowVisible(hwnd).as_bool(),
                top_level: GetAncestor(hwnd, GA_ROOT) == hwnd,
            })
        }
    }

    fn window_rect(&self, hwnd: WindowHandle) -> Option<NativeRect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(to_hwnd(hwnd), &mut rect) }.ok()?;
        Some(native_rect(rect))
    }

    fn is_maximized(&self, hwnd: WindowHandle) -> bool {
        unsafe { IsZoomed(to_hwnd(hwnd)) }.as_bool()
    }

    fn nearest_monitor(&self, hwnd: WindowHandle) -> Option<MonitorInfo> {
        let monitor = unsafe { MonitorFromWindow(to_hwnd(hwnd), MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            log::warn!("[Win32] No monitor for {hwnd}");
            return None;
        }
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            log::warn!("[Win32] GetMonitorInfoW failed for {hwnd}: {:?}", unsafe {
                GetLastError()
            });
            return None;
        }
        Some(MonitorInfo {
            monitor: native_rect(info.rcMonitor),
            work: native_rect(info.rcWork),
        })
    }

    fn dpi_for_window(&self, hwnd: WindowHandle) -> Option<u32> {
        let get_dpi_for_window = self.get_dpi_for_window?;
        let dpi = unsafe { get_dpi_for_window(to_hwnd(hwnd)) };
        (dpi != 0).then_some(dpi)
    }

    fn dpi_for_monitor(&self, hwnd: WindowHandle) -> Option<u32> {
        let get_dpi_for_monitor = self.get_dpi_for_monitor?;
        let monitor = unsafe { MonitorFromWindow(to_hwnd(hwnd), MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            return None;
        }
        let (mut dpi_x, mut dpi_y) = (0u32, 0u32);
        let hr = unsafe { get_dpi_for_monitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y) };
        (hr.is_ok() && dpi_x != 0).then_some(dpi_x)
    }

    fn screen_dpi(&self) -> u32 {
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            return USER_DEFAULT_SCREEN_DPI;
        }
        let dpi = unsafe { GetDeviceCaps(Some(hdc), LOGPIXELSX) };
        unsafe { ReleaseDC(None, hdc) };
        u32::try_from(dpi)
            .ok()
            .filter(|dpi| *dpi != 0)
            .unwrap_or(USER_DEFAULT_SCREEN_DPI)
    }

    fn system_metric(&self, index: i32) -> i32 {
        unsafe { GetSystemMetrics(SYSTEM_METRICS_INDEX(index)) }
    }

    fn system_metric_for_dpi(&self, index: i32, dpi: u32) -> Option<i32> {
        let get_system_metrics_for_dpi = self.get_system_metrics_for_dpi?;
        Some(unsafe { get_system_metrics_for_dpi(index, dpi) })
    }

    fn is_taskbar_auto_hide(&self) -> bool {
        let mut data = appbar_data();
        let state = unsafe { SHAppBarMessage(ABM_GETSTATE, &mut data) };
        state & (ABS_AUTOHIDE as usize) != 0
    }

    fn has_auto_hide_bar_on_edge(&self, edge: ScreenEdge, monitor: NativeRect) -> bool {
        let mut data = APPBARDATA {
            uEdge: appbar_edge(edge),
            rc: win32_rect(monitor),
            ..appbar_data()
        };
        unsafe { SHAppBarMessage(ABM_GETAUTOHIDEBAREX, &mut data) != 0 }
    }

    fn tray_taskbar_edge(&self, hwnd: WindowHandle) -> Option<ScreenEdge> {
        let tray = unsafe { FindWindowW(w!("Shell_TrayWnd"), PCWSTR::null()) }.ok()?;
        let window_monitor = unsafe { MonitorFromWindow(to_hwnd(hwnd), MONITOR_DEFAULTTONEAREST) };
        let taskbar_monitor = unsafe { MonitorFromWindow(tray, MONITOR_DEFAULTTOPRIMARY) };
        if window_monitor != taskbar_monitor {
            return None;
        }
        let mut data = APPBARDATA {
            hWnd: tray,
            ..appbar_data()
        };
        if unsafe { SHAppBarMessage(ABM_GETTASKBARPOS, &mut data) } == 0 {
            return None;
        }
        screen_edge(data.uEdge)
    }

    fn message_pos(&self) -> NativePoint {
        let (x, y) = point_from_message_pos(unsafe { GetMessagePos() });
        NativePoint { x, y }
    }

    fn screen_to_client(&self, hwnd: WindowHandle, point: NativePoint) -> Option<NativePoint> {
        let mut pt = POINT {
            x: point.x,
            y: point.y,
        };
        if !unsafe { ScreenToClient(to_hwnd(hwnd), &mut pt) }.as_bool() {
            return None;
        }
        Some(NativePoint { x: pt.x, y: pt.y })
    }

    fn is_key_down(&self, virtual_key: i32) -> bool {
        unsafe { GetAsyncKeyState(virtual_key) } < 0
    }

    fn post_message(&self, hwnd: WindowHandle, msg: u32, wparam: WParam, lparam: LParam) -> bool {
        unsafe {
            PostMessageW(
                Some(to_hwnd(hwnd)),
                msg,
                WPARAM(wparam.0),
                LPARAM(lparam.0),
            )
        }
        .is_ok()
    }

    fn track_client_mouse_leave(&self, hwnd: WindowHandle) -> bool {
        let mut tme = TRACKMOUSEEVENT {
            cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_LEAVE,
            hwndTrack: to_hwnd(hwnd),
            dwHoverTime: 0,
        };
        unsafe { TrackMouseEvent(&mut tme) }.is_ok()
    }

    fn default_window_proc(
        &self,
        hwnd: WindowHandle,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        let result =
            unsafe { DefWindowProcW(to_hwnd(hwnd), msg, WPARAM(wparam.0), LPARAM(lparam.0)) };
        LResult(result.0)
    }

    unsafe fn read_calc_size_rect(&self, wparam: WParam, lparam: LParam) -> Option<NativeRect> {
        if lparam.0 == 0 {
            return None;
        }
        // wParam FALSE: lParam is a RECT; TRUE: NCCALCSIZE_PARAMS whose first
        // rectangle is the proposed window rectangle.
        let rect = unsafe {
            if wparam.0 == 0 {
                *(lparam.0 as *const RECT)
            } else {
                (*(lparam.0 as *const NCCALCSIZE_PARAMS)).rgrc[0]
            }
        };
        Some(native_rect(rect))
    }

    unsafe fn write_calc_size_rect(&self, wparam: WParam, lparam: LParam, rect: NativeRect) {
        if lparam.0 == 0 {
            return;
        }
        unsafe {
            if wparam.0 == 0 {
                *(lparam.0 as *mut RECT) = win32_rect(rect);
            } else {
                (*(lparam.0 as *mut NCCALCSIZE_PARAMS)).rgrc[0] = win32_rect(rect);
            }
        }
    }
}
