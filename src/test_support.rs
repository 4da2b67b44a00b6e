/*
 * Scripted `Platform` and `WindowItemDelegate` implementations used by the
 * unit tests. Every OS side effect the handlers can trigger is recorded so
 * tests can assert on posted messages, leave-tracking requests and default
 * processing without a real message queue.
 */
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::context::WindowItemDelegate;
use crate::messages::WM_NCCALCSIZE;
use crate::platform::{Capabilities, MonitorInfo, OsVersion, Platform, WindowSnapshot};
use crate::types::{
    ItemId, LParam, LResult, NativePoint, NativeRect, Rect, ScreenEdge, WParam, WindowHandle,
};

pub(crate) fn modern_caps() -> Capabilities {
    Capabilities {
        os_version: OsVersion {
            major: 10,
            minor: 0,
            build: 22631,
        },
        has_dpi_for_window: true,
        has_system_metrics_for_dpi: true,
        has_dpi_for_monitor: true,
    }
}

pub(crate) fn legacy_caps() -> Capabilities {
    Capabilities {
        os_version: OsVersion {
            major: 6,
            minor: 1,
            build: 7601,
        },
        has_dpi_for_window: false,
        has_system_metrics_for_dpi: false,
        has_dpi_for_monitor: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostedMessage {
    pub hwnd: WindowHandle,
    pub msg: u32,
    pub wparam: WParam,
    pub lparam: LParam,
}

pub(crate) struct MockPlatform {
    snapshot: Cell<Option<WindowSnapshot>>,
    window_rect: Cell<Option<NativeRect>>,
    maximized: Cell<bool>,
    monitor: Cell<Option<MonitorInfo>>,
    dpi_for_window: Cell<Option<u32>>,
    dpi_for_monitor: Cell<Option<u32>>,
    screen_dpi: Cell<u32>,
    metrics: RefCell<HashMap<i32, i32>>,
    metrics_for_dpi: RefCell<HashMap<(i32, u32), i32>>,
    taskbar_auto_hide: Cell<bool>,
    auto_hide_edge: Cell<Option<ScreenEdge>>,
    tray_edge: Cell<Option<ScreenEdge>>,
    message_pos: Cell<NativePoint>,
    client_origin: Cell<NativePoint>,
    keys_down: RefCell<HashSet<i32>>,
    default_frame: Cell<NativeRect>,
    default_proc_result: Cell<LResult>,
    calc_rect: Cell<NativeRect>,
    pub posted: RefCell<Vec<PostedMessage>>,
    pub leave_requests: RefCell<Vec<WindowHandle>>,
    pub default_proc_calls: RefCell<Vec<u32>>,
    pub snapshot_queries: Cell<usize>,
}

impl MockPlatform {
    pub(crate) fn new() -> Self {
        let rect = NativeRect::new(100, 100, 900, 700);
        Self {
            snapshot: Cell::new(Some(WindowSnapshot {
                style: 0,
                ex_style: 0,
                rect,
                visible: true,
                top_level: true,
            })),
            window_rect: Cell::new(Some(rect)),
            maximized: Cell::new(false),
            monitor: Cell::new(Some(MonitorInfo {
                monitor: NativeRect::new(0, 0, 1920, 1080),
                work: NativeRect::new(0, 0, 1920, 1040),
            })),
            dpi_for_window: Cell::new(None),
            dpi_for_monitor: Cell::new(None),
            screen_dpi: Cell::new(96),
            metrics: RefCell::new(HashMap::new()),
            metrics_for_dpi: RefCell::new(HashMap::new()),
            taskbar_auto_hide: Cell::new(false),
            auto_hide_edge: Cell::new(None),
            tray_edge: Cell::new(None),
            message_pos: Cell::new(NativePoint::default()),
            client_origin: Cell::new(NativePoint { x: 100, y: 100 }),
            keys_down: RefCell::new(HashSet::new()),
            // Insets the "system" applies when asked for the default frame.
            default_frame: Cell::new(NativeRect::new(8, 31, 8, 8)),
            default_proc_result: Cell::new(LResult(0)),
            calc_rect: Cell::new(NativeRect::default()),
            posted: RefCell::new(Vec::new()),
            leave_requests: RefCell::new(Vec::new()),
            default_proc_calls: RefCell::new(Vec::new()),
            snapshot_queries: Cell::new(0),
        }
    }

    pub(crate) fn set_snapshot(&self, snapshot: Option<WindowSnapshot>) {
        self.snapshot.set(snapshot);
    }

    pub(crate) fn set_window_rect(&self, rect: NativeRect) {
        self.window_rect.set(Some(rect));
        if let Some(snapshot) = self.snapshot.get() {
            self.snapshot.set(Some(WindowSnapshot { rect, ..snapshot }));
        }
    }

    pub(crate) fn set_maximized(&self, maximized: bool) {
        self.maximized.set(maximized);
    }

    pub(crate) fn set_monitor(&self, info: MonitorInfo) {
        self.monitor.set(Some(info));
    }

    pub(crate) fn set_dpi_for_window(&self, dpi: Option<u32>) {
        self.dpi_for_window.set(dpi);
    }

    pub(crate) fn set_dpi_for_monitor(&self, dpi: Option<u32>) {
        self.dpi_for_monitor.set(dpi);
    }

    pub(crate) fn set_screen_dpi(&self, dpi: u32) {
        self.screen_dpi.set(dpi);
    }

    pub(crate) fn set_metric(&self, index: i32, value: i32) {
        self.metrics.borrow_mut().insert(index, value);
    }

    pub(crate) fn set_metric_for_dpi(&self, index: i32, dpi: u32, value: i32) {
        self.metrics_for_dpi.borrow_mut().insert((index, dpi), value);
    }

    pub(crate) fn set_taskbar_auto_hide(&self, auto_hide: bool) {
        self.taskbar_auto_hide.set(auto_hide);
    }

    pub(crate) fn set_auto_hide_edge(&self, edge: Option<ScreenEdge>) {
        self.auto_hide_edge.set(edge);
    }

    pub(crate) fn set_tray_edge(&self, edge: Option<ScreenEdge>) {
        self.tray_edge.set(edge);
    }

    pub(crate) fn set_message_pos(&self, point: NativePoint) {
        self.message_pos.set(point);
    }

    pub(crate) fn set_client_origin(&self, origin: NativePoint) {
        self.client_origin.set(origin);
    }

    pub(crate) fn press_key(&self, virtual_key: i32) {
        self.keys_down.borrow_mut().insert(virtual_key);
    }

    pub(crate) fn set_default_proc_result(&self, result: LResult) {
        self.default_proc_result.set(result);
    }

    pub(crate) fn set_calc_rect(&self, rect: NativeRect) {
        self.calc_rect.set(rect);
    }

    pub(crate) fn calc_rect(&self) -> NativeRect {
        self.calc_rect.get()
    }

    pub(crate) fn posted_messages(&self) -> Vec<PostedMessage> {
        self.posted.borrow().clone()
    }

    pub(crate) fn posted_count(&self, msg: u32) -> usize {
        self.posted.borrow().iter().filter(|m| m.msg == msg).count()
    }
}

impl Platform for MockPlatform {
    fn window_snapshot(&self, _hwnd: WindowHandle) -> Option<WindowSnapshot> {
        self.snapshot_queries.set(self.snapshot_queries.get() + 1);
        self.snapshot.get()
    }

    fn window_rect(&self, _hwnd: WindowHandle) -> Option<NativeRect> {
        self.window_rect.get()
    }

    fn is_maximized(&self, _hwnd: WindowHandle) -> bool {
        self.maximized.get()
    }

    fn nearest_monitor(&self, _hwnd: WindowHandle) -> Option<MonitorInfo> {
        self.monitor.get()
    }

    fn dpi_for_window(&self, _hwnd: WindowHandle) -> Option<u32> {
        self.dpi_for_window.get()
    }

    fn dpi_for_monitor(&self, _hwnd: WindowHandle) -> Option<u32> {
        self.dpi_for_monitor.get()
    }

    fn screen_dpi(&self) -> u32 {
        self.screen_dpi.get()
    }

    fn system_metric(&self, index: i32) -> i32 {
        self.metrics.borrow().get(&index).copied().unwrap_or(0)
    }

    fn system_metric_for_dpi(&self, index: i32, dpi: u32) -> Option<i32> {
        self.metrics_for_dpi.borrow().get(&(index, dpi)).copied()
    }

    fn is_taskbar_auto_hide(&self) -> bool {
        self.taskbar_auto_hide.get()
    }

    fn has_auto_hide_bar_on_edge(&self, edge: ScreenEdge, _monitor: NativeRect) -> bool {
        self.auto_hide_edge.get() == Some(edge)
    }

    fn tray_taskbar_edge(&self, _hwnd: WindowHandle) -> Option<ScreenEdge> {
        self.tray_edge.get()
    }

    fn message_pos(&self) -> NativePoint {
        self.message_pos.get()
    }

    fn screen_to_client(&self, _hwnd: WindowHandle, point: NativePoint) -> Option<NativePoint> {
        let origin = self.client_origin.get();
        Some(NativePoint {
            x: point.x - origin.x,
            y: point.y - origin.y,
        })
    }

    fn is_key_down(&self, virtual_key: i32) -> bool {
        self.keys_down.borrow().contains(&virtual_key)
    }

    fn post_message(&self, hwnd: WindowHandle, msg: u32, wparam: WParam, lparam: LParam) -> bool {
        self.posted.borrow_mut().push(PostedMessage {
            hwnd,
            msg,
            wparam,
            lparam,
        });
        true
    }

    fn track_client_mouse_leave(&self, hwnd: WindowHandle) -> bool {
        self.leave_requests.borrow_mut().push(hwnd);
        true
    }

    fn default_window_proc(
        &self,
        _hwnd: WindowHandle,
        msg: u32,
        _wparam: WParam,
        _lparam: LParam,
    ) -> LResult {
        self.default_proc_calls.borrow_mut().push(msg);
        if msg == WM_NCCALCSIZE {
            let frame = self.default_frame.get();
            let mut rect = self.calc_rect.get();
            rect.left += frame.left;
            rect.top += frame.top;
            rect.right -= frame.right;
            rect.bottom -= frame.bottom;
            self.calc_rect.set(rect);
        }
        self.default_proc_result.get()
    }

    unsafe fn read_calc_size_rect(&self, _wparam: WParam, _lparam: LParam) -> Option<NativeRect> {
        Some(self.calc_rect.get())
    }

    unsafe fn write_calc_size_rect(&self, _wparam: WParam, _lparam: LParam, rect: NativeRect) {
        self.calc_rect.set(rect);
    }
}

#[derive(Default)]
pub(crate) struct MockDelegate {
    geometries: RefCell<HashMap<ItemId, Rect>>,
    hidden: RefCell<HashSet<ItemId>>,
    grabbed: Cell<bool>,
    pub reset_calls: Cell<usize>,
}

impl MockDelegate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn place(&self, item: ItemId, rect: Rect) {
        self.geometries.borrow_mut().insert(item, rect);
    }

    pub(crate) fn hide(&self, item: ItemId) {
        self.hidden.borrow_mut().insert(item);
    }

    pub(crate) fn grab(&self) {
        self.grabbed.set(true);
    }

    pub(crate) fn is_grabbed(&self) -> bool {
        self.grabbed.get()
    }
}

impl WindowItemDelegate for MockDelegate {
    fn item_geometry(&self, item: ItemId) -> Option<Rect> {
        self.geometries.borrow().get(&item).copied()
    }

    fn is_item_visible(&self, item: ItemId) -> bool {
        !self.hidden.borrow().contains(&item)
    }

    fn reset_grabbed_control(&self) -> bool {
        self.reset_calls.set(self.reset_calls.get() + 1);
        self.grabbed.replace(false)
    }
}
