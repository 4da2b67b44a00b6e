/*
 * Shared value types for the frameless-window layer.
 *
 * Two geometry families live here: the `Native*` structs are `#[repr(C)]`
 * mirrors of Win32 POINT/SIZE/RECT (exclusive right/bottom edges) so they can
 * be copied bit-for-bit into the buffers the OS hands to window procedures,
 * and the toolkit-facing `Point`/`Size`/`Rect` use origin + extent, which is
 * what widget layers report. Conversions between the two are lossless.
 */
use std::fmt;

/// Opaque native window handle. Stable for the lifetime of the window.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as usize)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WParam(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LParam(pub isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LResult(pub isize);

/// What the interception layer decided about one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageOutcome {
    #[default]
    NotHandled,
    Handled(LResult),
}

impl MessageOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, MessageOutcome::Handled(_))
    }

    pub fn result(self) -> Option<LResult> {
        match self {
            MessageOutcome::Handled(result) => Some(result),
            MessageOutcome::NotHandled => None,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativePoint {
    pub x: i32,
    pub y: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeSize {
    pub cx: i32,
    pub cy: i32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl NativeRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True for zero-area or inverted rectangles.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn contains(&self, point: NativePoint) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    pub fn size(&self) -> NativeSize {
        NativeSize {
            cx: self.width(),
            cy: self.height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle is valid when it has a positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

impl From<NativePoint> for Point {
    fn from(p: NativePoint) -> Self {
        Point { x: p.x, y: p.y }
    }
}

impl From<Point> for NativePoint {
    fn from(p: Point) -> Self {
        NativePoint { x: p.x, y: p.y }
    }
}

impl From<NativeSize> for Size {
    fn from(s: NativeSize) -> Self {
        Size {
            width: s.cx,
            height: s.cy,
        }
    }
}

impl From<Size> for NativeSize {
    fn from(s: Size) -> Self {
        NativeSize {
            cx: s.width,
            cy: s.height,
        }
    }
}

impl From<NativeRect> for Rect {
    fn from(r: NativeRect) -> Self {
        Rect {
            x: r.left,
            y: r.top,
            width: r.width(),
            height: r.height(),
        }
    }
}

impl From<Rect> for NativeRect {
    fn from(r: Rect) -> Self {
        NativeRect {
            left: r.x,
            top: r.y,
            right: r.x + r.width,
            bottom: r.y + r.height,
        }
    }
}

/// Identity of an interactive object owned by the widget layer. The value 0
/// is reserved as the null object and is rejected by every registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl ItemId {
    pub const NULL: ItemId = ItemId(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Caption buttons a custom title bar may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemButton {
    Unknown,
    WindowIcon,
    Help,
    Minimize,
    Maximize,
    Close,
}

impl SystemButton {
    /// Every button kind that can hold an object, in hit-test priority order.
    pub const ALL: [SystemButton; 5] = [
        SystemButton::WindowIcon,
        SystemButton::Help,
        SystemButton::Minimize,
        SystemButton::Maximize,
        SystemButton::Close,
    ];

    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            SystemButton::Unknown => None,
            SystemButton::WindowIcon => Some(0),
            SystemButton::Help => Some(1),
            SystemButton::Minimize => Some(2),
            SystemButton::Maximize => Some(3),
            SystemButton::Close => Some(4),
        }
    }
}

/// Semantic region of a window derived from a native hit-test code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowPart {
    #[default]
    Outside,
    ClientArea,
    ChromeButton,
    ResizeBorder,
    FixedBorder,
    TitleBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenEdge {
    Left,
    Top,
    Right,
    Bottom,
}

impl ScreenEdge {
    /// Probe order used when looking for an auto-hide taskbar.
    pub const PROBE_ORDER: [ScreenEdge; 4] = [
        ScreenEdge::Top,
        ScreenEdge::Bottom,
        ScreenEdge::Left,
        ScreenEdge::Right,
    ];
}
