/*
 * Per-window chrome configuration consulted by the hit-test and snap-layout
 * handlers. `ChromeLayout` only stores identities; where an item actually sits
 * and whether it is shown is answered by the widget layer through
 * `WindowItemDelegate`, so the layout never goes stale when widgets move.
 */
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{ItemId, Point, Rect, SystemButton};

/// Widget-layer services the core needs. Geometry is in client coordinates,
/// device pixels.
pub trait WindowItemDelegate {
    fn item_geometry(&self, item: ItemId) -> Option<Rect>;

    fn is_item_visible(&self, item: ItemId) -> bool;

    /// Drop any control currently holding exclusive pointer capture. Returns
    /// whether something was released.
    fn reset_grabbed_control(&self) -> bool;
}

pub struct ChromeLayout {
    delegate: Rc<dyn WindowItemDelegate>,
    hit_test_visible_items: HashSet<ItemId>,
    hit_test_visible_rects: Vec<Rect>,
    system_buttons: [Option<ItemId>; SystemButton::ALL.len()],
    title_bar: Option<ItemId>,
}

impl std::fmt::Debug for ChromeLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeLayout")
            .field("hit_test_visible_items", &self.hit_test_visible_items)
            .field("hit_test_visible_rects", &self.hit_test_visible_rects)
            .field("system_buttons", &self.system_buttons)
            .field("title_bar", &self.title_bar)
            .finish_non_exhaustive()
    }
}

impl ChromeLayout {
    pub fn new(delegate: Rc<dyn WindowItemDelegate>) -> Self {
        Self {
            delegate,
            hit_test_visible_items: HashSet::new(),
            hit_test_visible_rects: Vec::new(),
            system_buttons: [None; SystemButton::ALL.len()],
            title_bar: None,
        }
    }

    pub fn delegate(&self) -> &dyn WindowItemDelegate {
        self.delegate.as_ref()
    }

    /// Marks an item painted inside the title bar as wanting ordinary client
    /// mouse input (or reverts that).
    pub fn set_hit_test_visible_item(&mut self, item: ItemId, visible: bool) -> PlatformResult<()> {
        if item.is_null() {
            return Err(PlatformError::InvalidArgument(
                "hit-test visible item must not be null".into(),
            ));
        }
        if visible {
            self.hit_test_visible_items.insert(item);
        } else {
            self.hit_test_visible_items.remove(&item);
        }
        Ok(())
    }

    /// Same as [`set_hit_test_visible_item`](Self::set_hit_test_visible_item)
    /// for a bare client rectangle. Removal drops every duplicate.
    pub fn set_hit_test_visible_rect(&mut self, rect: Rect, visible: bool) -> PlatformResult<()> {
        if !rect.is_valid() {
            return Err(PlatformError::InvalidArgument(format!(
                "hit-test visible rect {rect:?} has no area"
            )));
        }
        if visible {
            self.hit_test_visible_rects.push(rect);
        } else {
            self.hit_test_visible_rects.retain(|r| *r != rect);
        }
        Ok(())
    }

    /// Assigns the object acting as `button`. Returns `Ok(false)` when that
    /// object already held the slot.
    pub fn set_system_button(&mut self, button: SystemButton, item: ItemId) -> PlatformResult<bool> {
        if item.is_null() {
            return Err(PlatformError::InvalidArgument(
                "system button item must not be null".into(),
            ));
        }
        let Some(slot) = button.slot() else {
            return Err(PlatformError::InvalidArgument(
                "cannot assign an item to SystemButton::Unknown".into(),
            ));
        };
        if self.system_buttons[slot] == Some(item) {
            return Ok(false);
        }
        log::debug!("[Chrome] {button:?} button is now {item:?}");
        self.system_buttons[slot] = Some(item);
        Ok(true)
    }

    pub fn set_title_bar(&mut self, item: ItemId) -> PlatformResult<bool> {
        if item.is_null() {
            return Err(PlatformError::InvalidArgument(
                "title bar item must not be null".into(),
            ));
        }
        if self.title_bar == Some(item) {
            return Ok(false);
        }
        log::debug!("[Chrome] Title bar is now {item:?}");
        self.title_bar = Some(item);
        Ok(true)
    }

    pub fn system_button(&self, button: SystemButton) -> Option<ItemId> {
        button.slot().and_then(|slot| self.system_buttons[slot])
    }

    pub fn title_bar(&self) -> Option<ItemId> {
        self.title_bar
    }

    pub fn is_hit_test_visible(&self, item: ItemId) -> bool {
        self.hit_test_visible_items.contains(&item)
    }

    fn visible_geometry(&self, item: ItemId) -> Option<Rect> {
        if !self.delegate.is_item_visible(item) {
            return None;
        }
        self.delegate.item_geometry(item)
    }

    /// The system button under `pos` (client coordinates), if any.
    pub fn system_button_at(&self, pos: Point) -> Option<SystemButton> {
        SystemButton::ALL.into_iter().find(|button| {
            self.system_button(*button)
                .and_then(|item| self.visible_geometry(item))
                .is_some_and(|rect| rect.contains(pos))
        })
    }

    fn is_over_hit_test_visible(&self, pos: Point) -> bool {
        self.hit_test_visible_rects.iter().any(|r| r.contains(pos))
            || self
                .hit_test_visible_items
                .iter()
                .filter_map(|item| self.visible_geometry(*item))
                .any(|r| r.contains(pos))
    }

    /// True when `pos` lies on the title bar and nothing interactive covers it,
    /// i.e. dragging there should move the window.
    pub fn is_in_title_bar_draggable_area(&self, pos: Point) -> bool {
        let Some(title_rect) = self.title_bar.and_then(|item| self.visible_geometry(item)) else {
            return false;
        };
        title_rect.contains(pos)
            && self.system_button_at(pos).is_none()
            && !self.is_over_hit_test_visible(pos)
    }

    /// True when `pos` is over an explicitly interactive region.
    pub fn is_in_hit_test_visible_area(&self, pos: Point) -> bool {
        self.is_over_hit_test_visible(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockDelegate;

    const TITLE: ItemId = ItemId(1);
    const CLOSE: ItemId = ItemId(2);
    const MENU: ItemId = ItemId(3);

    fn layout_with(delegate: Rc<MockDelegate>) -> ChromeLayout {
        ChromeLayout::new(delegate)
    }

    #[test]
    fn reassigning_same_system_button_reports_no_change() {
        let mut layout = layout_with(Rc::new(MockDelegate::new()));
        assert!(matches!(
            layout.set_system_button(SystemButton::Close, CLOSE),
            Ok(true)
        ));
        assert!(matches!(
            layout.set_system_button(SystemButton::Close, CLOSE),
            Ok(false)
        ));
        assert_eq!(layout.system_button(SystemButton::Close), Some(CLOSE));
    }

    #[test]
    fn null_item_or_unknown_button_is_rejected() {
        let mut layout = layout_with(Rc::new(MockDelegate::new()));
        assert!(matches!(
            layout.set_system_button(SystemButton::Close, ItemId::NULL),
            Err(PlatformError::InvalidArgument(_))
        ));
        assert!(matches!(
            layout.set_system_button(SystemButton::Unknown, CLOSE),
            Err(PlatformError::InvalidArgument(_))
        ));
        assert!(layout.set_title_bar(ItemId::NULL).is_err());
        assert!(layout.set_hit_test_visible_item(ItemId::NULL, true).is_err());
        assert_eq!(layout.system_button(SystemButton::Close), None);
    }

    #[test]
    fn title_bar_reassignment_is_a_no_op() {
        let mut layout = layout_with(Rc::new(MockDelegate::new()));
        assert!(layout.set_title_bar(TITLE).unwrap());
        assert!(!layout.set_title_bar(TITLE).unwrap());
        assert!(layout.set_title_bar(ItemId(9)).unwrap());
        assert_eq!(layout.title_bar(), Some(ItemId(9)));
    }

    #[test]
    fn removing_a_rect_drops_all_duplicates() {
        let mut layout = layout_with(Rc::new(MockDelegate::new()));
        let rect = Rect::new(10, 0, 20, 20);
        layout.set_hit_test_visible_rect(rect, true).unwrap();
        layout.set_hit_test_visible_rect(rect, true).unwrap();
        assert!(layout.is_in_hit_test_visible_area(Point::new(15, 5)));

        layout.set_hit_test_visible_rect(rect, false).unwrap();
        assert!(!layout.is_in_hit_test_visible_area(Point::new(15, 5)));
    }

    #[test]
    fn invalid_rect_is_rejected() {
        let mut layout = layout_with(Rc::new(MockDelegate::new()));
        assert!(
            layout
                .set_hit_test_visible_rect(Rect::new(0, 0, 0, 5), true)
                .is_err()
        );
    }

    #[test]
    fn draggable_area_excludes_buttons_and_interactive_items() {
        let delegate = Rc::new(MockDelegate::new());
        delegate.place(TITLE, Rect::new(0, 0, 800, 32));
        delegate.place(CLOSE, Rect::new(754, 0, 46, 32));
        delegate.place(MENU, Rect::new(40, 0, 60, 32));
        let mut layout = layout_with(delegate);
        layout.set_title_bar(TITLE).unwrap();
        layout.set_system_button(SystemButton::Close, CLOSE).unwrap();
        layout.set_hit_test_visible_item(MENU, true).unwrap();

        assert!(layout.is_in_title_bar_draggable_area(Point::new(400, 10)));
        assert!(!layout.is_in_title_bar_draggable_area(Point::new(760, 10)));
        assert!(!layout.is_in_title_bar_draggable_area(Point::new(50, 10)));
        assert!(!layout.is_in_title_bar_draggable_area(Point::new(400, 40)));
        assert_eq!(
            layout.system_button_at(Point::new(760, 10)),
            Some(SystemButton::Close)
        );
    }

    #[test]
    fn hidden_buttons_are_not_hit() {
        let delegate = Rc::new(MockDelegate::new());
        delegate.place(CLOSE, Rect::new(754, 0, 46, 32));
        delegate.hide(CLOSE);
        let mut layout = layout_with(delegate);
        layout.set_system_button(SystemButton::Close, CLOSE).unwrap();

        assert_eq!(layout.system_button_at(Point::new(760, 10)), None);
    }
}
