/*
 * Hit-test emulation for custom caption buttons.
 *
 * Non-client mouse messages never reach toolkit widgets, so buttons painted in
 * the title bar would not react to hover or clicks. While the pointer is over
 * a chrome button every non-client mouse message is re-posted as its client
 * area twin. That in turn makes the toolkit ask for client leave tracking,
 * which produces spurious WM_MOUSELEAVE messages while the pointer is still on
 * the button; those are swallowed here and replayed once the pointer really
 * leaves.
 *
 * The per-window state is two fields: the last classified window part and
 * whether a leave is being held back. `SnapLayoutState::transition` is the
 * pure transition table; `handle_snap_layout` samples the OS, feeds the table
 * and performs the resulting actions through `Platform`.
 */
use crate::context::ChromeLayout;
use crate::handlers::region_classifier::classify_hit_test;
use crate::messages::{
    MK_CONTROL, MK_LBUTTON, MK_MBUTTON, MK_RBUTTON, MK_SHIFT, MK_XBUTTON1, MK_XBUTTON2,
    SM_SWAPBUTTON, SYNTHETIC_MESSAGE_TAG, VK_CONTROL, VK_LBUTTON, VK_MBUTTON, VK_RBUTTON,
    VK_SHIFT, VK_XBUTTON1, VK_XBUTTON2, WM_LBUTTONDBLCLK, WM_LBUTTONDOWN, WM_LBUTTONUP,
    WM_MBUTTONDBLCLK, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEHOVER, WM_MOUSELEAVE, WM_MOUSEMOVE,
    WM_NCLBUTTONDBLCLK, WM_NCLBUTTONDOWN, WM_NCLBUTTONUP, WM_NCMBUTTONDBLCLK,
    WM_NCMBUTTONDOWN, WM_NCMBUTTONUP, WM_NCMOUSEHOVER, WM_NCMOUSELEAVE, WM_NCMOUSEMOVE,
    WM_NCRBUTTONDBLCLK, WM_NCRBUTTONDOWN, WM_NCRBUTTONUP, WM_NCXBUTTONDBLCLK, WM_NCXBUTTONDOWN,
    WM_NCXBUTTONUP, WM_RBUTTONDBLCLK, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_XBUTTONDBLCLK,
    WM_XBUTTONDOWN, WM_XBUTTONUP, hiword_from_wparam, hit_test_code_from_wparam,
    is_non_client_mouse_message, is_non_client_xbutton_message, is_tagged_message, make_lparam,
    make_wparam, x_from_lparam, y_from_lparam,
};
use crate::platform::Platform;
use crate::types::{
    LParam, LResult, MessageOutcome, NativePoint, WParam, WindowHandle, WindowPart,
};

/// Whether client leave notifications currently flow to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveTracking {
    #[default]
    Armed,
    /// A leave was swallowed while the pointer sat on a chrome button and
    /// still owes the toolkit either a replay or a re-arm.
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapLayoutState {
    pub last_hit: WindowPart,
    pub leave: LeaveTracking,
}

/// A message reduced to what the transition table needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapInput {
    /// WM_NCHITTEST was answered with a code in `part`.
    HitTestAnswered { part: WindowPart },
    /// A non-client move, button or hover message. `part` is classified from
    /// the hit-test code it carries.
    NonClientMouse { msg: u32, part: WindowPart },
    ClientMouseLeave { tagged: bool, over_system_button: bool },
    ClientMouseMove,
    NonClientMouseLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAction {
    ReleaseGrabbedControl,
    /// Post a tagged WM_MOUSELEAVE.
    SynthesizeLeave,
    /// Post the client-area twin of the current message.
    EmulateClientMessage,
    RearmLeaveTracking,
}

/// What to answer the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapReply {
    #[default]
    PassThrough,
    Handled(LResult),
    /// Handled, with the default procedure's answer to WM_NCMOUSEMOVE.
    DefaultNonClientMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapTransition {
    pub next: SnapLayoutState,
    pub actions: Vec<SnapAction>,
    pub reply: SnapReply,
}

impl SnapLayoutState {
    pub fn is_leave_suppressed(&self) -> bool {
        self.leave == LeaveTracking::Suppressed
    }

    pub fn transition(&self, input: SnapInput) -> SnapTransition {
        let mut next = *self;
        let mut actions = Vec::new();
        let mut reply = SnapReply::PassThrough;

        match input {
            SnapInput::HitTestAnswered { part } => {
                next.last_hit = part;
            }

            SnapInput::NonClientMouse { msg, part } => {
                if msg == WM_NCMOUSEMOVE {
                    if part != WindowPart::ChromeButton {
                        actions.push(SnapAction::ReleaseGrabbedControl);
                        if next.is_leave_suppressed() {
                            actions.push(SnapAction::SynthesizeLeave);
                            next.leave = LeaveTracking::Armed;
                        }
                    }
                    // The next WM_NCHITTEST sets the part again; if the pointer
                    // left the window it stays Outside for the coming leave.
                    next.last_hit = WindowPart::Outside;
                } else {
                    next.last_hit = part;
                }

                if part == WindowPart::ChromeButton {
                    actions.push(SnapAction::EmulateClientMessage);
                    reply = if msg == WM_NCMOUSEMOVE {
                        SnapReply::DefaultNonClientMove
                    } else if is_non_client_xbutton_message(msg) {
                        SnapReply::Handled(LResult(1))
                    } else {
                        SnapReply::Handled(LResult(0))
                    };
                }
            }

            SnapInput::ClientMouseLeave {
                tagged,
                over_system_button,
            } => {
                if !tagged && over_system_button {
                    next.leave = LeaveTracking::Suppressed;
                    reply = SnapReply::Handled(LResult(0));
                } else {
                    next.leave = LeaveTracking::Armed;
                }
            }

            SnapInput::ClientMouseMove => {
                if self.last_hit != WindowPart::ChromeButton && self.is_leave_suppressed() {
                    next.leave = LeaveTracking::Armed;
                    actions.push(SnapAction::RearmLeaveTracking);
                }
            }

            SnapInput::NonClientMouseLeave => {
                if self.last_hit == WindowPart::ChromeButton {
                    // Pressing a button can make the OS treat the press area as
                    // client and fire an early leave; keep tracking instead.
                    if self.is_leave_suppressed() {
                        next.leave = LeaveTracking::Armed;
                        actions.push(SnapAction::RearmLeaveTracking);
                    }
                } else {
                    if self.is_leave_suppressed() {
                        actions.push(SnapAction::SynthesizeLeave);
                        next.leave = LeaveTracking::Armed;
                    }
                    if self.last_hit == WindowPart::Outside {
                        actions.push(SnapAction::ReleaseGrabbedControl);
                    }
                }
            }
        }

        SnapTransition {
            next,
            actions,
            reply,
        }
    }
}

/// Client message posted in place of a non-client one. WM_NCHITTEST has no
/// twin: only the mouse messages that follow it are emulated.
pub fn emulated_client_message(msg: u32) -> Option<u32> {
    let client = match msg {
        WM_NCMOUSEMOVE => WM_MOUSEMOVE,
        WM_NCLBUTTONDOWN => WM_LBUTTONDOWN,
        WM_NCLBUTTONUP => WM_LBUTTONUP,
        WM_NCLBUTTONDBLCLK => WM_LBUTTONDBLCLK,
        WM_NCRBUTTONDOWN => WM_RBUTTONDOWN,
        WM_NCRBUTTONUP => WM_RBUTTONUP,
        WM_NCRBUTTONDBLCLK => WM_RBUTTONDBLCLK,
        WM_NCMBUTTONDOWN => WM_MBUTTONDOWN,
        WM_NCMBUTTONUP => WM_MBUTTONUP,
        WM_NCMBUTTONDBLCLK => WM_MBUTTONDBLCLK,
        WM_NCXBUTTONDOWN => WM_XBUTTONDOWN,
        WM_NCXBUTTONUP => WM_XBUTTONUP,
        WM_NCXBUTTONDBLCLK => WM_XBUTTONDBLCLK,
        WM_NCMOUSEHOVER => WM_MOUSEHOVER,
        WM_NCMOUSELEAVE => WM_MOUSELEAVE,
        _ => return None,
    };
    Some(client)
}

/// MK_* mask built from live key state. The modifier bits a non-client
/// message carries are not usable for a client message, so they are polled.
pub fn modifier_key_state(platform: &impl Platform) -> usize {
    let swapped = platform.system_metric(SM_SWAPBUTTON) != 0;
    let mut state = 0;
    if platform.is_key_down(VK_LBUTTON) {
        state |= if swapped { MK_RBUTTON } else { MK_LBUTTON };
    }
    if platform.is_key_down(VK_RBUTTON) {
        state |= if swapped { MK_LBUTTON } else { MK_RBUTTON };
    }
    if platform.is_key_down(VK_SHIFT) {
        state |= MK_SHIFT;
    }
    if platform.is_key_down(VK_CONTROL) {
        state |= MK_CONTROL;
    }
    if platform.is_key_down(VK_MBUTTON) {
        state |= MK_MBUTTON;
    }
    if platform.is_key_down(VK_XBUTTON1) {
        state |= MK_XBUTTON1;
    }
    if platform.is_key_down(VK_XBUTTON2) {
        state |= MK_XBUTTON2;
    }
    state
}

/// wParam for the emulated twin of `msg`. Leave messages carry the synthetic
/// tag so the leave filter can recognise its own messages.
pub fn emulated_wparam(platform: &impl Platform, msg: u32, wparam: WParam) -> WParam {
    if msg == WM_NCMOUSELEAVE {
        return SYNTHETIC_MESSAGE_TAG;
    }
    let keys = modifier_key_state(platform);
    if is_non_client_xbutton_message(msg) {
        return make_wparam(keys, hiword_from_wparam(wparam) as usize);
    }
    WParam(keys)
}

/// lParam for the emulated twin of `msg`: the screen point translated into
/// client coordinates.
pub fn emulated_lparam(
    platform: &impl Platform,
    hwnd: WindowHandle,
    msg: u32,
    lparam: LParam,
) -> Option<LParam> {
    if msg == WM_NCMOUSELEAVE {
        return Some(LParam(0));
    }
    let screen = NativePoint {
        x: x_from_lparam(lparam),
        y: y_from_lparam(lparam),
    };
    let client = platform.screen_to_client(hwnd, screen)?;
    Some(make_lparam(client.x, client.y))
}

fn post_emulated(
    platform: &impl Platform,
    hwnd: WindowHandle,
    msg: u32,
    wparam: WParam,
    lparam: LParam,
) {
    let Some(client_msg) = emulated_client_message(msg) else {
        return;
    };
    let Some(client_lparam) = emulated_lparam(platform, hwnd, msg, lparam) else {
        log::warn!("[Snap] {hwnd} cannot map point for emulated 0x{client_msg:04X}");
        return;
    };
    let client_wparam = emulated_wparam(platform, msg, wparam);
    if platform.post_message(hwnd, client_msg, client_wparam, client_lparam) {
        log::trace!("[Snap] {hwnd} emulated 0x{msg:04X} as 0x{client_msg:04X}");
    } else {
        log::warn!("[Snap] {hwnd} failed to post emulated 0x{client_msg:04X}");
    }
}

fn cursor_over_system_button(
    platform: &impl Platform,
    layout: &ChromeLayout,
    hwnd: WindowHandle,
) -> bool {
    let screen = platform.message_pos();
    platform
        .screen_to_client(hwnd, screen)
        .is_some_and(|client| layout.system_button_at(client.into()).is_some())
}

fn snap_input(
    platform: &impl Platform,
    layout: &ChromeLayout,
    hwnd: WindowHandle,
    msg: u32,
    wparam: WParam,
) -> Option<SnapInput> {
    match msg {
        WM_MOUSELEAVE => {
            let tagged = is_tagged_message(wparam);
            let over_system_button = !tagged && cursor_over_system_button(platform, layout, hwnd);
            Some(SnapInput::ClientMouseLeave {
                tagged,
                over_system_button,
            })
        }
        WM_MOUSEMOVE => Some(SnapInput::ClientMouseMove),
        WM_NCMOUSELEAVE => Some(SnapInput::NonClientMouseLeave),
        _ if is_non_client_mouse_message(msg) => Some(SnapInput::NonClientMouse {
            msg,
            part: classify_hit_test(hit_test_code_from_wparam(wparam)),
        }),
        _ => None,
    }
}

/// Runs one message through the state machine and carries out its actions.
pub fn handle_snap_layout(
    state: &mut SnapLayoutState,
    platform: &impl Platform,
    layout: &ChromeLayout,
    hwnd: WindowHandle,
    msg: u32,
    wparam: WParam,
    lparam: LParam,
) -> MessageOutcome {
    let Some(input) = snap_input(platform, layout, hwnd, msg, wparam) else {
        return MessageOutcome::NotHandled;
    };
    let transition = state.transition(input);
    if transition.next != *state {
        log::trace!("[Snap] {hwnd} {state:?} -> {:?} on {input:?}", transition.next);
    }
    *state = transition.next;

    for action in &transition.actions {
        match action {
            SnapAction::ReleaseGrabbedControl => {
                if layout.delegate().reset_grabbed_control() {
                    log::trace!("[Snap] {hwnd} released grabbed control");
                }
            }
            SnapAction::SynthesizeLeave => {
                post_emulated(platform, hwnd, WM_NCMOUSELEAVE, wparam, lparam);
            }
            SnapAction::EmulateClientMessage => {
                post_emulated(platform, hwnd, msg, wparam, lparam);
            }
            SnapAction::RearmLeaveTracking => {
                if !platform.track_client_mouse_leave(hwnd) {
                    log::warn!("[Snap] {hwnd} could not re-arm leave tracking");
                }
            }
        }
    }

    match transition.reply {
        SnapReply::PassThrough => MessageOutcome::NotHandled,
        SnapReply::Handled(result) => MessageOutcome::Handled(result),
        SnapReply::DefaultNonClientMove => MessageOutcome::Handled(platform.default_window_proc(
            hwnd,
            WM_NCMOUSEMOVE,
            wparam,
            lparam,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{HTCAPTION, HTCLIENT, HTCLOSE, HTZOOM};
    use crate::test_support::{MockDelegate, MockPlatform};
    use crate::types::{ItemId, Rect, SystemButton};
    use std::rc::Rc;

    const HWND: WindowHandle = WindowHandle(0x4000);
    const CLOSE: ItemId = ItemId(7);

    fn chrome_state(leave: LeaveTracking) -> SnapLayoutState {
        SnapLayoutState {
            last_hit: WindowPart::ChromeButton,
            leave,
        }
    }

    fn setup() -> (MockPlatform, Rc<MockDelegate>, ChromeLayout) {
        let platform = MockPlatform::new();
        let delegate = Rc::new(MockDelegate::new());
        delegate.place(CLOSE, Rect::new(754, 0, 46, 32));
        let mut layout = ChromeLayout::new(delegate.clone());
        layout.set_system_button(SystemButton::Close, CLOSE).unwrap();
        (platform, delegate, layout)
    }

    fn send(
        state: &mut SnapLayoutState,
        platform: &MockPlatform,
        layout: &ChromeLayout,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> MessageOutcome {
        handle_snap_layout(state, platform, layout, HWND, msg, wparam, lparam)
    }

    #[test]
    fn non_client_move_over_button_is_emulated() {
        let state = SnapLayoutState::default();
        let t = state.transition(SnapInput::NonClientMouse {
            msg: WM_NCMOUSEMOVE,
            part: WindowPart::ChromeButton,
        });
        assert_eq!(t.actions, vec![SnapAction::EmulateClientMessage]);
        assert_eq!(t.reply, SnapReply::DefaultNonClientMove);
        assert_eq!(t.next.last_hit, WindowPart::Outside);
    }

    #[test]
    fn leaving_button_replays_held_back_leave() {
        let state = chrome_state(LeaveTracking::Suppressed);
        let t = state.transition(SnapInput::NonClientMouse {
            msg: WM_NCMOUSEMOVE,
            part: WindowPart::TitleBar,
        });
        assert_eq!(
            t.actions,
            vec![
                SnapAction::ReleaseGrabbedControl,
                SnapAction::SynthesizeLeave
            ]
        );
        assert_eq!(t.reply, SnapReply::PassThrough);
        assert_eq!(t.next.leave, LeaveTracking::Armed);
        assert_eq!(t.next.last_hit, WindowPart::Outside);
    }

    #[test]
    fn button_messages_report_historical_results() {
        let state = SnapLayoutState::default();
        let down = state.transition(SnapInput::NonClientMouse {
            msg: WM_NCLBUTTONDOWN,
            part: WindowPart::ChromeButton,
        });
        assert_eq!(down.reply, SnapReply::Handled(LResult(0)));
        assert_eq!(down.next.last_hit, WindowPart::ChromeButton);

        let xdown = state.transition(SnapInput::NonClientMouse {
            msg: WM_NCXBUTTONDOWN,
            part: WindowPart::ChromeButton,
        });
        assert_eq!(xdown.reply, SnapReply::Handled(LResult(1)));
    }

    #[test]
    fn button_press_outside_chrome_passes_through() {
        let state = SnapLayoutState::default();
        let t = state.transition(SnapInput::NonClientMouse {
            msg: WM_NCLBUTTONDOWN,
            part: WindowPart::TitleBar,
        });
        assert!(t.actions.is_empty());
        assert_eq!(t.reply, SnapReply::PassThrough);
    }

    #[test]
    fn own_leave_messages_are_never_suppressed() {
        let state = chrome_state(LeaveTracking::Suppressed);
        let t = state.transition(SnapInput::ClientMouseLeave {
            tagged: true,
            over_system_button: true,
        });
        assert_eq!(t.reply, SnapReply::PassThrough);
        assert_eq!(t.next.leave, LeaveTracking::Armed);
    }

    #[test]
    fn early_non_client_leave_on_button_rearms_tracking() {
        let state = chrome_state(LeaveTracking::Suppressed);
        let t = state.transition(SnapInput::NonClientMouseLeave);
        assert_eq!(t.actions, vec![SnapAction::RearmLeaveTracking]);
        assert_eq!(t.next.leave, LeaveTracking::Armed);
    }

    #[test]
    fn client_move_on_button_keeps_leave_suppressed() {
        let state = chrome_state(LeaveTracking::Suppressed);
        let t = state.transition(SnapInput::ClientMouseMove);
        assert!(t.actions.is_empty());
        assert_eq!(t.next, state);
    }

    #[test]
    fn suppressed_leave_is_rearmed_by_plain_client_move() {
        // Arrange
        let (platform, _delegate, layout) = setup();
        let mut state = SnapLayoutState {
            last_hit: WindowPart::ClientArea,
            leave: LeaveTracking::Armed,
        };
        // Cursor over the close button: client (760, 10).
        platform.set_message_pos(NativePoint { x: 860, y: 110 });

        // Act
        let leave = send(
            &mut state,
            &platform,
            &layout,
            WM_MOUSELEAVE,
            WParam(0),
            LParam(0),
        );

        // Assert
        assert_eq!(leave, MessageOutcome::Handled(LResult(0)));
        assert!(state.is_leave_suppressed());

        let moved = send(
            &mut state,
            &platform,
            &layout,
            WM_MOUSEMOVE,
            WParam(0),
            make_lparam(300, 300),
        );
        assert_eq!(moved, MessageOutcome::NotHandled);
        assert!(!state.is_leave_suppressed());
        assert_eq!(*platform.leave_requests.borrow(), vec![HWND]);
    }

    #[test]
    fn leave_away_from_buttons_passes_through() {
        let (platform, _delegate, layout) = setup();
        let mut state = SnapLayoutState::default();
        platform.set_message_pos(NativePoint { x: 300, y: 300 });

        let outcome = send(
            &mut state,
            &platform,
            &layout,
            WM_MOUSELEAVE,
            WParam(0),
            LParam(0),
        );

        assert_eq!(outcome, MessageOutcome::NotHandled);
        assert!(!state.is_leave_suppressed());
    }

    #[test]
    fn hover_then_leave_synthesizes_exactly_one_client_leave() {
        // Arrange
        let (platform, delegate, layout) = setup();
        let mut state = SnapLayoutState::default();
        delegate.grab();
        state = state
            .transition(SnapInput::HitTestAnswered {
                part: classify_hit_test(HTCLOSE),
            })
            .next;

        // Act: move over the close button, the toolkit's own leave arrives
        // while still on it, then the pointer exits the window.
        let moved = send(
            &mut state,
            &platform,
            &layout,
            WM_NCMOUSEMOVE,
            WParam(HTCLOSE as usize),
            make_lparam(860, 110),
        );
        platform.set_message_pos(NativePoint { x: 860, y: 110 });
        send(
            &mut state,
            &platform,
            &layout,
            WM_MOUSELEAVE,
            WParam(0),
            LParam(0),
        );
        state = state
            .transition(SnapInput::HitTestAnswered {
                part: WindowPart::Outside,
            })
            .next;
        send(
            &mut state,
            &platform,
            &layout,
            WM_NCMOUSELEAVE,
            WParam(0),
            LParam(0),
        );

        // Assert
        assert!(moved.is_handled());
        assert_eq!(platform.posted_count(WM_MOUSEMOVE), 1);
        assert_eq!(platform.posted_count(WM_MOUSELEAVE), 1);
        let leave = platform
            .posted_messages()
            .into_iter()
            .find(|m| m.msg == WM_MOUSELEAVE)
            .unwrap();
        assert_eq!(leave.wparam, SYNTHETIC_MESSAGE_TAG);
        assert_eq!(leave.lparam, LParam(0));
        assert!(!state.is_leave_suppressed());
        assert!(!delegate.is_grabbed());
    }

    #[test]
    fn emulated_move_uses_client_coordinates_and_live_modifiers() {
        let (platform, _delegate, layout) = setup();
        let mut state = SnapLayoutState::default();
        platform.press_key(VK_LBUTTON);
        platform.press_key(VK_CONTROL);
        platform.set_default_proc_result(LResult(0x55));

        let outcome = send(
            &mut state,
            &platform,
            &layout,
            WM_NCMOUSEMOVE,
            WParam(HTZOOM as usize),
            make_lparam(830, 120),
        );

        assert_eq!(outcome, MessageOutcome::Handled(LResult(0x55)));
        let posted = platform.posted_messages();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].msg, WM_MOUSEMOVE);
        assert_eq!(posted[0].wparam, WParam(MK_LBUTTON | MK_CONTROL));
        assert_eq!(posted[0].lparam, make_lparam(730, 20));
    }

    #[test]
    fn swapped_buttons_flip_mouse_masks() {
        let platform = MockPlatform::new();
        platform.set_metric(SM_SWAPBUTTON, 1);
        platform.press_key(VK_LBUTTON);
        assert_eq!(modifier_key_state(&platform), MK_RBUTTON);
    }

    #[test]
    fn xbutton_keeps_button_id_in_high_word() {
        let platform = MockPlatform::new();
        platform.press_key(VK_SHIFT);
        let wparam = make_wparam(HTCLOSE as usize, 2);
        assert_eq!(
            emulated_wparam(&platform, WM_NCXBUTTONUP, wparam),
            make_wparam(MK_SHIFT, 2)
        );
    }

    #[test]
    fn non_client_move_outside_chrome_is_not_emulated() {
        let (platform, delegate, layout) = setup();
        let mut state = SnapLayoutState::default();
        delegate.grab();

        let outcome = send(
            &mut state,
            &platform,
            &layout,
            WM_NCMOUSEMOVE,
            WParam(HTCAPTION as usize),
            make_lparam(300, 110),
        );

        assert_eq!(outcome, MessageOutcome::NotHandled);
        assert!(platform.posted_messages().is_empty());
        assert!(!delegate.is_grabbed());
        assert_eq!(state.last_hit, WindowPart::Outside);
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        let (platform, _delegate, layout) = setup();
        let mut state = chrome_state(LeaveTracking::Suppressed);
        let outcome = send(
            &mut state,
            &platform,
            &layout,
            WM_LBUTTONDOWN,
            WParam(HTCLIENT as usize),
            LParam(0),
        );
        assert_eq!(outcome, MessageOutcome::NotHandled);
        assert_eq!(state, chrome_state(LeaveTracking::Suppressed));
    }

    #[test]
    fn every_non_client_mouse_message_has_a_client_twin() {
        for msg in [
            WM_NCMOUSEMOVE,
            WM_NCLBUTTONDOWN,
            WM_NCLBUTTONUP,
            WM_NCLBUTTONDBLCLK,
            WM_NCRBUTTONDOWN,
            WM_NCRBUTTONUP,
            WM_NCRBUTTONDBLCLK,
            WM_NCMBUTTONDOWN,
            WM_NCMBUTTONUP,
            WM_NCMBUTTONDBLCLK,
            WM_NCXBUTTONDOWN,
            WM_NCXBUTTONUP,
            WM_NCXBUTTONDBLCLK,
            WM_NCMOUSEHOVER,
        ] {
            assert!(is_non_client_mouse_message(msg));
            assert!(emulated_client_message(msg).is_some(), "0x{msg:04X}");
        }
        assert_eq!(emulated_client_message(WM_MOUSEMOVE), None);
        assert_eq!(emulated_client_message(crate::messages::WM_NCHITTEST), None);
    }

    #[test]
    fn hit_test_over_button_only_records_the_part() {
        let (platform, _delegate, layout) = setup();
        let mut state = SnapLayoutState::default();

        let outcome = send(
            &mut state,
            &platform,
            &layout,
            crate::messages::WM_NCHITTEST,
            WParam(0),
            make_lparam(880, 115),
        );

        assert_eq!(outcome, MessageOutcome::NotHandled);
        assert_eq!(state, SnapLayoutState::default());
        assert!(platform.posted_messages().is_empty());
    }
}
