/*
 * Installs the intercepting window procedure on real windows through comctl32
 * subclassing. Every attached window shares one `WindowRegistry`; its address
 * travels as the subclass reference data, so the host must outlive every
 * subclass it installs (its `Drop` removes the remaining ones).
 *
 * Handlers may run default processing, which can send messages back to the
 * same window while the registry is still borrowed. Such nested messages fail
 * open: they skip our handlers and go straight to the next procedure.
 */
use std::rc::Rc;

use windows::Win32::{
    Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM},
    UI::{
        Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
        WindowsAndMessaging::{
            SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowPos,
        },
    },
};

use super::platform::{Win32Platform, to_hwnd};
use crate::config::FramelessConfig;
use crate::context::WindowItemDelegate;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::messages::WM_NCDESTROY;
use crate::router::{SharedRegistry, WindowRegistry, chain_to_next};
use crate::types::{LParam, LResult, WParam, WindowHandle};

const SUBCLASS_ID: usize = 0x534E_4150;

pub struct Win32Host {
    shared: Rc<SharedRegistry<Win32Platform>>,
}

impl Win32Host {
    /// Detects the OS capabilities and creates an empty registry. Plain Win32
    /// windows normally want `ChainMode::ShortCircuit`; `AlwaysForward` is for
    /// window procedures that read the registry's result filter themselves.
    pub fn new(config: FramelessConfig) -> Self {
        let platform = Win32Platform::new();
        let caps = platform.capabilities();
        Self {
            shared: Rc::new(SharedRegistry::new(WindowRegistry::new(platform, caps, config))),
        }
    }

    pub fn registry(&self) -> &SharedRegistry<Win32Platform> {
        &self.shared
    }

    /// Subclasses `hwnd` and starts answering its frame messages. Returns
    /// `Ok(false)` when the window was already attached.
    pub fn attach(
        &self,
        hwnd: WindowHandle,
        delegate: Rc<dyn WindowItemDelegate>,
    ) -> PlatformResult<bool> {
        let newly_registered = self
            .shared
            .with(|registry| registry.register(hwnd, delegate))
            .ok_or_else(|| {
                PlatformError::OperationFailed(format!(
                    "cannot attach {hwnd} while a message is being processed"
                ))
            })??;
        if !newly_registered {
            return Ok(false);
        }

        let ref_data = Rc::as_ptr(&self.shared) as usize;
        let installed = unsafe {
            SetWindowSubclass(
                to_hwnd(hwnd),
                Some(intercepting_subclass_proc),
                SUBCLASS_ID,
                ref_data,
            )
        };
        if !installed.as_bool() {
            let err = unsafe { GetLastError() };
            self.shared.with(|registry| registry.unregister(hwnd));
            log::error!("[Win32] SetWindowSubclass failed for {hwnd}: {err:?}");
            return Err(PlatformError::OperationFailed(format!(
                "SetWindowSubclass failed for {hwnd}: {err:?}"
            )));
        }
        log::debug!("[Win32] Attached {hwnd}");
        refresh_frame(hwnd);
        Ok(true)
    }

    /// Removes the subclass and restores the native frame. Returns `false` if
    /// `hwnd` was not attached.
    pub fn detach(&self, hwnd: WindowHandle) -> bool {
        let Some(removed) = self
            .shared
            .with(|registry| registry.unregister(hwnd).is_some())
        else {
            log::warn!("[Win32] Cannot detach {hwnd} while a message is being processed");
            return false;
        };
        if !removed {
            return false;
        }
        let ok = unsafe {
            RemoveWindowSubclass(to_hwnd(hwnd), Some(intercepting_subclass_proc), SUBCLASS_ID)
        };
        if !ok.as_bool() {
            log::warn!("[Win32] RemoveWindowSubclass failed for {hwnd}");
        }
        refresh_frame(hwnd);
        log::debug!("[Win32] Detached {hwnd}");
        true
    }
}

impl Drop for Win32Host {
    fn drop(&mut self) {
        let Some(handles) = self.shared.with(|registry| registry.handles()) else {
            log::error!("[Win32] Host dropped while a message is being processed");
            return;
        };
        for hwnd in handles {
            self.detach(hwnd);
        }
    }
}

/// Makes the OS send WM_NCCALCSIZE again so frame changes apply immediately.
fn refresh_frame(hwnd: WindowHandle) {
    let result = unsafe {
        SetWindowPos(
            to_hwnd(hwnd),
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
        )
    };
    if let Err(err) = result {
        log::warn!("[Win32] Frame refresh failed for {hwnd}: {err:?}");
    }
}

unsafe extern "system" fn intercepting_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    ref_data: usize,
) -> LRESULT {
    // SAFETY: `ref_data` is the registry installed by `Win32Host::attach`; the
    // host removes every subclass before the registry is freed.
    let shared = unsafe { &*(ref_data as *const SharedRegistry<Win32Platform>) };
    let handle = WindowHandle::from(hwnd);

    if msg == WM_NCDESTROY {
        shared.unregister_or_defer(handle);
        let removed = unsafe {
            RemoveWindowSubclass(hwnd, Some(intercepting_subclass_proc), SUBCLASS_ID)
        };
        if !removed.as_bool() {
            log::warn!("[Win32] RemoveWindowSubclass failed for {handle}");
        }
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    }

    let intercepted = shared.with(|registry| {
        let chain_mode = registry.config().chain_mode;
        // SAFETY: the parameters are those of the message being delivered.
        let outcome =
            unsafe { registry.intercept(handle, msg, WParam(wparam.0), LParam(lparam.0)) };
        (outcome, chain_mode)
    });
    let Some((outcome, chain_mode)) = intercepted else {
        shared.record_bypassed(handle, msg);
        log::trace!("[Win32] Nested 0x{msg:04X} for {handle}; passing through");
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    };

    let result = chain_to_next(outcome, chain_mode, || {
        LResult(unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }.0)
    });
    LRESULT(result.0)
}
