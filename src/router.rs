/*
 * Routes intercepted messages to the `WindowContext` of the window they were
 * sent to.
 *
 * `WindowRegistry` is an explicit object owned by the host integration rather
 * than process-global state. It owns the platform adapter, the capabilities
 * detected at startup and the shared configuration, and maps each registered
 * window handle to exactly one context.
 *
 * Toolkits that run their own native event filter after the window procedure
 * learn through `ResultForwarder` whether this layer already handled a
 * message. The forwarder exists exactly while at least one window is
 * registered: it is created by the first registration and dropped when the
 * last window goes away.
 *
 * A window procedure that runs default processing can be re-entered while the
 * registry is still borrowed. `SharedRegistry` wraps the registry for such
 * hosts: nested messages bypass the handlers, but still clear the forwarded
 * result, and windows destroyed meanwhile are unregistered once the borrow
 * ends.
 */
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{ChainMode, FramelessConfig};
use crate::context::WindowItemDelegate;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::platform::{Capabilities, Platform};
use crate::types::{LParam, LResult, MessageOutcome, WParam, WindowHandle};
use crate::window_context::WindowContext;

/// The handled result of the most recent intercepted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardedResult {
    pub hwnd: WindowHandle,
    pub msg: u32,
    pub result: LResult,
}

#[derive(Debug, Default)]
pub struct ResultForwarder {
    last: Cell<Option<ForwardedResult>>,
}

impl ResultForwarder {
    /// Records the outcome of the message just intercepted. An unhandled
    /// outcome clears the previous record.
    pub fn record(&self, hwnd: WindowHandle, msg: u32, outcome: MessageOutcome) {
        self.last.set(outcome.result().map(|result| ForwardedResult { hwnd, msg, result }));
    }

    /// Answer for a toolkit event filter: the result to report when this
    /// layer handled `msg` for `hwnd`.
    pub fn filter(&self, hwnd: WindowHandle, msg: u32) -> Option<LResult> {
        self.last
            .get()
            .filter(|last| last.hwnd == hwnd && last.msg == msg)
            .map(|last| last.result)
    }

    pub fn last(&self) -> Option<ForwardedResult> {
        self.last.get()
    }
}

/// Combines an intercepted outcome with the next window procedure according to
/// `mode`. `next` runs at most once.
pub fn chain_to_next(
    outcome: MessageOutcome,
    mode: ChainMode,
    next: impl FnOnce() -> LResult,
) -> LResult {
    match (mode, outcome) {
        (ChainMode::AlwaysForward, _) => next(),
        (ChainMode::ShortCircuit, MessageOutcome::Handled(result)) => result,
        (ChainMode::ShortCircuit, MessageOutcome::NotHandled) => next(),
    }
}

pub struct WindowRegistry<P: Platform> {
    platform: P,
    caps: Capabilities,
    config: FramelessConfig,
    contexts: HashMap<WindowHandle, WindowContext>,
    forwarder: Option<Rc<ResultForwarder>>,
}

impl<P: Platform> WindowRegistry<P> {
    pub fn new(platform: P, caps: Capabilities, config: FramelessConfig) -> Self {
        log::debug!("[Router] Registry created ({caps:?}, {config:?})");
        Self {
            platform,
            caps,
            config,
            contexts: HashMap::new(),
            forwarder: None,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn config(&self) -> &FramelessConfig {
        &self.config
    }

    /// Registers `hwnd`. Returns `Ok(false)` if it was already registered, in
    /// which case the existing context (and its delegate) is kept.
    pub fn register(
        &mut self,
        hwnd: WindowHandle,
        delegate: Rc<dyn WindowItemDelegate>,
    ) -> PlatformResult<bool> {
        if hwnd.is_null() {
            return Err(PlatformError::InvalidHandle(
                "cannot register a null window handle".into(),
            ));
        }
        if self.contexts.contains_key(&hwnd) {
            log::debug!("[Router] {hwnd} already registered");
            return Ok(false);
        }
        if self.forwarder.is_none() {
            log::debug!("[Router] Installing result forwarder");
            self.forwarder = Some(Rc::new(ResultForwarder::default()));
        }
        self.contexts.insert(hwnd, WindowContext::new(hwnd, delegate));
        log::debug!("[Router] Registered {hwnd} ({} windows)", self.contexts.len());
        Ok(true)
    }

    /// Removes `hwnd` and hands back its context. Dropping the last context
    /// also uninstalls the result forwarder.
    pub fn unregister(&mut self, hwnd: WindowHandle) -> Option<WindowContext> {
        let removed = self.contexts.remove(&hwnd);
        if removed.is_some() {
            log::debug!("[Router] Unregistered {hwnd} ({} windows)", self.contexts.len());
        }
        if self.contexts.is_empty() && self.forwarder.take().is_some() {
            log::debug!("[Router] Last window gone; result forwarder uninstalled");
        }
        removed
    }

    pub fn contains(&self, hwnd: WindowHandle) -> bool {
        self.contexts.contains_key(&hwnd)
    }

    pub fn context(&self, hwnd: WindowHandle) -> Option<&WindowContext> {
        self.contexts.get(&hwnd)
    }

    pub fn context_mut(&mut self, hwnd: WindowHandle) -> Option<&mut WindowContext> {
        self.contexts.get_mut(&hwnd)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn handles(&self) -> Vec<WindowHandle> {
        self.contexts.keys().copied().collect()
    }

    /// The forwarder a toolkit event filter should consult, present while any
    /// window is registered.
    pub fn result_filter(&self) -> Option<Rc<ResultForwarder>> {
        self.forwarder.clone()
    }

    /// Runs the message through the context registered for `hwnd` and records
    /// the outcome for the result forwarder. Unknown windows are not handled.
    ///
    /// # Safety
    /// The message parameters must belong to a message currently being
    /// delivered to `hwnd` (see [`WindowContext::window_proc`]).
    pub unsafe fn intercept(
        &mut self,
        hwnd: WindowHandle,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> MessageOutcome {
        let Some(context) = self.contexts.get_mut(&hwnd) else {
            return MessageOutcome::NotHandled;
        };
        // SAFETY: forwarded from the caller's contract.
        let outcome = unsafe {
            context.window_proc(&self.platform, &self.caps, &self.config, msg, wparam, lparam)
        };
        if let Some(forwarder) = &self.forwarder {
            forwarder.record(hwnd, msg, outcome);
        }
        outcome
    }

    /// Full interception entry point: our handlers first, then the next
    /// procedure as configured by the chain mode. Unknown windows go to
    /// default processing.
    ///
    /// # Safety
    /// Same contract as [`WindowRegistry::intercept`].
    pub unsafe fn dispatch(
        &mut self,
        hwnd: WindowHandle,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
        next: impl FnOnce() -> LResult,
    ) -> LResult {
        if !self.contains(hwnd) {
            return self.platform.default_window_proc(hwnd, msg, wparam, lparam);
        }
        // SAFETY: forwarded from the caller's contract.
        let outcome = unsafe { self.intercept(hwnd, msg, wparam, lparam) };
        chain_to_next(outcome, self.config.chain_mode, next)
    }
}

pub struct SharedRegistry<P: Platform> {
    registry: RefCell<WindowRegistry<P>>,
    forwarder: RefCell<Option<Rc<ResultForwarder>>>,
    pending_removals: RefCell<Vec<WindowHandle>>,
}

impl<P: Platform> SharedRegistry<P> {
    pub fn new(registry: WindowRegistry<P>) -> Self {
        let forwarder = registry.result_filter();
        Self {
            registry: RefCell::new(registry),
            forwarder: RefCell::new(forwarder),
            pending_removals: RefCell::new(Vec::new()),
        }
    }

    /// Runs `f` with exclusive access to the registry. `None` when the
    /// registry is already borrowed further up the stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut WindowRegistry<P>) -> R) -> Option<R> {
        let mut registry = self.registry.try_borrow_mut().ok()?;
        self.settle(&mut *registry);
        let result = f(&mut *registry);
        self.settle(&mut *registry);
        Some(result)
    }

    /// Records a message that bypassed the handlers because the registry was
    /// busy, so a filter never replays an older answer for it.
    pub fn record_bypassed(&self, hwnd: WindowHandle, msg: u32) {
        if let Ok(forwarder) = self.forwarder.try_borrow()
            && let Some(forwarder) = forwarder.as_ref()
        {
            forwarder.record(hwnd, msg, MessageOutcome::NotHandled);
        }
    }

    /// Unregisters `hwnd` now, or as soon as the current borrow ends. Returns
    /// whether the removal happened immediately.
    pub fn unregister_or_defer(&self, hwnd: WindowHandle) -> bool {
        if self.with(|registry| registry.unregister(hwnd)).is_some() {
            return true;
        }
        match self.pending_removals.try_borrow_mut() {
            Ok(mut pending) => {
                if !pending.contains(&hwnd) {
                    pending.push(hwnd);
                }
                log::debug!("[Router] {hwnd} destroyed during dispatch; removal deferred");
            }
            Err(_) => log::warn!("[Router] Could not defer removal of {hwnd}"),
        }
        false
    }

    pub fn pending_removals(&self) -> usize {
        self.pending_removals
            .try_borrow()
            .map(|pending| pending.len())
            .unwrap_or(0)
    }

    fn settle(&self, registry: &mut WindowRegistry<P>) {
        if let Ok(mut pending) = self.pending_removals.try_borrow_mut() {
            for hwnd in pending.drain(..) {
                registry.unregister(hwnd);
            }
        }
        if let Ok(mut forwarder) = self.forwarder.try_borrow_mut() {
            *forwarder = registry.result_filter();
        }
    }
}
