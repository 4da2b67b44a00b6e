/*
 * Per-registry configuration. Plain data with `with_*` setters; the host
 * builds one when it creates its `WindowRegistry` and every registered window
 * shares it.
 */

/// How the intercepting window procedure chains to the procedure it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainMode {
    /// Always call the replaced procedure after our handlers ran. Toolkits
    /// that consult `ResultForwarder` from their own filter chain use this,
    /// since their procedure still needs every message for bookkeeping.
    #[default]
    AlwaysForward,
    /// Return the handled result directly and only forward unhandled
    /// messages. For plain Win32 windows with no filter chain.
    ShortCircuit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramelessConfig {
    pub chain_mode: ChainMode,
    /// Inset applied on the edge hosting an auto-hide taskbar, in device
    /// pixels. Large enough for the shell to notice the pointer.
    pub auto_hide_taskbar_thickness: i32,
    /// Report directional resize codes along the window edges from
    /// WM_NCHITTEST while the window is restored.
    pub emulate_resize_borders: bool,
}

impl Default for FramelessConfig {
    fn default() -> Self {
        Self {
            chain_mode: ChainMode::default(),
            auto_hide_taskbar_thickness: 2,
            emulate_resize_borders: true,
        }
    }
}

impl FramelessConfig {
    pub fn with_chain_mode(mut self, chain_mode: ChainMode) -> Self {
        self.chain_mode = chain_mode;
        self
    }

    pub fn with_auto_hide_taskbar_thickness(mut self, thickness: i32) -> Self {
        self.auto_hide_taskbar_thickness = thickness.max(0);
        self
    }

    pub fn with_emulated_resize_borders(mut self, enabled: bool) -> Self {
        self.emulate_resize_borders = enabled;
        self
    }
}
