/// What the event queue does when it is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropPolicy {
    /// Discard the incoming event; what is queued stays.
    #[default]
    Newest,
    /// Discard the oldest queued event to make room.
    Oldest,
}

/// Tunables of a gadget session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum number of queued events.
    pub queue_depth: usize,
    pub drop_policy: DropPolicy,
    /// Acknowledged event records kept for reuse.
    pub pool_size: usize,
    /// Cadence of tick events in milliseconds.
    pub tick_interval_ms: u32,
    /// Focus traversal gives up after this many hops.
    pub max_tab_hops: usize,
    /// Blink the text cursor on every tick.
    pub cursor_blink: bool,
}

impl SessionConfig {
    pub const DEFAULT_QUEUE_DEPTH: usize = 30;
    pub const DEFAULT_POOL_SIZE: usize = 8;
    pub const DEFAULT_TICK_MS: u32 = 100;
    pub const DEFAULT_MAX_TAB_HOPS: usize = 100;

    pub const fn new() -> Self {
        Self {
            queue_depth: Self::DEFAULT_QUEUE_DEPTH,
            drop_policy: DropPolicy::Newest,
            pool_size: Self::DEFAULT_POOL_SIZE,
            tick_interval_ms: Self::DEFAULT_TICK_MS,
            max_tab_hops: Self::DEFAULT_MAX_TAB_HOPS,
            cursor_blink: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
