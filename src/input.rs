//! Interrupt-side input plumbing.
//!
//! Keyboard interrupts push encoded [`Symbol`]s into an [`InputRing`]; the
//! mouse interrupt writes absolute coordinates and button bits into a
//! [`MouseLatch`]. Both are read from the polling loop without locks.

use conquer_once::spin::OnceCell;
use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use crossbeam_queue::ArrayQueue;
use libgadget::{PointerState, Symbol};

/// Default ring capacity. A burst larger than this between two polls drops
/// input.
pub const RING_CAPACITY: usize = 128;

pub const BUTTON_LEFT: u32 = 1 << 0;
pub const BUTTON_RIGHT: u32 = 1 << 1;

/// Bounded single-producer ring of encoded keyboard symbols.
pub struct InputRing {
    queue: ArrayQueue<u16>,
}

impl InputRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Called by the keyboard interrupt handler.
    ///
    /// Must not block or allocate. Returns false when the symbol was dropped.
    pub fn push_from_isr(&self, symbol: Symbol) -> bool {
        #[cfg(feature = "debug-input")]
        log::debug!("ring <- {:?}", symbol);
        if self.queue.push(symbol.encode()).is_err() {
            log::warn!("Input ring full; dropping {:?}", symbol);
            return false;
        }
        true
    }

    pub fn pop(&self) -> Option<Symbol> {
        self.queue.pop().map(Symbol::decode)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }
}

static INPUT_RING: OnceCell<InputRing> = OnceCell::uninit();

/// Create the process-wide ring. Call once during bring-up, before
/// keyboard interrupts are unmasked; later calls keep the first ring.
pub fn init_ring(capacity: usize) -> Option<&'static InputRing> {
    if INPUT_RING.try_init_once(|| InputRing::new(capacity)).is_err() {
        log::warn!("Input ring already initialized");
    }
    ring()
}

pub fn ring() -> Option<&'static InputRing> {
    INPUT_RING.try_get().ok()
}

/// Keyboard interrupt entry point for the process-wide ring.
pub fn push_from_isr(symbol: Symbol) {
    match ring() {
        Some(ring) => {
            ring.push_from_isr(symbol);
        }
        None => log::warn!("Input ring uninitialized"),
    }
}

/// Last pointer position and buttons, as written by the mouse interrupt.
pub struct MouseLatch {
    x: AtomicI32,
    y: AtomicI32,
    buttons: AtomicU32,
    width: i32,
    height: i32,
}

impl MouseLatch {
    /// A latch confined to a `width` x `height` screen, starting at the
    /// top-left corner with no buttons held.
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            x: AtomicI32::new(0),
            y: AtomicI32::new(0),
            buttons: AtomicU32::new(0),
            width: if width > 0 { width } else { 1 },
            height: if height > 0 { height } else { 1 },
        }
    }

    pub fn move_to(&self, x: i32, y: i32) {
        self.x.store(x.clamp(0, self.width - 1), Ordering::Relaxed);
        self.y.store(y.clamp(0, self.height - 1), Ordering::Relaxed);
    }

    /// Apply a relative motion report.
    pub fn move_by(&self, dx: i32, dy: i32) {
        let x = self.x.load(Ordering::Relaxed).saturating_add(dx);
        let y = self.y.load(Ordering::Relaxed).saturating_add(dy);
        self.move_to(x, y);
    }

    pub fn set_buttons(&self, bits: u32) {
        self.buttons.store(bits, Ordering::Release);
    }

    pub fn buttons(&self) -> u32 {
        self.buttons.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> PointerState {
        let buttons = self.buttons();
        PointerState::from_raw(
            self.x.load(Ordering::Relaxed),
            self.y.load(Ordering::Relaxed),
            buttons,
        )
    }
}
