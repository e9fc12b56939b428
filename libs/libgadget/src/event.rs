//! Event records and the bounded event queue.
//!
//! Records come from a small pool of acknowledged events, falling back to a
//! fresh allocation when the pool is empty. The queue never holds more than
//! its configured depth; a full queue drops per [`DropPolicy`].

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::config::{DropPolicy, SessionConfig};
use crate::gadget::GadgetId;
use crate::input::TimeVal;
use crate::qualifier::Qualifier;

/// Kind of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Class {
    /// Left button pressed over no gadget.
    ButtonDown,
    /// Left button released with no gadget pressed.
    ButtonUp,
    /// Initial click on a gadget that asked for immediate notification.
    GadgetDown,
    /// A gadget was committed: released on, toggled, picked or edited.
    GadgetUp,
    /// Periodic timer.
    #[default]
    Tick,
    /// Untranslated key transition not consumed by a gadget.
    RawKey,
    /// Translated character not consumed by a gadget.
    VanillaKey,
}

/// One queued event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Event {
    pub class: Class,
    /// Class-specific: key code, option index, terminating byte, checked
    /// state.
    pub code: u16,
    pub qualifier: Qualifier,
    pub gadget: Option<GadgetId>,
    /// Gadget id number of `gadget` at the time of the event.
    pub gadget_id: u16,
    pub mouse_x: i32,
    pub mouse_y: i32,
    pub time: TimeVal,
}

/// An event taken off the queue. Hand it back with
/// [`crate::Session::ack_event`] so its record can be reused.
#[derive(Debug)]
pub struct QueuedEvent(Box<Event>);

impl Deref for QueuedEvent {
    type Target = Event;

    fn deref(&self) -> &Event {
        &self.0
    }
}

impl QueuedEvent {
    pub fn event(&self) -> Event {
        *self.0
    }
}

pub struct EventQueue {
    fifo: VecDeque<Box<Event>>,
    pool: Vec<Box<Event>>,
    depth: usize,
    pool_size: usize,
    policy: DropPolicy,
    dropped: u64,
}

impl EventQueue {
    pub fn new(config: &SessionConfig) -> Self {
        let depth = config.queue_depth.max(1);
        let mut pool = Vec::with_capacity(config.pool_size);
        pool.resize_with(config.pool_size, || Box::new(Event::default()));
        Self {
            fifo: VecDeque::with_capacity(depth),
            pool,
            depth,
            pool_size: config.pool_size,
            policy: config.drop_policy,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Records currently waiting in the reuse pool.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Append `event`. Returns false if it was discarded.
    pub fn put(&mut self, event: Event) -> bool {
        if self.fifo.len() >= self.depth {
            self.dropped += 1;
            match self.policy {
                DropPolicy::Newest => {
                    log::warn!("event queue full; dropping {:?}", event.class);
                    return false;
                }
                DropPolicy::Oldest => {
                    if let Some(old) = self.fifo.pop_front() {
                        log::warn!("event queue full; dropping oldest {:?}", old.class);
                        self.recycle(old);
                    }
                }
            }
        }
        let mut record = self.pool.pop().unwrap_or_else(|| Box::new(Event::default()));
        *record = event;
        self.fifo.push_back(record);
        true
    }

    pub fn get(&mut self) -> Option<QueuedEvent> {
        self.fifo.pop_front().map(QueuedEvent)
    }

    pub fn peek(&self) -> Option<&Event> {
        self.fifo.front().map(|e| &**e)
    }

    pub fn ack(&mut self, event: QueuedEvent) {
        self.recycle(event.0);
    }

    fn recycle(&mut self, record: Box<Event>) {
        if self.pool.len() < self.pool_size {
            self.pool.push(record);
        }
    }

    /// Drop every queued event naming a gadget for which `gone` holds.
    pub fn purge(&mut self, mut gone: impl FnMut(GadgetId) -> bool) {
        let mut kept = VecDeque::with_capacity(self.fifo.len());
        while let Some(event) = self.fifo.pop_front() {
            if event.gadget.is_some_and(&mut gone) {
                self.recycle(event);
            } else {
                kept.push_back(event);
            }
        }
        self.fifo = kept;
    }
}
