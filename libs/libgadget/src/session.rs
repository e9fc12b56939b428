//! A gadget session: the gadget arena, its lists, the event queue and the
//! polling loop that feeds them.

use alloc::vec::Vec;

use libraster::RastPort;
use slotmap::SlotMap;

use crate::config::SessionConfig;
use crate::create;
use crate::editor::EscapeDecoder;
use crate::error::Error;
use crate::event::{Class, Event, EventQueue, QueuedEvent};
use crate::gadget::{Activation, Gadget, GadgetId, Kind, NewGadget};
use crate::input::{Platform, PointerState, TimeVal};
use crate::mouse::{MouseTracker, Transition};
use crate::qualifier::Qualifier;
use crate::strinfo::StringInfo;
use crate::tags::Tag;
use crate::theme::Theme;
use crate::widget;

/// One context's gadgets in creation order; the context head comes first.
pub(crate) struct GadgetList {
    pub(crate) context: GadgetId,
    pub(crate) order: Vec<GadgetId>,
}

pub struct Session<P: Platform> {
    pub(crate) platform: P,
    pub(crate) rp: RastPort,
    pub(crate) theme: Theme,
    pub(crate) config: SessionConfig,
    pub(crate) gadgets: SlotMap<GadgetId, Gadget>,
    pub(crate) lists: Vec<GadgetList>,
    pub(crate) queue: EventQueue,
    pub(crate) focus: Option<GadgetId>,
    pub(crate) tracker: MouseTracker,
    pub(crate) decoder: EscapeDecoder,
    pub(crate) qualifier: Qualifier,
    pub(crate) cursor_on: bool,
    next_tick: TimeVal,
    /// Events produced so far, queued or dropped.
    produced: u64,
}

impl<P: Platform> Session<P> {
    pub fn new(platform: P, rp: RastPort) -> Self {
        Self::with_config(platform, rp, Theme::workbench(), SessionConfig::default())
    }

    pub fn with_config(platform: P, rp: RastPort, theme: Theme, config: SessionConfig) -> Self {
        let next_tick = platform.now().add_millis(config.tick_interval_ms);
        Self {
            platform,
            rp,
            theme,
            config,
            gadgets: SlotMap::with_key(),
            lists: Vec::new(),
            queue: EventQueue::new(&config),
            focus: None,
            tracker: MouseTracker::new(),
            decoder: EscapeDecoder::new(),
            qualifier: Qualifier::empty(),
            cursor_on: true,
            next_tick,
            produced: 0,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn rastport(&self) -> &RastPort {
        &self.rp
    }

    pub fn rastport_mut(&mut self) -> &mut RastPort {
        &mut self.rp
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    /// Start a new gadget list. The returned head is the `prev` for the
    /// list's first gadget.
    pub fn create_context(&mut self) -> GadgetId {
        let context = self.gadgets.insert(Gadget::context());
        self.lists.push(GadgetList {
            context,
            order: alloc::vec![context],
        });
        log::debug!("session: new gadget list ({} total)", self.lists.len());
        context
    }

    /// Create a gadget linked after `prev`. Returns `None` when `prev` is
    /// `None` or does not resolve, so failed creations can be chained
    /// without checks and the failure surfaces at the end.
    pub fn create_gadget(
        &mut self,
        kind: Kind,
        prev: Option<GadgetId>,
        ng: &NewGadget,
        tags: &[Tag<'_>],
    ) -> Option<GadgetId> {
        let Some(prev) = prev else {
            log::debug!("session: no previous gadget; {:?} not created", kind);
            return None;
        };
        let Some((list, pos)) = self.locate(prev) else {
            log::warn!("session: previous gadget is not in any list; {:?} not created", kind);
            return None;
        };
        let gadget = create::build(kind, ng, tags, &self.theme);
        let id = self.gadgets.insert(gadget);
        self.lists[list].order.insert(pos + 1, id);
        Some(id)
    }

    /// Free a whole list, context head included. Focus, pointer tracking
    /// and queued events that referred to its gadgets are dropped.
    pub fn free_gadgets(&mut self, context: GadgetId) -> Result<(), Error> {
        let index = self
            .lists
            .iter()
            .position(|l| l.context == context)
            .ok_or(Error::UnknownList)?;
        let list = self.lists.remove(index);
        for &id in &list.order {
            self.gadgets.remove(id);
            self.tracker.forget(id);
            if self.focus == Some(id) {
                self.focus = None;
                self.decoder.reset();
            }
        }
        let gadgets = &self.gadgets;
        self.queue.purge(|id| !gadgets.contains_key(id));
        log::debug!("session: freed list of {} gadgets", list.order.len() - 1);
        Ok(())
    }

    /// List index and position of `id`.
    pub(crate) fn locate(&self, id: GadgetId) -> Option<(usize, usize)> {
        self.lists.iter().enumerate().find_map(|(li, list)| {
            list.order.iter().position(|&g| g == id).map(|pos| (li, pos))
        })
    }

    pub fn gadget(&self, id: GadgetId) -> Option<&Gadget> {
        self.gadgets.get(id)
    }

    /// Gadgets of a list in link order, head excluded.
    pub fn gadgets(&self, context: GadgetId) -> Result<&[GadgetId], Error> {
        self.lists
            .iter()
            .find(|l| l.context == context)
            .map(|l| &l.order[1..])
            .ok_or(Error::UnknownList)
    }

    pub fn string_info(&self, id: GadgetId) -> Result<&StringInfo, Error> {
        self.gadgets
            .get(id)
            .ok_or(Error::UnknownGadget)?
            .kind
            .string_info()
            .ok_or(Error::WrongKind)
    }

    /// Redraw every gadget of a list.
    pub fn refresh_gadgets(&mut self, context: GadgetId) -> Result<(), Error> {
        let index = self
            .lists
            .iter()
            .position(|l| l.context == context)
            .ok_or(Error::UnknownList)?;
        for i in 0..self.lists[index].order.len() {
            let id = self.lists[index].order[i];
            self.render_gadget(id);
        }
        Ok(())
    }

    pub fn render_gadget(&mut self, id: GadgetId) {
        let cursor_on = self.cursor_on;
        if let Some(g) = self.gadgets.get_mut(id) {
            widget::render(&mut self.rp, &self.theme, g, cursor_on);
        }
    }

    /// First enabled, clickable gadget under (x, y).
    pub fn hit_test(&self, x: i32, y: i32) -> Option<GadgetId> {
        self.lists
            .iter()
            .flat_map(|l| l.order.iter().copied())
            .find(|&id| self.gadgets.get(id).is_some_and(|g| g.hit(x, y)))
    }

    /// Queue an event stamped with the current pointer, qualifier and time.
    pub(crate) fn push(&mut self, class: Class, code: u16, gadget: Option<GadgetId>) {
        let gadget_id = gadget.and_then(|id| self.gadgets.get(id)).map_or(0, |g| g.id);
        let (mouse_x, mouse_y) = self.tracker.position();
        let event = Event {
            class,
            code,
            qualifier: self.qualifier,
            gadget,
            gadget_id,
            mouse_x,
            mouse_y,
            time: self.platform.now(),
        };
        self.produced += 1;
        log::trace!("session: {:?} code {:#x} gadget {}", class, code, gadget_id);
        self.queue.put(event);
    }

    /// Queue an application event (e.g. a synthetic menu pick).
    pub fn put_event(&mut self, event: Event) -> bool {
        self.produced += 1;
        self.queue.put(event)
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn dropped_events(&self) -> u64 {
        self.queue.dropped()
    }

    /// One pass over the input collaborators. Emits a tick if no symbol was
    /// read, no event was produced and the cadence has elapsed. Returns true
    /// if any event was produced.
    pub fn poll(&mut self) -> bool {
        let start = self.produced;
        let mut consumed = false;
        while let Some(symbol) = self.platform.next_symbol() {
            consumed = true;
            self.handle_symbol(symbol);
        }
        let pointer = self.platform.pointer();
        self.handle_pointer(pointer);
        if !consumed && self.produced == start && self.platform.reached(self.next_tick) {
            self.tick();
        }
        self.produced != start
    }

    /// Poll until the queue is non-empty.
    pub fn wait_for_event(&mut self) {
        while self.queue.is_empty() {
            if !self.poll() {
                core::hint::spin_loop();
            }
        }
    }

    /// Next queued event, without waiting.
    pub fn get_event(&mut self) -> Option<QueuedEvent> {
        self.queue.get()
    }

    /// Wait for and take the next event.
    pub fn next_event(&mut self) -> QueuedEvent {
        loop {
            if let Some(event) = self.queue.get() {
                return event;
            }
            if !self.poll() {
                core::hint::spin_loop();
            }
        }
    }

    /// Hand a consumed event back for reuse.
    pub fn ack_event(&mut self, event: QueuedEvent) {
        self.queue.ack(event);
    }

    fn tick(&mut self) {
        self.next_tick = self.platform.now().add_millis(self.config.tick_interval_ms);
        if let Some(id) = self.text_focus() {
            if self.config.cursor_blink {
                self.cursor_on = !self.cursor_on;
                self.render_gadget(id);
            }
        }
        self.push(Class::Tick, 0, self.focus);
    }

    pub(crate) fn handle_pointer(&mut self, pointer: PointerState) {
        self.qualifier.set_buttons(pointer.left, pointer.right);
        let hit = self.hit_test(pointer.x, pointer.y);
        let step = self.tracker.update(pointer, hit);

        if step.pressed_nowhere {
            self.deactivate_gadget();
            self.push(Class::ButtonDown, 0, None);
        }
        if step.released_nowhere {
            self.push(Class::ButtonUp, 0, None);
        }
        let Some((id, transition)) = step.transition else {
            return;
        };
        if transition == Transition::InitialClick && self.focus.is_some_and(|f| f != id) {
            self.deactivate_gadget();
        }
        let theme = self.theme;
        let Some(g) = self.gadgets.get_mut(id) else {
            return;
        };
        let reaction = widget::react(g, &theme, transition, pointer.x, pointer.y);
        let immediate = g.activation.contains(Activation::IMMEDIATE);

        if transition == Transition::InitialClick && immediate {
            self.push(Class::GadgetDown, reaction.down_code, Some(id));
        }
        if reaction.activate {
            self.activate_gadget(id);
        }
        if reaction.redraw {
            self.render_gadget(id);
        }
        if let Some(code) = reaction.up {
            self.push(Class::GadgetUp, code, Some(id));
        }
    }
}
