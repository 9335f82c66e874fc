//! Sweep events and the lazily-invalidated event queue

use glam::DVec2;
use std::cmp::Ordering;

use crate::diagram::SiteId;
use crate::geometry::compare_events;

use super::beach_line::ArcId;

/// Stable handle of an event inside an [`EventQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

/// Payload of an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// The sweep line reaches an input site
    Site(SiteId),
    /// The arc `arc` shrinks to a point at `center`
    Circle { arc: ArcId, center: DVec2 },
}

/// Lazy-deletion state of a queued event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    Pending,
    /// A topology change made the prediction stale; skipped when popped
    Superseded,
}

/// A site or circle event, ordered by its sweep position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Tie-break coordinate
    pub x: f64,
    /// Sweep coordinate
    pub y: f64,
    pub kind: EventKind,
    pub state: EventState,
}

impl Event {
    pub fn site(site: SiteId, position: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            kind: EventKind::Site(site),
            state: EventState::Pending,
        }
    }

    /// Circle event fired when the sweep reaches `sweep_y`
    pub fn circle(arc: ArcId, center: DVec2, sweep_y: f64) -> Self {
        Self {
            x: center.x,
            y: sweep_y,
            kind: EventKind::Circle { arc, center },
            state: EventState::Pending,
        }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state == EventState::Pending
    }
}

/// Priority queue of events in sweep order
///
/// Events live in an arena so that arcs can hold an [`EventId`] and mark a
/// queued prediction as superseded without removing it. The order vector is
/// kept sorted from lowest to highest priority, so the next event is always
/// at the back. Events with identical keys pop in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<Event>,
    queued: Vec<bool>,
    order: Vec<EventId>,
    pending: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from an initial batch of events
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut queue = Self::new();
        for event in events {
            queue.insert(event);
        }
        queue
    }

    /// Queue an event and return its handle
    pub fn insert(&mut self, event: Event) -> EventId {
        let id = EventId(self.events.len());
        let key = event.position();
        self.events.push(event);
        self.queued.push(true);

        let events = &self.events;
        let index = self
            .order
            .partition_point(|queued| compare_events(events[queued.0].position(), key) == Ordering::Greater);
        self.order.insert(index, id);

        if event.is_pending() {
            self.pending += 1;
        }
        id
    }

    /// Remove and return the next pending event, discarding superseded ones
    pub fn pop(&mut self) -> Option<(EventId, Event)> {
        while let Some(id) = self.order.pop() {
            self.queued[id.0] = false;
            let event = self.events[id.0];
            if event.is_pending() {
                self.pending -= 1;
                return Some((id, event));
            }
        }
        None
    }

    /// The next pending event without removing it
    pub fn peek(&self) -> Option<&Event> {
        self.order
            .iter()
            .rev()
            .map(|id| &self.events[id.0])
            .find(|event| event.is_pending())
    }

    /// Mark a queued event as superseded
    ///
    /// Returns `false` if the event was already superseded.
    pub fn invalidate(&mut self, id: EventId) -> bool {
        let Some(event) = self.events.get_mut(id.0) else {
            return false;
        };
        if !event.is_pending() {
            return false;
        }
        event.state = EventState::Superseded;
        if self.queued[id.0] {
            self.pending -= 1;
        }
        true
    }

    /// Look up any event ever inserted, consumed or not
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.0)
    }

    /// Whether no pending event remains
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Number of pending events
    #[inline]
    pub fn len(&self) -> usize {
        self.pending
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.queued.clear();
        self.order.clear();
        self.pending = 0;
    }
}
