//! Dispatch queue ordered by `(priority, timestamp)`.
//!
//! Events are stored inline in the heap (no pool, no ids), so the
//! capacity bound is the heap array itself. Priority compares first
//! (lower wins), then timestamp (earlier wins). The timestamp tie-break
//! keeps a burst of same-priority events from starving each other, and
//! gives FIFO-within-priority exactly when the producer stamps events
//! with a monotone counter.

use tempo_collections::{Full, MinHeap};

use std::cmp::Ordering;
use std::fmt;

/// A queued event record.
///
/// `kind` names the source (a device enum, an opcode, whatever the
/// application dispatches on) and `data` is a small payload word. Neither
/// participates in ordering.
#[derive(Debug, Clone, Copy)]
pub struct Event<K> {
    /// What happened; dispatch on this.
    pub kind: K,
    /// Urgency; lower value dispatches first.
    pub priority: u8,
    /// Producer-assigned stamp; earlier dispatches first within a priority.
    pub timestamp: u64,
    /// Payload word accompanying the event.
    pub data: u32,
}

impl<K> Event<K> {
    /// Creates an event record.
    pub fn new(kind: K, priority: u8, timestamp: u64, data: u32) -> Self {
        Self {
            kind,
            priority,
            timestamp,
            data,
        }
    }
}

impl<K> Ord for Event<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.timestamp.cmp(&other.timestamp))
    }
}

impl<K> PartialOrd for Event<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> PartialEq for Event<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.timestamp == other.timestamp
    }
}

impl<K> Eq for Event<K> {}

/// Fixed-capacity event queue with deterministic composite ordering.
///
/// # Example
///
/// ```
/// use tempo_sched::{Event, EventQueue};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind {
///     ButtonDown,
///     UartRx,
/// }
///
/// let mut queue: EventQueue<Kind> = EventQueue::with_capacity(8);
///
/// queue.try_push(Event::new(Kind::UartRx, 2, 100, 0xFF)).unwrap();
/// queue.try_push(Event::new(Kind::ButtonDown, 0, 101, 1)).unwrap();
///
/// // The button wins on priority despite the later timestamp.
/// assert_eq!(queue.pop().unwrap().kind, Kind::ButtonDown);
/// assert_eq!(queue.pop().unwrap().kind, Kind::UartRx);
/// ```
pub struct EventQueue<K> {
    heap: MinHeap<Event<K>>,
}

impl<K> EventQueue<K> {
    /// Creates a queue holding at most `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: MinHeap::with_capacity(capacity),
        }
    }

    /// Returns the maximum number of queued events.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Returns the number of queued events.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no events are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` if the queue is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.heap.is_full()
    }

    /// Queues an event.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(event))` at capacity; the queue is unchanged.
    #[inline]
    pub fn try_push(&mut self, event: Event<K>) -> Result<(), Full<Event<K>>> {
        self.heap.try_push(event)
    }

    /// Removes and returns the next event in dispatch order.
    #[inline]
    pub fn pop(&mut self) -> Option<Event<K>> {
        self.heap.pop()
    }

    /// Returns the next event without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&Event<K>> {
        self.heap.peek()
    }

    /// Removes every queued event.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<K: fmt::Debug> fmt::Debug for EventQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("next", &self.peek())
            .finish_non_exhaustive()
    }
}
