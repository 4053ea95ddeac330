//! Deadline-ordered timer queue with one-shot and periodic arming.
//!
//! Deadlines are absolute tick counts on a caller-supplied timeline: the
//! queue's clock only moves when [`tick`](TimerQueue::tick) is called, so
//! a test (or a simulation) owns time completely. Hook records live in a
//! [`Pool`]; the heap orders `(deadline, slot)` pairs.
//!
//! Cancellation removes the pending heap entry by a linear scan of the
//! heap array. With the small capacities this queue targets, the scan is
//! cheaper to maintain than a reverse position map; the entry is then
//! extracted with the swap-with-last repair that fixes the hole in both
//! directions.

use crate::Rejected;

use tempo_collections::{MinHeap, Pool};

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU64;

/// Identifier of an armed timer.
///
/// Plain index into the queue's record pool: once a timer has fired (one-
/// shot) or been cancelled, a later arm may hand the same id out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// A boxed timer hook. Receives the firing timer's id and the loop
/// context; periodic hooks run once per expiry.
pub type TimerFn<C> = Box<dyn FnMut(TimerId, &mut C)>;

struct TimerRecord<C> {
    /// `None` = one-shot; `Some(p)` = rearm at `now + p` after each fire.
    period: Option<NonZeroU64>,
    hook: TimerFn<C>,
}

/// Pending heap entry: ordering is by deadline alone.
#[derive(Clone, Copy)]
struct Deadline {
    at: u64,
    slot: u32,
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Deadline {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Deadline {}

/// Fixed-capacity, deadline-ordered timer queue.
///
/// Hooks receive `(TimerId, &mut C)` and nothing else: a hook cannot
/// re-enter the queue, so arming and cancelling happen in the control
/// loop between ticks.
///
/// # Example
///
/// ```
/// use tempo_sched::TimerQueue;
///
/// let mut timers: TimerQueue<Vec<u64>> = TimerQueue::with_capacity(8);
///
/// timers.arm_oneshot(10, |_, fired: &mut Vec<u64>| fired.push(10)).unwrap();
///
/// let mut fired = Vec::new();
/// assert_eq!(timers.tick(9, &mut fired), 0);   // not due yet
/// assert_eq!(timers.tick(10, &mut fired), 1);  // fires exactly once
/// assert_eq!(timers.tick(20, &mut fired), 0);  // one-shot is consumed
/// assert_eq!(fired, [10]);
/// ```
pub struct TimerQueue<C> {
    slots: Pool<TimerRecord<C>, u32>,
    pending: MinHeap<Deadline>,
    now: u64,
}

impl<C> TimerQueue<C> {
    /// Creates a queue holding at most `capacity` armed timers.
    /// The clock starts at tick 0.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Pool::with_capacity(capacity),
            pending: MinHeap::with_capacity(capacity),
            now: 0,
        }
    }

    /// Returns the maximum number of armed timers.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of armed timers.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no timers are armed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if the queue is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Returns the queue's clock: the time passed to the last
    /// [`tick`](Self::tick), or 0 before the first.
    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arms a timer that fires once, `delay` ticks from now.
    ///
    /// # Errors
    ///
    /// Returns `Err(Rejected(hook))` at capacity; the queue is unchanged.
    pub fn arm_oneshot(
        &mut self,
        delay: u64,
        hook: impl FnMut(TimerId, &mut C) + 'static,
    ) -> Result<TimerId, Rejected<TimerFn<C>>> {
        self.arm(delay, None, Box::new(hook))
    }

    /// Arms a timer that first fires `delay` ticks from now, then every
    /// `period` ticks until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `Err(Rejected(hook))` at capacity; the queue is unchanged.
    pub fn arm_periodic(
        &mut self,
        delay: u64,
        period: NonZeroU64,
        hook: impl FnMut(TimerId, &mut C) + 'static,
    ) -> Result<TimerId, Rejected<TimerFn<C>>> {
        self.arm(delay, Some(period), Box::new(hook))
    }

    fn arm(
        &mut self,
        delay: u64,
        period: Option<NonZeroU64>,
        hook: TimerFn<C>,
    ) -> Result<TimerId, Rejected<TimerFn<C>>> {
        let slot = match self.slots.try_insert(TimerRecord { period, hook }) {
            Ok(slot) => slot,
            Err(full) => return Err(Rejected(full.into_inner().hook)),
        };

        // Pool and heap share a capacity, so this cannot be full here.
        let at = self.now + delay;
        let pushed = self.pending.try_push(Deadline { at, slot });
        debug_assert!(pushed.is_ok());

        Ok(TimerId(slot))
    }

    /// Disarms a pending timer; its hook is dropped and never fires again.
    ///
    /// Returns `false` for unknown, already-fired one-shot, or already-
    /// cancelled ids, without mutating.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.slots.remove(id.0).is_none() {
            return false;
        }

        let pos = self
            .pending
            .iter()
            .position(|deadline| deadline.slot == id.0)
            .expect("live timer record had a pending entry");
        self.pending.remove_at(pos);
        true
    }

    /// Advances the clock to `current_time` and fires everything due.
    ///
    /// Expired timers fire in deadline order (ties arbitrary). A periodic
    /// timer is re-armed at `current_time + period` after its hook runs:
    /// cadence is measured from the tick that fired it, as a polled loop
    /// observes time. Returns the number of hooks fired.
    ///
    /// A `current_time` earlier than the clock does not rewind it; only
    /// entries with deadlines at or before `current_time` fire.
    pub fn tick(&mut self, current_time: u64, ctx: &mut C) -> usize {
        self.now = self.now.max(current_time);

        let mut fired = 0;
        while let Some(head) = self.pending.peek() {
            if head.at > current_time {
                break;
            }
            let slot = self
                .pending
                .pop()
                .expect("peeked entry can be popped")
                .slot;
            let id = TimerId(slot);

            let period = {
                let record = self
                    .slots
                    .get_mut(slot)
                    .expect("pending entry refers to a live timer record");
                (record.hook)(id, ctx);
                record.period
            };
            fired += 1;

            match period {
                Some(period) => {
                    let at = current_time + period.get();
                    let pushed = self.pending.try_push(Deadline { at, slot });
                    debug_assert!(pushed.is_ok());
                }
                None => {
                    self.slots.remove(slot);
                }
            }
        }
        fired
    }

    /// Returns ticks remaining until the nearest deadline: `None` when no
    /// timer is armed, `Some(0)` when one is already due. Callers use this
    /// to pick a sleep or poll interval.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending
            .peek()
            .map(|deadline| deadline.at.saturating_sub(self.now))
    }
}

impl<C> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
