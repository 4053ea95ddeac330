//! Priority-ordered ready queue for cooperative tasks.
//!
//! Records live in a [`Pool`]; the heap orders two-word `(priority, slot)`
//! ranks, so sift swaps never move the boxed job. Lower priority value
//! runs first.

use crate::Rejected;

use tempo_collections::{MinHeap, Pool};

use std::cmp::Ordering;
use std::fmt;

/// Identifier of a queued task.
///
/// Plain index into the queue's record pool: after a task is popped or
/// cancelled, a later `schedule` may hand the same id out again. Holders
/// must not use an id past the task's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

/// A boxed one-shot job, run against the loop's context.
pub type Job<C> = Box<dyn FnOnce(&mut C)>;

struct TaskRecord<C> {
    priority: u8,
    job: Job<C>,
}

/// Heap rank: ordering is by priority alone; the slot tags along.
#[derive(Clone, Copy)]
struct Rank {
    priority: u8,
    slot: u32,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Rank {}

/// A task popped from a [`ReadyQueue`], ready to run.
pub struct Task<C> {
    priority: u8,
    job: Job<C>,
}

impl<C> Task<C> {
    /// Returns the task's priority (lower runs first).
    #[inline]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Consumes the task and invokes its job against `ctx`.
    #[inline]
    pub fn run(self, ctx: &mut C) {
        (self.job)(ctx);
    }
}

impl<C> fmt::Debug for Task<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Fixed-capacity, priority-ordered queue of one-shot tasks.
///
/// Equal priorities pop in arbitrary order.
///
/// # Example
///
/// ```
/// use tempo_sched::ReadyQueue;
///
/// let mut queue: ReadyQueue<Vec<u8>> = ReadyQueue::with_capacity(8);
///
/// queue.schedule(3, |out: &mut Vec<u8>| out.push(3)).unwrap();
/// queue.schedule(1, |out: &mut Vec<u8>| out.push(1)).unwrap();
/// queue.schedule(2, |out: &mut Vec<u8>| out.push(2)).unwrap();
///
/// let mut out = Vec::new();
/// while queue.run_one(&mut out) {}
/// assert_eq!(out, [1, 2, 3]);
/// ```
pub struct ReadyQueue<C> {
    slots: Pool<TaskRecord<C>, u32>,
    ranks: MinHeap<Rank>,
}

impl<C> ReadyQueue<C> {
    /// Creates a queue holding at most `capacity` tasks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Pool::with_capacity(capacity),
            ranks: MinHeap::with_capacity(capacity),
        }
    }

    /// Returns the maximum number of queued tasks.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of queued tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if no tasks are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns `true` if the queue is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Queues `job` at `priority` (lower value runs first).
    ///
    /// # Errors
    ///
    /// Returns `Err(Rejected(job))` at capacity; the queue is unchanged.
    pub fn schedule(
        &mut self,
        priority: u8,
        job: impl FnOnce(&mut C) + 'static,
    ) -> Result<TaskId, Rejected<Job<C>>> {
        let record = TaskRecord {
            priority,
            job: Box::new(job),
        };
        let slot = match self.slots.try_insert(record) {
            Ok(slot) => slot,
            Err(full) => return Err(Rejected(full.into_inner().job)),
        };

        // Pool and heap share a capacity, so this cannot be full here.
        let pushed = self.ranks.try_push(Rank { priority, slot });
        debug_assert!(pushed.is_ok());

        Ok(TaskId(slot))
    }

    /// Removes and returns the highest-priority task.
    pub fn pop(&mut self) -> Option<Task<C>> {
        let rank = self.ranks.pop()?;
        let record = self
            .slots
            .remove(rank.slot)
            .expect("rank refers to a live task record");
        Some(Task {
            priority: record.priority,
            job: record.job,
        })
    }

    /// Pops the highest-priority task and runs it against `ctx`.
    ///
    /// Returns `false` if the queue was empty.
    pub fn run_one(&mut self, ctx: &mut C) -> bool {
        match self.pop() {
            Some(task) => {
                task.run(ctx);
                true
            }
            None => false,
        }
    }

    /// Removes a queued task before it runs; its job is dropped uninvoked.
    ///
    /// Locates the rank by linear scan of the heap array. Returns `false`
    /// for unknown or already-popped ids, without mutating.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if self.slots.remove(id.0).is_none() {
            return false;
        }

        let pos = self
            .ranks
            .iter()
            .position(|rank| rank.slot == id.0)
            .expect("live task record had a rank");
        self.ranks.remove_at(pos);
        true
    }
}

impl<C> fmt::Debug for ReadyQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadyQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
