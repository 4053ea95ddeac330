//! Cooperative task, timer, and event queues over fixed-capacity heaps.
//!
//! Three single-threaded building blocks for a control loop that polls
//! rather than preempts:
//!
//! - [`ReadyQueue`] runs the highest-priority queued task next.
//! - [`TimerQueue`] fires hooks at caller-supplied tick deadlines, with
//!   one-shot and periodic arming and cancellation by id.
//! - [`EventQueue`] drains records in `(priority, timestamp)` order.
//!
//! Time never comes from a clock: the loop passes the current tick into
//! [`TimerQueue::tick`], which makes every queue deterministic and
//! testable. Work items are closures over a caller-owned context type `C`;
//! the queues hand `&mut C` to whatever they run and never expose
//! themselves to it, so a running hook cannot observe a queue mid-repair.
//!
//! Nothing here is safe for concurrent use. The intended shapes are a
//! single loop owning all three queues, or an interrupt-style producer
//! whose caller excludes the drain while enqueuing.
//!
//! # Example
//!
//! ```
//! use tempo_sched::{ReadyQueue, TimerQueue};
//!
//! // The context threaded through every task and timer hook.
//! #[derive(Default)]
//! struct Ctx {
//!     log: Vec<&'static str>,
//! }
//!
//! let mut ctx = Ctx::default();
//! let mut ready: ReadyQueue<Ctx> = ReadyQueue::with_capacity(8);
//! let mut timers: TimerQueue<Ctx> = TimerQueue::with_capacity(8);
//!
//! ready.schedule(2, |ctx: &mut Ctx| ctx.log.push("background")).unwrap();
//! ready.schedule(0, |ctx: &mut Ctx| ctx.log.push("urgent")).unwrap();
//! timers.arm_oneshot(10, |_, ctx: &mut Ctx| ctx.log.push("deadline")).unwrap();
//!
//! while ready.run_one(&mut ctx) {}
//! timers.tick(10, &mut ctx);
//!
//! assert_eq!(ctx.log, ["urgent", "background", "deadline"]);
//! ```

#![warn(missing_docs)]

use std::fmt;

pub mod event;
pub mod ready;
pub mod timer;

pub use event::{Event, EventQueue};
pub use ready::{Job, ReadyQueue, Task, TaskId};
pub use timer::{TimerFn, TimerId, TimerQueue};

/// Error returned when a queue is at capacity.
///
/// Carries the rejected job or hook back to the caller, which may retry
/// after draining or drop it deliberately. The queue is untouched.
#[derive(Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue is at capacity")]
pub struct Rejected<T>(pub T);

impl<T> Rejected<T> {
    /// Returns the job or hook that could not be queued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Hand-written: the payload is usually a boxed closure, which is not Debug.
impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is at capacity")
    }
}
