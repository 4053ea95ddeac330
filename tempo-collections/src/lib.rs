//! Fixed-capacity pools and binary heaps for cooperative schedulers.
//!
//! Every structure in this crate is sized once at construction and never
//! grows. Running out of room is an ordinary, recoverable result (the
//! value comes back to the caller) and the structure stays valid and
//! usable afterward. That makes these types suitable for control loops
//! that must not allocate after startup.
//!
//! # Design
//!
//! The larger structures separate *payload storage* from *ordering*:
//!
//! ```text
//! Pool<T, K>        - owns records, hands out stable integer keys
//! FixedHeap<T, O>   - array heap; stores either keys or inline payloads
//! IndexedHeap<V>    - heap over external ids with a reverse position map
//! ```
//!
//! A scheduler keeps its records in a [`Pool`] and pushes small
//! `(ordering key, pool key)` ranks into a [`FixedHeap`], so heap swaps
//! move a couple of words instead of whole records. [`IndexedHeap`] is the
//! variant for workloads that must *re-key* live entries (decrease-key and
//! friends) in O(log n).
//!
//! # Quick start
//!
//! ```
//! use tempo_collections::{MinHeap, Pool};
//!
//! let mut pool: Pool<&'static str> = Pool::with_capacity(8);
//! let mut heap: MinHeap<(u32, u32)> = MinHeap::with_capacity(8);
//!
//! let key = pool.try_insert("flush sensors").unwrap();
//! heap.try_push((5, key)).unwrap();
//!
//! let (_, key) = heap.pop().unwrap();
//! assert_eq!(pool.remove(key), Some("flush sensors"));
//! ```

#![warn(missing_docs)]

pub mod heap;
pub mod indexed;
pub mod key;
pub mod pool;

pub use heap::{FixedHeap, Max, MaxHeap, Min, MinHeap, Order};
pub use indexed::IndexedHeap;
pub use key::Key;
pub use pool::{Full, Pool};
