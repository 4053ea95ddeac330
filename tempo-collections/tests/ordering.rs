//! Randomized operation sequences checked against independent references.

use proptest::prelude::*;

use tempo_collections::{IndexedHeap, MaxHeap, MinHeap, Order, Pool};

fn heap_order_holds<T: Ord, O: Order>(heap: &tempo_collections::FixedHeap<T, O>) -> bool {
    let items: Vec<&T> = heap.iter().collect();
    (1..items.len()).all(|i| !O::precedes(items[i], items[(i - 1) / 2]))
}

#[derive(Debug, Clone)]
enum HeapOp {
    Push(u32),
    Pop,
    RemoveAt(usize),
}

fn heap_ops() -> impl Strategy<Value = Vec<HeapOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<u32>().prop_map(HeapOp::Push),
            2 => Just(HeapOp::Pop),
            1 => any::<usize>().prop_map(HeapOp::RemoveAt),
        ],
        0..200,
    )
}

proptest! {
    /// The heap invariant survives every push/pop/remove_at interleaving,
    /// and pop always returns the minimum of what a sorted mirror holds.
    #[test]
    fn min_heap_matches_sorted_mirror(ops in heap_ops()) {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(64);
        let mut mirror: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                HeapOp::Push(v) => {
                    let accepted = heap.try_push(v).is_ok();
                    prop_assert_eq!(accepted, mirror.len() < 64);
                    if accepted {
                        mirror.push(v);
                    }
                }
                HeapOp::Pop => {
                    let expected = mirror.iter().min().copied();
                    let got = heap.pop();
                    prop_assert_eq!(got, expected);
                    if let Some(v) = got {
                        let at = mirror.iter().position(|&m| m == v).unwrap();
                        mirror.swap_remove(at);
                    }
                }
                HeapOp::RemoveAt(raw) => {
                    if heap.is_empty() {
                        continue;
                    }
                    let pos = raw % heap.len();
                    let removed = heap.remove_at(pos).unwrap();
                    let at = mirror.iter().position(|&m| m == removed).unwrap();
                    mirror.swap_remove(at);
                }
            }
            prop_assert!(heap_order_holds(&heap));
            prop_assert_eq!(heap.len(), mirror.len());
        }

        let drained: Vec<u32> = std::iter::from_fn(|| heap.pop()).collect();
        mirror.sort_unstable();
        prop_assert_eq!(drained, mirror);
    }

    /// Max-heap drains in descending order.
    #[test]
    fn max_heap_drains_descending(values in prop::collection::vec(any::<u32>(), 0..64)) {
        let mut heap: MaxHeap<u32> = MaxHeap::with_capacity(64);
        for &v in &values {
            heap.try_push(v).unwrap();
        }

        let drained: Vec<u32> = std::iter::from_fn(|| heap.pop()).collect();
        let mut expected = values;
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(drained, expected);
    }
}

#[derive(Debug, Clone)]
enum IndexedOp {
    Insert(usize, i32),
    DecreaseKey(usize, i32),
    Update(usize, i32),
    PopMin,
}

fn indexed_ops() -> impl Strategy<Value = Vec<IndexedOp>> {
    let id = 0..24usize;
    let key = -1000..1000i32;
    prop::collection::vec(
        prop_oneof![
            3 => (id.clone(), key.clone()).prop_map(|(i, k)| IndexedOp::Insert(i, k)),
            2 => (id.clone(), key.clone()).prop_map(|(i, k)| IndexedOp::DecreaseKey(i, k)),
            2 => (id, key).prop_map(|(i, k)| IndexedOp::Update(i, k)),
            2 => Just(IndexedOp::PopMin),
        ],
        0..200,
    )
}

proptest! {
    /// The indexed heap agrees with a BTreeMap reference at every step:
    /// same membership, same keys, same minimum, and the documented
    /// accept/reject rule for every operation.
    #[test]
    fn indexed_heap_matches_map_reference(ops in indexed_ops()) {
        use std::collections::BTreeMap;

        let mut heap: IndexedHeap<i32> = IndexedHeap::with_capacity(16);
        let mut reference: BTreeMap<usize, i32> = BTreeMap::new();

        for op in ops {
            match op {
                IndexedOp::Insert(id, key) => {
                    let accepted = heap.insert(id, key);
                    let expected = id < 16 && !reference.contains_key(&id);
                    prop_assert_eq!(accepted, expected);
                    if accepted {
                        reference.insert(id, key);
                    }
                }
                IndexedOp::DecreaseKey(id, key) => {
                    let accepted = heap.decrease_key(id, key);
                    let expected = reference.get(&id).is_some_and(|&old| key < old);
                    prop_assert_eq!(accepted, expected);
                    if accepted {
                        reference.insert(id, key);
                    }
                }
                IndexedOp::Update(id, key) => {
                    let accepted = heap.update(id, key);
                    prop_assert_eq!(accepted, reference.contains_key(&id));
                    if accepted {
                        reference.insert(id, key);
                    }
                }
                IndexedOp::PopMin => {
                    let got = heap.pop_min();
                    // Minimum key; among equals the heap may pick any id.
                    let expected_key = reference.values().min().copied();
                    prop_assert_eq!(got.map(|(_, k)| k), expected_key);
                    if let Some((id, key)) = got {
                        prop_assert_eq!(reference.remove(&id), Some(key));
                    }
                }
            }

            prop_assert_eq!(heap.len(), reference.len());
            for id in 0..16 {
                prop_assert_eq!(heap.contains(id), reference.contains_key(&id));
                prop_assert_eq!(heap.get(id), reference.get(&id));
            }
        }
    }
}

#[derive(Debug, Clone)]
enum PoolOp {
    Insert(u64),
    Remove(usize),
}

proptest! {
    /// Pool occupancy bookkeeping under random insert/remove: lookups,
    /// lengths, and capacity failures all track a HashMap reference.
    #[test]
    fn pool_matches_map_reference(
        ops in prop::collection::vec(
            prop_oneof![
                2 => any::<u64>().prop_map(PoolOp::Insert),
                1 => (0..12usize).prop_map(PoolOp::Remove),
            ],
            0..150,
        )
    ) {
        use std::collections::HashMap;

        let mut pool: Pool<u64> = Pool::with_capacity(12);
        let mut reference: HashMap<u32, u64> = HashMap::new();

        for op in ops {
            match op {
                PoolOp::Insert(v) => match pool.try_insert(v) {
                    Ok(key) => {
                        prop_assert!(reference.len() < 12);
                        prop_assert_eq!(reference.insert(key, v), None);
                    }
                    Err(full) => {
                        prop_assert_eq!(reference.len(), 12);
                        prop_assert_eq!(full.into_inner(), v);
                    }
                },
                PoolOp::Remove(raw) => {
                    let key = raw as u32;
                    prop_assert_eq!(pool.remove(key), reference.remove(&key));
                }
            }

            prop_assert_eq!(pool.len(), reference.len());
            for key in 0..12u32 {
                prop_assert_eq!(pool.get(key), reference.get(&key));
            }
        }
    }
}
