// Copyright (c) 2016, 2017, 2020 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Binary heap implementation

use crate::collections::ItemPriQueue;

use num_traits::{FromPrimitive, ToPrimitive};

/// Heap slot information.
struct BinHeapSlot<K, V, ID> {
    /// The key stored in this slot.
    key: K,
    /// The value (priority) of the key.
    value: V,
    /// Position of this slot on the heap. If the slot is free, this is
    /// the index of the next free slot.
    pos: ID,
}

/// Simple binary heap data structure.
///
/// Keys and values are stored in slots which are recycled after an element
/// has been popped, the heap itself only stores slot indices of type `ID`.
pub struct BinHeap<K, V, ID = u32> {
    /// The heap elements (slot indices).
    heap: Vec<ID>,
    /// The slots.
    data: Vec<BinHeapSlot<K, V, ID>>,
    /// First free slot.
    free: Option<ID>,
}

impl<K, V> BinHeap<K, V> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<K, V, ID> Default for BinHeap<K, V, ID> {
    fn default() -> Self {
        BinHeap {
            heap: vec![],
            data: vec![],
            free: None,
        }
    }
}

/// Convert a slot id to an index.
///
/// Panics if the id type cannot represent the index (i.e. too many elements
/// for `ID`).
fn idx<ID: ToPrimitive>(id: &ID) -> usize {
    id.to_usize().expect("heap slot id out of range")
}

/// Convert an index to a slot id.
fn id<ID: FromPrimitive>(idx: usize) -> ID {
    ID::from_usize(idx).expect("too many heap elements for slot id type")
}

impl<K, V, ID> BinHeap<K, V, ID> {
    /// Iterate over all elements in the heap in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_
    where
        ID: ToPrimitive,
    {
        self.heap.iter().map(move |i| {
            let slot = &self.data[idx(i)];
            (&slot.key, &slot.value)
        })
    }
}

impl<K, V, ID> ItemPriQueue<K, V> for BinHeap<K, V, ID>
where
    K: Clone,
    V: PartialOrd + Clone,
    ID: FromPrimitive + ToPrimitive + Copy + Eq,
{
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.data.clear();
        self.free = None;
    }

    fn push(&mut self, key: K, value: V) {
        let pos = id(self.heap.len());
        let slot = if let Some(slot) = self.free {
            let i = idx(&slot);
            // take from free list
            let next = self.data[i].pos;
            self.free = if next == slot { None } else { Some(next) };
            self.data[i] = BinHeapSlot { key, value, pos };
            slot
        } else {
            let slot = id(self.data.len());
            self.data.push(BinHeapSlot { key, value, pos });
            slot
        };
        self.heap.push(slot);
        self.upheap(slot);
    }

    fn pop_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }

        // remove the smallest element from the heap
        let min_slot = self.heap.swap_remove(0);
        let min_idx = idx(&min_slot);
        // put its slot in the free list, a slot pointing to itself ends the list
        self.data[min_idx].pos = self.free.unwrap_or(min_slot);
        self.free = Some(min_slot);

        if !self.heap.is_empty() {
            self.downheap(self.heap[0]);
        }
        let slot = &self.data[min_idx];
        Some((slot.key.clone(), slot.value.clone()))
    }

    fn peek_min(&self) -> Option<(&K, &V)> {
        self.heap.first().map(|i| {
            let slot = &self.data[idx(i)];
            (&slot.key, &slot.value)
        })
    }
}

impl<K, V, ID> BinHeap<K, V, ID>
where
    V: PartialOrd + Clone,
    ID: FromPrimitive + ToPrimitive + Copy + Eq,
{
    /// Move the element `slot` up in the heap until its parent does not have a
    /// larger value or the root is reached.
    fn upheap(&mut self, slot: ID) {
        let i = idx(&slot);
        let value = self.data[i].value.clone();
        let mut cur_pos = idx(&self.data[i].pos);
        while cur_pos > 0 {
            let parent_pos = (cur_pos - 1) / 2;
            let parent_idx = idx(&self.heap[parent_pos]);
            // equal values move up, ties are resolved deterministically by heap order
            if value > self.data[parent_idx].value {
                break;
            }
            self.heap[cur_pos] = self.heap[parent_pos];
            self.data[parent_idx].pos = id(cur_pos);
            cur_pos = parent_pos;
        }
        self.data[i].pos = id(cur_pos);
        self.heap[cur_pos] = slot;
    }

    /// Move the element `slot` at the root down until no child has a smaller
    /// value.
    fn downheap(&mut self, slot: ID) {
        let n = self.heap.len();
        let i = idx(&slot);
        let value = self.data[i].value.clone();
        let mut cur_pos = 0;
        loop {
            let left_pos = 2 * cur_pos + 1;
            let right_pos = left_pos + 1;
            let (next_pos, next_idx) = if left_pos >= n {
                break;
            } else if right_pos >= n {
                (left_pos, idx(&self.heap[left_pos]))
            } else {
                let left_idx = idx(&self.heap[left_pos]);
                let right_idx = idx(&self.heap[right_pos]);
                if self.data[left_idx].value < self.data[right_idx].value {
                    (left_pos, left_idx)
                } else {
                    (right_pos, right_idx)
                }
            };

            if value <= self.data[next_idx].value {
                break;
            }

            self.heap[cur_pos] = self.heap[next_pos];
            self.data[next_idx].pos = id(cur_pos);
            cur_pos = next_pos;
        }
        self.heap[cur_pos] = slot;
        self.data[i].pos = id(cur_pos);
    }
}

#[cfg(test)]
mod tests {
    use super::BinHeap;
    use crate::collections::ItemPriQueue;

    #[test]
    fn test_sorted_pops() {
        let mut heap = BinHeap::new();
        for (i, &v) in [5, 3, 9, 1, 7, 3, 8, 0].iter().enumerate() {
            heap.push(i, v);
        }
        assert_eq!(heap.len(), 8);
        assert_eq!(heap.peek_min(), Some((&7, &0)));

        let mut values = vec![];
        while let Some((_, v)) = heap.pop_min() {
            values.push(v);
        }
        assert_eq!(values, vec![0, 1, 3, 3, 5, 7, 8, 9]);
        assert!(heap.is_empty());
        assert_eq!(heap.peek_min(), None);
    }

    #[test]
    fn test_duplicate_keys() {
        let mut heap = BinHeap::new();
        heap.push('a', 4.0);
        heap.push('a', 2.0);
        heap.push('b', 3.0);
        assert_eq!(heap.pop_min(), Some(('a', 2.0)));
        assert_eq!(heap.pop_min(), Some(('b', 3.0)));
        assert_eq!(heap.pop_min(), Some(('a', 4.0)));
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn test_slot_reuse() {
        let mut heap = BinHeap::new();
        for round in 0..10 {
            heap.push(round, round);
            heap.push(round + 100, round + 100);
            assert_eq!(heap.pop_min(), Some((round, round)));
        }
        // only the large keys are left
        assert_eq!(heap.len(), 10);
        let mut keys = heap.iter().map(|(&k, _)| k).collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, (100..110).collect::<Vec<_>>());
        assert_eq!(heap.pop_min(), Some((100, 100)));

        heap.clear();
        assert!(heap.is_empty());
        heap.push(1, 1);
        assert_eq!(heap.peek_min(), Some((&1, &1)));
    }

    #[test]
    fn test_equal_values() {
        let mut heap = BinHeap::new();
        heap.push(1, 0);
        heap.push(2, 0);
        assert_eq!(heap.pop_min().map(|(k, _)| k), Some(2));
        assert_eq!(heap.pop_min().map(|(k, _)| k), Some(1));

        // the order among equal values only depends on the operations
        let run = || {
            let mut heap = BinHeap::new();
            let mut keys = vec![];
            for i in 0..20 {
                heap.push(i, i % 3);
                if i % 4 == 3 {
                    keys.extend(heap.pop_min().map(|(k, _)| k));
                }
            }
            while let Some((k, _)) = heap.pop_min() {
                keys.push(k);
            }
            keys
        };
        assert_eq!(run(), run());
    }
}
