/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Frontier and reached table of a best-first search.

use crate::collections::{BinHeap, ItemPriQueue};
use crate::node::NodeId;

use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;

/// The frontier of a best-first search.
///
/// The frontier is a priority queue of node handles. It is not a set: when a
/// state is rediscovered with a better cost, a new node is pushed and the old
/// entry stays in the queue. Such stale entries must be filtered when they
/// are popped (see [`Reached::is_current`]).
pub struct Frontier<D> {
    heap: BinHeap<NodeId, D>,
}

impl<D> Default for Frontier<D> {
    fn default() -> Self {
        Frontier { heap: BinHeap::default() }
    }
}

impl<D> Frontier<D>
where
    D: Copy + PartialOrd,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Return `true` if the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Return the number of entries (including stale ones).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Push a node with the given priority.
    pub fn push(&mut self, node: NodeId, priority: D) {
        self.heap.push(node, priority)
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(NodeId, D)> {
        self.heap.pop_min()
    }

    /// Return the smallest priority in the frontier.
    pub fn top_priority(&self) -> Option<D> {
        self.heap.peek_min().map(|(_, &d)| d)
    }

    /// Iterate over all nodes in the frontier in heap order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.heap.iter().map(|(&u, _)| u)
    }
}

/// The reached table of a best-first search.
///
/// Maps each discovered state to the best node found so far. The states are
/// iterated in the order of their first discovery.
pub struct Reached<S> {
    nodes: HashMap<S, NodeId>,
    order: Vec<S>,
}

impl<S> Default for Reached<S> {
    fn default() -> Self {
        Reached {
            nodes: HashMap::new(),
            order: vec![],
        }
    }
}

impl<S> Reached<S>
where
    S: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the best node for `state`.
    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.nodes.get(state).copied()
    }

    /// Return `true` if `state` has been reached.
    pub fn contains(&self, state: &S) -> bool {
        self.nodes.contains_key(state)
    }

    /// Set the best node for `state`.
    pub fn insert(&mut self, state: S, node: NodeId) {
        match self.nodes.entry(state) {
            Entry::Occupied(mut e) => {
                e.insert(node);
            }
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(node);
            }
        }
    }

    /// Return `true` if `node` is the best known node for `state`.
    ///
    /// A frontier entry for which this returns `false` is stale.
    pub fn is_current(&self, state: &S, node: NodeId) -> bool {
        self.get(state) == Some(node)
    }

    /// Return the number of reached states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if no state has been reached.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all reached states in discovery order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.order.iter()
    }
}
