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

//! Heuristic functions and precomputed heuristic tables.
//!
//! A heuristic estimates the remaining cost from some state to a goal state.
//! For A* to return optimal paths, the heuristic must be *admissible* (never
//! overestimate) and *consistent* (satisfy $h(u) \le w(u,v) + h(v)$ for each
//! transition $(u,v)$).
//!
//! Instead of evaluating the heuristic for each generated node, the informed
//! searches read the values from a [`HeuristicTable`] that is computed once
//! for all states reachable from the initial state.
//!
//! # Example
//!
//! ```
//! use bestfirst::heuristic::build_table;
//! use bestfirst::maze::{manhattan, Maze};
//!
//! let maze = Maze::from_ascii(
//!     "
//!     S..
//!     .#.
//!     ..G
//!     ",
//! )
//! .unwrap();
//!
//! let table = build_table(&maze, &maze.goal_cell(), manhattan);
//! assert_eq!(table.len(), 8);
//! assert_eq!(table.get(&(0, 0)), 4.0);
//! assert_eq!(table.get(&(2, 2)), 0.0);
//! // the wall is not reachable, its value defaults to 0
//! assert_eq!(table.get(&(1, 1)), 0.0);
//! ```

use crate::problem::Problem;

use num_traits::Zero;

use std::collections::hash_map::{self, HashMap};
use std::collections::VecDeque;
use std::hash::Hash;

/// A heuristic estimating the distance between two states.
pub trait Heuristic<S> {
    type Result;

    fn call(&self, state: &S, goal: &S) -> Self::Result;
}

impl<F, S, D> Heuristic<S> for F
where
    F: Fn(&S, &S) -> D,
{
    type Result = D;

    fn call(&self, state: &S, goal: &S) -> D {
        (*self)(state, goal)
    }
}

/// Precomputed heuristic values for a set of states.
///
/// States not contained in the table have the value `0`.
#[derive(Clone, Debug)]
pub struct HeuristicTable<S, D>
where
    S: Eq + Hash,
{
    values: HashMap<S, D>,
}

impl<S, D> Default for HeuristicTable<S, D>
where
    S: Eq + Hash,
{
    fn default() -> Self {
        HeuristicTable { values: HashMap::new() }
    }
}

impl<S, D> HeuristicTable<S, D>
where
    S: Eq + Hash,
    D: Copy + Zero,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the heuristic value of `state` (`0` if unknown).
    pub fn get(&self, state: &S) -> D {
        self.values.get(state).copied().unwrap_or_else(D::zero)
    }

    /// Set the heuristic value of `state`.
    pub fn insert(&mut self, state: S, value: D) {
        self.values.insert(state, value);
    }

    /// Return `true` if the table contains a value for `state`.
    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    /// Return the number of states in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all states and their values.
    pub fn iter(&self) -> hash_map::Iter<'_, S, D> {
        self.values.iter()
    }
}

impl<S, D> std::iter::FromIterator<(S, D)> for HeuristicTable<S, D>
where
    S: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        HeuristicTable {
            values: iter.into_iter().collect(),
        }
    }
}

/// Compute the heuristic values of all states reachable from the initial
/// state of `problem`.
///
/// The reachable states are enumerated by a breadth-first traversal of the
/// problem's transitions. For each such state `s` the table contains
/// `heur(s, goal)`.
pub fn build_table<P, H>(problem: &P, goal: &P::State, heur: H) -> HeuristicTable<P::State, P::Cost>
where
    P: Problem,
    H: Heuristic<P::State, Result = P::Cost>,
{
    let mut values = HashMap::new();
    let mut queue = VecDeque::new();

    let start = problem.initial();
    values.insert(start.clone(), heur.call(&start, goal));
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        for a in problem.actions(&u) {
            let v = problem.result(&u, &a);
            if !values.contains_key(&v) {
                values.insert(v.clone(), heur.call(&v, goal));
                queue.push_back(v);
            }
        }
    }

    log::debug!("Heuristic table with {} states", values.len());

    HeuristicTable { values }
}
