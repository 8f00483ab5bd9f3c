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

//! Search problems.
//!
//! A search problem describes an implicit graph: the nodes are *states*, the
//! edges are given by the *actions* available in each state and the state
//! resulting from applying an action. The graph is never built explicitly,
//! the search algorithms only ask for the successors of the states they
//! visit.

use num_traits::{One, Zero};

use std::hash::Hash;
use std::ops::Add;

/// Numeric type of path costs and priorities.
///
/// This is implemented for all types providing the required operations,
/// e.g. `f64`, `u32` or `usize`.
pub trait Cost: Copy + PartialOrd + Zero + One + Add<Output = Self> {}

impl<T> Cost for T where T: Copy + PartialOrd + Zero + One + Add<Output = T> {}

/// A single-pair search problem.
///
/// All step costs must be non-negative, otherwise neither Dijkstra's
/// algorithm nor A* return optimal paths.
pub trait Problem {
    /// The type of states.
    type State: Clone + Eq + Hash;
    /// The type of actions, i.e. the transition labels.
    type Action: Clone;
    /// The type of path costs.
    type Cost: Cost;

    /// Return the initial state.
    fn initial(&self) -> Self::State;

    /// Return `true` if `state` is a goal state.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Return all actions applicable in `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Return the state reached by applying `action` in `state`.
    ///
    /// The action must be one of the actions returned by
    /// [`actions`](Problem::actions) for this state.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Return the cost of moving from `state` to `next` via `action`.
    ///
    /// The default is a unit cost for each step.
    fn action_cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> Self::Cost {
        Self::Cost::one()
    }

    /// Return the goal state, if the problem has a single known goal.
    fn goal(&self) -> Option<Self::State> {
        None
    }

    /// Return the heuristic estimate of the remaining cost from `state`.
    ///
    /// This value is used for the `h` value of nodes if no precomputed
    /// [`HeuristicTable`](crate::heuristic::HeuristicTable) is given. The
    /// default is `0`, i.e. no information. Estimates computed from a goal
    /// state and a distance function are provided by
    /// [`build_table`](crate::heuristic::build_table).
    fn heuristic(&self, _state: &Self::State) -> Self::Cost {
        Self::Cost::zero()
    }
}

impl<'a, P> Problem for &'a P
where
    P: Problem,
{
    type State = P::State;
    type Action = P::Action;
    type Cost = P::Cost;

    fn initial(&self) -> Self::State {
        (**self).initial()
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        (**self).is_goal(state)
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        (**self).actions(state)
    }

    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        (**self).result(state, action)
    }

    fn action_cost(&self, state: &Self::State, action: &Self::Action, next: &Self::State) -> Self::Cost {
        (**self).action_cost(state, action, next)
    }

    fn goal(&self) -> Option<Self::State> {
        (**self).goal()
    }

    fn heuristic(&self, state: &Self::State) -> Self::Cost {
        (**self).heuristic(state)
    }
}
