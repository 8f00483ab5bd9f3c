/*
 * Copyright (c) 2019, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Bidirectional best-first search.
//!
//! The search runs two best-first searches in turns: a forward search on the
//! given problem starting at the initial state and a backward search on a
//! second problem starting at the goal state (usually the same problem with
//! initial and goal state swapped, see [`Swapped`]). In each step the
//! direction whose frontier has the smaller top priority is advanced by
//! expanding one node (the forward direction wins ties).
//!
//! Whenever a newly reached state has already been reached by the opposite
//! direction, both search trees meet. The two half paths are joined into a
//! single path from the initial state to the goal state whose cost is the sum
//! of both half path costs.
//!
//! With [`Termination::FirstMeeting`] the search stops at the first meeting.
//! This is fast but the joined path is not necessarily a shortest one. With
//! [`Termination::Bounded`] the search continues until the sum of both top
//! priorities is at least the cost of the best meeting found so far. If both
//! evaluation functions are `f = g`, the returned path is a shortest path.
//!
//! The backward problem must be the reverse of the forward problem, i.e. for
//! each transition from `u` to `v` in one problem there must be a transition
//! from `v` to `u` in the other. The actions of the backward half of the
//! joined path are taken from the forward problem; if no action connects two
//! consecutive states, [`Error::InvalidTransition`] is returned.
//!
//! # Example
//!
//! ```
//! use bestfirst::maze::Maze;
//! use bestfirst::node::uninformed;
//! use bestfirst::search::{Bidirectional, Termination};
//!
//! let maze = Maze::from_ascii(
//!     "
//!     S....
//!     .###.
//!     ....G
//!     ",
//! )
//! .unwrap();
//! let reversed = maze.reversed();
//!
//! let sol = Bidirectional::new(&maze, uninformed, &reversed, uninformed)
//!     .with_termination(Termination::Bounded)
//!     .run()
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(sol.cost(), 6.0);
//! let path = sol.path();
//! assert_eq!(path.len(), 7);
//! assert_eq!(path[0], (0, 0));
//! assert_eq!(path[6], (2, 4));
//! ```

use super::bestfirst::{Dominance, Side};
use super::{action_between, Error, ProblemNode, ProblemSolution, Solution};
use crate::adapters::Swapped;
use crate::heuristic::HeuristicTable;
use crate::node::{self, NodeId};
use crate::observe::{Direction, Event, NoObserver, Observer};
use crate::problem::Problem;

use num_traits::Zero;

/// Stopping rule of a bidirectional search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// Stop as soon as both searches meet.
    FirstMeeting,
    /// Stop when no meeting can be cheaper than the best one found.
    Bounded,
}

impl Default for Termination {
    fn default() -> Self {
        Termination::FirstMeeting
    }
}

/// A meeting of both searches.
struct Meet<D> {
    /// The node in the forward tree.
    forward: NodeId,
    /// The node in the backward tree.
    backward: NodeId,
    /// The total cost of the joined path.
    cost: D,
}

/// A bidirectional best-first search.
pub struct Bidirectional<'a, P, Q, F, G, O = NoObserver>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
{
    forward: &'a P,
    f_forward: F,
    backward: &'a Q,
    f_backward: G,
    forward_table: Option<&'a HeuristicTable<P::State, P::Cost>>,
    backward_table: Option<&'a HeuristicTable<P::State, P::Cost>>,
    /// The stopping rule.
    pub termination: Termination,
    /// The rule for replacing reached nodes (in both directions).
    pub dominance: Dominance,
    observer: O,
}

impl<'a, P, Q, F, G> Bidirectional<'a, P, Q, F, G, NoObserver>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
    F: Fn(&ProblemNode<P>) -> P::Cost,
    G: Fn(&ProblemNode<Q>) -> P::Cost,
{
    /// Create a new bidirectional search.
    ///
    /// # Parameters
    /// - `forward`: the problem searched from its initial state
    /// - `f_forward`: the evaluation function of the forward search
    /// - `backward`: the reversed problem, its initial state is the goal
    /// - `f_backward`: the evaluation function of the backward search
    pub fn new(forward: &'a P, f_forward: F, backward: &'a Q, f_backward: G) -> Self {
        Bidirectional {
            forward,
            f_forward,
            backward,
            f_backward,
            forward_table: None,
            backward_table: None,
            termination: Termination::default(),
            dominance: Dominance::default(),
            observer: NoObserver,
        }
    }
}

impl<'a, P, Q, F, G, O> Bidirectional<'a, P, Q, F, G, O>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
    F: Fn(&ProblemNode<P>) -> P::Cost,
    G: Fn(&ProblemNode<Q>) -> P::Cost,
    O: Observer<P::State, P::Cost>,
{
    /// Use precomputed heuristic values for both directions.
    ///
    /// The forward table estimates the distance to the goal, the backward
    /// table the distance to the initial state.
    pub fn with_tables(
        mut self,
        forward: &'a HeuristicTable<P::State, P::Cost>,
        backward: &'a HeuristicTable<P::State, P::Cost>,
    ) -> Self {
        self.forward_table = Some(forward);
        self.backward_table = Some(backward);
        self
    }

    /// Set the stopping rule.
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Set the dominance rule.
    pub fn with_dominance(mut self, dominance: Dominance) -> Self {
        self.dominance = dominance;
        self
    }

    /// Set an observer.
    pub fn with_observer<O2>(self, observer: O2) -> Bidirectional<'a, P, Q, F, G, O2>
    where
        O2: Observer<P::State, P::Cost>,
    {
        Bidirectional {
            forward: self.forward,
            f_forward: self.f_forward,
            backward: self.backward,
            f_backward: self.f_backward,
            forward_table: self.forward_table,
            backward_table: self.backward_table,
            termination: self.termination,
            dominance: self.dominance,
            observer,
        }
    }

    /// Run the search.
    ///
    /// Returns the joined solution, `None` if there is no path or an error
    /// if the backward half cannot be translated into forward actions.
    pub fn run(self) -> Result<Option<ProblemSolution<P>>, Error> {
        let Bidirectional {
            forward,
            f_forward,
            backward,
            f_backward,
            forward_table,
            backward_table,
            termination,
            dominance,
            mut observer,
        } = self;

        let mut fwd = Side::new(forward, f_forward, forward_table, dominance);
        let mut bwd = Side::new(backward, f_backward, backward_table, dominance);

        // if start and goal coincide we do not start the search at all
        let f = fwd.root;
        let at_goal = bwd.reached.get(&fwd.tree.node(f).state);
        if let Some(b) = at_goal {
            return join(fwd, f, &bwd, b, 0).map(Some);
        }

        let first_only = termination == Termination::FirstMeeting;
        let mut best: Option<Meet<P::Cost>> = None;
        let mut nodes_expanded = 0;

        loop {
            let (top_fwd, top_bwd) = match (fwd.top_priority(), bwd.top_priority()) {
                (Some(top_fwd), Some(top_bwd)) => (top_fwd, top_bwd),
                _ => break,
            };

            if best.as_ref().map(|m| m.cost <= top_fwd + top_bwd).unwrap_or(false) {
                // no better meeting possible
                break;
            }

            let meet = if top_fwd <= top_bwd {
                proceed(
                    Direction::Forward,
                    &mut fwd,
                    &bwd,
                    first_only,
                    &mut nodes_expanded,
                    &mut observer,
                )
                .map(|(forward, backward, cost)| Meet {
                    forward,
                    backward,
                    cost,
                })
            } else {
                proceed(
                    Direction::Backward,
                    &mut bwd,
                    &fwd,
                    first_only,
                    &mut nodes_expanded,
                    &mut observer,
                )
                .map(|(backward, forward, cost)| Meet {
                    forward,
                    backward,
                    cost,
                })
            };

            if let Some(meet) = meet {
                log::trace!("Searches meet at forward node {}", meet.forward.index());
                if first_only {
                    best = Some(meet);
                    break;
                }
                if best.as_ref().map(|m| meet.cost < m.cost).unwrap_or(true) {
                    best = Some(meet);
                }
            }
        }

        match best {
            Some(meet) => {
                log::debug!("Searches met after {} expansions", nodes_expanded);
                join(fwd, meet.forward, &bwd, meet.backward, nodes_expanded).map(Some)
            }
            None => {
                log::debug!("No meeting after {} expansions, no path", nodes_expanded);
                Ok(None)
            }
        }
    }
}

/// Expand the next node of `side`.
///
/// Each child that is pushed to the frontier is checked against the reached
/// table of `other`. Returns the meeting `(side node, other node, cost)` with
/// smallest cost found in this step. If `first_only` is `true`, the
/// expansion stops at the first meeting.
fn proceed<P, F, Q, G, O>(
    direction: Direction,
    side: &mut Side<'_, P, F>,
    other: &Side<'_, Q, G>,
    first_only: bool,
    nodes_expanded: &mut usize,
    observer: &mut O,
) -> Option<(NodeId, NodeId, P::Cost)>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
    F: Fn(&ProblemNode<P>) -> P::Cost,
    G: Fn(&ProblemNode<Q>) -> P::Cost,
    O: Observer<P::State, P::Cost>,
{
    let u = side.pop()?;

    if observer.enabled() {
        let opposite = other.reached.states().cloned().collect();
        observer.observe(&side.snapshot(Event::Pop, Some(direction), u, opposite, *nodes_expanded));
    }

    let mut best: Option<(NodeId, NodeId, P::Cost)> = None;
    for (a, s) in side.successors(u) {
        let v = match side.relax(u, a, s) {
            Some(v) => v,
            None => continue,
        };
        *nodes_expanded += 1;

        if observer.enabled() {
            let opposite = other.reached.states().cloned().collect();
            observer.observe(&side.snapshot(Event::PushChild, Some(direction), v, opposite, *nodes_expanded));
        }

        let vnode = side.tree.node(v);
        if let Some(w) = other.reached.get(&vnode.state) {
            let cost = vnode.g + other.tree.node(w).g;
            if best.as_ref().map(|&(_, _, c)| cost < c).unwrap_or(true) {
                best = Some((v, w, cost));
            }
            if first_only {
                break;
            }
        }
    }

    best
}

/// Join the forward path to `f` and the backward path to `b`.
///
/// Both nodes must represent the same state. The backward path is appended
/// in reverse order to the forward tree, its actions are recomputed with the
/// forward problem. The cost of the final node is the sum of both half path
/// costs.
fn join<P, F, Q, G>(
    fwd: Side<'_, P, F>,
    f: NodeId,
    bwd: &Side<'_, Q, G>,
    b: NodeId,
    nodes_expanded: usize,
) -> Result<ProblemSolution<P>, Error>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
{
    let problem = fwd.problem;
    let mut tree = fwd.tree;
    let total = tree.node(f).g + bwd.tree.node(b).g;
    // index of the meeting state on the joined path
    let offset = tree.ancestors(f).count() - 1;

    let mut cur = f;
    for (i, w) in bwd.tree.ancestors(b).skip(1).enumerate() {
        let (state, action, g) = {
            let prev = tree.node(cur);
            let state = bwd.tree.node(w).state.clone();
            let action = action_between(problem, &prev.state, &state)
                .ok_or(Error::InvalidTransition { index: offset + i })?;
            let g = prev.g + problem.action_cost(&prev.state, &action, &state);
            (state, action, g)
        };
        cur = tree.add_child(cur, action, state, g, P::Cost::zero());
    }
    tree.node_mut(cur).g = total;

    Ok(Solution::new(tree, cur, nodes_expanded))
}

/// Run a bidirectional best-first search with default settings.
///
/// This is a convenience wrapper around [`Bidirectional`] using
/// [`Termination::FirstMeeting`].
pub fn bidirectional_search<P, Q, F, G>(
    forward: &P,
    f_forward: F,
    backward: &Q,
    f_backward: G,
) -> Result<Option<ProblemSolution<P>>, Error>
where
    P: Problem,
    Q: Problem<State = P::State, Cost = P::Cost>,
    F: Fn(&ProblemNode<P>) -> P::Cost,
    G: Fn(&ProblemNode<Q>) -> P::Cost,
{
    Bidirectional::new(forward, f_forward, backward, f_backward).run()
}

/// Run a bidirectional uniform-cost search.
///
/// The backward search runs on the [`Swapped`] view of `problem`, which requires
/// the problem to have symmetric transitions and a goal state
/// ([`Problem::goal`]). Both directions use `f = g`.
pub fn bidirectional_dijkstra<P>(problem: &P) -> Result<Option<ProblemSolution<P>>, Error>
where
    P: Problem,
{
    let backward = Swapped::new(problem)?;
    Bidirectional::new(problem, node::uninformed, &backward, node::uninformed).run()
}
