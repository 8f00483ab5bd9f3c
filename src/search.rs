/*
 * Copyright (c) 2019, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! # Best-first search algorithms.
//!
//! This module contains the generic best-first search and its
//! specializations. A best-first search repeatedly expands the node of the
//! frontier with the smallest priority `f(node)`. The evaluation function
//! `f` determines the algorithm:
//!
//! - `f = g`: uniform-cost search, i.e. Dijkstra's algorithm,
//! - `f = h`: greedy best-first search,
//! - `f = g + h`: A*-search.
//!
//! The [`bidirectional`] search runs two best-first searches, one from the
//! start state and one from the goal state, and stops when both meet.
//!
//! All searches return a [`Solution`] or `None` if there is no path.
//!
//! # Example
//!
//! ```
//! use bestfirst::heuristic::build_table;
//! use bestfirst::maze::{manhattan, Maze};
//! use bestfirst::search::{astar, bidirectional_dijkstra, dijkstra, validate_path};
//!
//! let maze = Maze::from_ascii(
//!     "
//!     S.#...
//!     ..#.#.
//!     ....#G
//!     ",
//! )
//! .unwrap();
//!
//! let table = build_table(&maze, &maze.goal_cell(), manhattan);
//!
//! let d = dijkstra(&maze).unwrap();
//! let a = astar(&maze, &table).unwrap();
//! let b = bidirectional_dijkstra(&maze).unwrap().unwrap();
//!
//! assert_eq!(d.cost(), 11.0);
//! assert_eq!(a.cost(), 11.0);
//! assert_eq!(b.cost(), 11.0);
//! for sol in &[d, a, b] {
//!     assert!(validate_path(&maze, &sol.path()).is_ok());
//! }
//! ```

pub mod bestfirst;
pub mod bidirectional;
pub mod frontier;

pub use self::bestfirst::{astar, best_first_search, dijkstra, greedy, BestFirst, Dominance};
pub use self::bidirectional::{bidirectional_dijkstra, bidirectional_search, Bidirectional, Termination};

use crate::node::{Node, NodeId, Tree};
use crate::problem::Problem;

use std::error;
use std::fmt;

/// Error of a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// The problem does not have a goal state.
    MissingGoal,
    /// The states at positions `index` and `index + 1` of a path are not
    /// connected by any action.
    InvalidTransition { index: usize },
    /// A path does not start at the initial state (or is empty).
    InvalidStart,
    /// A path does not end at a goal state.
    InvalidEnd,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::MissingGoal => write!(fmt, "Problem has no goal state"),
            Error::InvalidTransition { index } => {
                write!(fmt, "No action from path state {} to state {}", index, index + 1)
            }
            Error::InvalidStart => write!(fmt, "Path does not start at the initial state"),
            Error::InvalidEnd => write!(fmt, "Path does not end at a goal state"),
        }
    }
}

impl error::Error for Error {}

/// The node type of a search on problem `P`.
pub type ProblemNode<P> = Node<<P as Problem>::State, <P as Problem>::Action, <P as Problem>::Cost>;

/// The solution type of a search on problem `P`.
pub type ProblemSolution<P> = Solution<<P as Problem>::State, <P as Problem>::Action, <P as Problem>::Cost>;

/// The result of a successful search.
///
/// Contains the search tree, the goal node (or the joined meeting node of a
/// bidirectional search) and the number of nodes pushed to the frontier
/// during the search.
#[derive(Clone, Debug)]
pub struct Solution<S, A, D> {
    tree: Tree<S, A, D>,
    node: NodeId,
    nodes_expanded: usize,
}

impl<S, A, D> Solution<S, A, D>
where
    D: Copy,
{
    pub(crate) fn new(tree: Tree<S, A, D>, node: NodeId, nodes_expanded: usize) -> Self {
        Solution {
            tree,
            node,
            nodes_expanded,
        }
    }

    /// Return the final node.
    pub fn node(&self) -> &Node<S, A, D> {
        self.tree.node(self.node)
    }

    /// Return the handle of the final node.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Return the search tree.
    pub fn tree(&self) -> &Tree<S, A, D> {
        &self.tree
    }

    /// Return the cost of the path.
    pub fn cost(&self) -> D {
        self.node().g
    }

    /// Return the number of nodes pushed to the frontier during the search.
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Return the states of the path from the initial state to the final node.
    pub fn path(&self) -> Vec<S>
    where
        S: Clone,
    {
        reconstruct_path(&self.tree, self.node)
    }

    /// Return the actions of the path from the initial state to the final node.
    pub fn actions(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.tree.actions(self.node)
    }

    /// Return the tree, the final node and the number of expanded nodes.
    pub fn into_parts(self) -> (Tree<S, A, D>, NodeId, usize) {
        (self.tree, self.node, self.nodes_expanded)
    }
}

/// Return the states on the path from the root of `tree` to `node`.
///
/// The first element is the state of the root, the last one the state of
/// `node`.
pub fn reconstruct_path<S, A, D>(tree: &Tree<S, A, D>, node: NodeId) -> Vec<S>
where
    S: Clone,
{
    tree.path(node)
}

/// Return the cheapest action leading from `from` to `to`.
pub(crate) fn action_between<P>(problem: &P, from: &P::State, to: &P::State) -> Option<P::Action>
where
    P: Problem,
{
    let mut best: Option<(P::Action, P::Cost)> = None;
    for a in problem.actions(from) {
        if problem.result(from, &a) != *to {
            continue;
        }
        let cost = problem.action_cost(from, &a, to);
        if best.as_ref().map(|(_, c)| cost < *c).unwrap_or(true) {
            best = Some((a, cost));
        }
    }
    best.map(|(a, _)| a)
}

/// Check that `path` is a valid solution path of `problem`.
///
/// The path must start at the initial state, end at a goal state and each
/// pair of consecutive states must be connected by an action.
pub fn validate_path<P>(problem: &P, path: &[P::State]) -> Result<(), Error>
where
    P: Problem,
{
    match path.first() {
        Some(s) if *s == problem.initial() => (),
        _ => return Err(Error::InvalidStart),
    }
    for (index, uv) in path.windows(2).enumerate() {
        if action_between(problem, &uv[0], &uv[1]).is_none() {
            return Err(Error::InvalidTransition { index });
        }
    }
    match path.last() {
        Some(t) if problem.is_goal(t) => Ok(()),
        _ => Err(Error::InvalidEnd),
    }
}
