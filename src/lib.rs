// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! A library for best-first search on implicit graphs.
//!
//! A search problem is described by the [`Problem`] trait: an initial
//! state, a goal test and the actions available in each state. The
//! [`search`] module contains uniform-cost search (Dijkstra), greedy
//! best-first search, A*-search and bidirectional best-first search on top
//! of a single generic engine parameterized by an evaluation function.
//!
//! ```
//! use bestfirst::maze::Maze;
//! use bestfirst::search::dijkstra;
//!
//! let maze = Maze::from_ascii(
//!     "
//!     S.#
//!     #.#
//!     #.G
//!     ",
//! )
//! .unwrap();
//!
//! let sol = dijkstra(&maze).unwrap();
//! assert_eq!(sol.cost(), 4.0);
//! assert_eq!(sol.path(), vec![(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]);
//! ```

// # Data structures

pub mod collections;

pub mod problem;
pub use self::problem::{Cost, Problem};

pub mod adapters;
pub use self::adapters::{swap, Swapped};

pub mod node;
pub use self::node::{Node, NodeId, Tree};

pub mod heuristic;
pub use self::heuristic::{build_table, Heuristic, HeuristicTable};

pub mod observe;
pub use self::observe::{Observer, Snapshot};

// # Algorithms

pub mod search;
pub use self::search::Solution;

// # Examples

pub mod maze;
