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

//! Observation of a running search.
//!
//! A search may be given an [`Observer`] that is called with a [`Snapshot`]
//! of the search state at well defined points: before a popped node is
//! expanded and after a child has been pushed to the frontier. Observers are
//! purely passive, they see copies of the states and cannot influence the
//! search.
//!
//! Any `FnMut(&Snapshot<S, D>)` closure is an observer:
//!
//! ```
//! use bestfirst::maze::Maze;
//! use bestfirst::observe::{Event, Snapshot};
//! use bestfirst::search::bestfirst::BestFirst;
//! use bestfirst::node::uninformed;
//!
//! let maze = Maze::from_ascii("S.G").unwrap();
//!
//! let mut events = vec![];
//! let solution = BestFirst::new(&maze, uninformed)
//!     .with_observer(|s: &Snapshot<_, _>| events.push((s.event, s.current)))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(solution.path(), vec![(0, 0), (0, 1), (0, 2)]);
//! assert_eq!(
//!     events,
//!     vec![
//!         (Event::ExpandNode, (0, 0)),
//!         (Event::PushChild, (0, 1)),
//!         (Event::ExpandNode, (0, 1)),
//!         (Event::PushChild, (0, 2)),
//!     ]
//! );
//! ```

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The version of the [`Snapshot`] record layout.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The kind of event a snapshot is taken at.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Event {
    /// A node is about to be expanded (unidirectional search).
    ExpandNode,
    /// A node has been popped and is about to be expanded (bidirectional search).
    Pop,
    /// A child node has been pushed to the frontier.
    PushChild,
}

/// Direction of a bidirectional search.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Search from the start towards the goal.
    Forward,
    /// Search from the goal towards the start.
    Backward,
}

impl Direction {
    /// Return the opposite direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// The observable state of a search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Snapshot<S, D> {
    /// Layout version, always [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// The event the snapshot has been taken at.
    pub event: Event,
    /// The search direction, `None` for unidirectional searches.
    pub direction: Option<Direction>,
    /// The state of the popped node or of the pushed child.
    pub current: S,
    /// The path cost of the popped node or of the pushed child.
    pub cost: D,
    /// The states in the frontier (of `direction`), in no particular order.
    ///
    /// The frontier may contain the same state several times.
    pub frontier: Vec<S>,
    /// The reached states (of `direction`).
    pub reached: Vec<S>,
    /// The reached states of the opposite direction (empty for
    /// unidirectional searches).
    pub opposite_reached: Vec<S>,
    /// The number of nodes pushed to the frontier so far.
    pub nodes_expanded: usize,
}

/// An observer of a search.
pub trait Observer<S, D> {
    /// Return `true` if this observer wants to receive snapshots.
    ///
    /// Snapshots are only created if this returns `true`.
    fn enabled(&self) -> bool {
        true
    }

    /// Receive a snapshot.
    fn observe(&mut self, snapshot: &Snapshot<S, D>);
}

/// An observer ignoring all events.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoObserver;

impl<S, D> Observer<S, D> for NoObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn observe(&mut self, _snapshot: &Snapshot<S, D>) {}
}

impl<S, D, F> Observer<S, D> for F
where
    F: FnMut(&Snapshot<S, D>),
{
    fn observe(&mut self, snapshot: &Snapshot<S, D>) {
        (*self)(snapshot)
    }
}
