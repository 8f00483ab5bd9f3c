/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A small module to read grid mazes from ascii art.
//!
//! See [`Maze::from_ascii`] for a detailed explanation.
//!
//! *Warning*: the main purpose of this module is its use in
//! documentation comments and examples. It is not meant for
//! production use.

use crate::problem::Problem;

use std::error;
use std::fmt;

/// A position `(row, column)` in a maze.
pub type Pos = (usize, usize);

/// Error reading an ascii-art maze or moving in it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// An invalid character appeared in the ascii text.
    InvalidCharacter(char),
    /// The row with the given index has a different length than the first row.
    RaggedRow(usize),
    /// The maze has no cells.
    Empty,
    /// There is no start cell `S`.
    MissingStart,
    /// There is no goal cell `G`.
    MissingGoal,
    /// There is more than one start cell.
    DuplicateStart,
    /// There is more than one goal cell.
    DuplicateGoal,
    /// A move leaves the maze or runs into a wall.
    InvalidMove,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::InvalidCharacter(c) => write!(fmt, "Invalid character: {}", c),
            Error::RaggedRow(i) => write!(fmt, "Row {} has a different length", i),
            Error::Empty => write!(fmt, "Empty maze"),
            Error::MissingStart => write!(fmt, "Missing start cell"),
            Error::MissingGoal => write!(fmt, "Missing goal cell"),
            Error::DuplicateStart => write!(fmt, "More than one start cell"),
            Error::DuplicateGoal => write!(fmt, "More than one goal cell"),
            Error::InvalidMove => write!(fmt, "Invalid move"),
        }
    }
}

impl error::Error for Error {}

/// A move to one of the four neighbouring cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    North,
    South,
    West,
    East,
}

impl Move {
    /// All moves in the order they are returned by [`Maze::actions`].
    pub const ALL: [Move; 4] = [Move::North, Move::South, Move::West, Move::East];

    /// Return the cell reached from `p` by this move.
    ///
    /// Returns `None` if the move would leave the non-negative quadrant.
    pub fn apply(self, (r, c): Pos) -> Option<Pos> {
        match self {
            Move::North => r.checked_sub(1).map(|r| (r, c)),
            Move::South => Some((r + 1, c)),
            Move::West => c.checked_sub(1).map(|c| (r, c)),
            Move::East => Some((r, c + 1)),
        }
    }

    /// Return the move in the opposite direction.
    pub fn reverse(self) -> Move {
        match self {
            Move::North => Move::South,
            Move::South => Move::North,
            Move::West => Move::East,
            Move::East => Move::West,
        }
    }
}

/// A rectangular grid maze with a start and a goal cell.
///
/// The maze is a search [`Problem`]: states are positions, actions are
/// [`Move`]s to passable neighbours and each step costs `1.0`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Maze {
    /// `true` for walls, row by row.
    walls: Vec<bool>,
    width: usize,
    height: usize,
    start: Pos,
    goal: Pos,
}

impl Maze {
    /// Create a maze from an ASCII drawing.
    ///
    /// Each non-blank line is one row of the maze. Leading and trailing
    /// whitespace of each line is ignored, so the drawing may be indented.
    /// The characters are
    ///
    /// - `.` a free cell,
    /// - `#` a wall,
    /// - `S` the start cell (exactly once),
    /// - `G` the goal cell (exactly once).
    ///
    /// All rows must have the same length.
    ///
    /// ```
    /// use bestfirst::maze::{Error, Maze};
    ///
    /// let maze = Maze::from_ascii(
    ///     "
    ///     S.#
    ///     ..G
    ///     ",
    /// )
    /// .unwrap();
    /// assert_eq!(maze.width(), 3);
    /// assert_eq!(maze.height(), 2);
    /// assert_eq!(maze.start_cell(), (0, 0));
    /// assert_eq!(maze.goal_cell(), (1, 2));
    /// assert!(!maze.passable((0, 2)));
    ///
    /// assert_eq!(Maze::from_ascii("S.x.G"), Err(Error::InvalidCharacter('x')));
    /// assert_eq!(Maze::from_ascii("S..\n.G"), Err(Error::RaggedRow(1)));
    /// assert_eq!(Maze::from_ascii("...G"), Err(Error::MissingStart));
    /// assert_eq!(Maze::from_ascii("S.S.G"), Err(Error::DuplicateStart));
    /// ```
    pub fn from_ascii(text: &str) -> Result<Maze, Error> {
        let mut walls = vec![];
        let mut width = None;
        let mut height = 0;
        let mut start = None;
        let mut goal = None;

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let mut len = 0;
            for (c, ch) in line.chars().enumerate() {
                let p = (height, c);
                match ch {
                    '.' => walls.push(false),
                    '#' => walls.push(true),
                    'S' => {
                        if start.replace(p).is_some() {
                            return Err(Error::DuplicateStart);
                        }
                        walls.push(false);
                    }
                    'G' => {
                        if goal.replace(p).is_some() {
                            return Err(Error::DuplicateGoal);
                        }
                        walls.push(false);
                    }
                    _ => return Err(Error::InvalidCharacter(ch)),
                }
                len += 1;
            }
            match width {
                None => width = Some(len),
                Some(w) if w != len => return Err(Error::RaggedRow(height)),
                _ => (),
            }
            height += 1;
        }

        let width = width.ok_or(Error::Empty)?;
        Ok(Maze {
            walls,
            width,
            height,
            start: start.ok_or(Error::MissingStart)?,
            goal: goal.ok_or(Error::MissingGoal)?,
        })
    }

    /// Return the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the start cell.
    pub fn start_cell(&self) -> Pos {
        self.start
    }

    /// Return the goal cell.
    pub fn goal_cell(&self) -> Pos {
        self.goal
    }

    /// Return `true` if `p` is inside the maze.
    pub fn in_bounds(&self, (r, c): Pos) -> bool {
        r < self.height && c < self.width
    }

    /// Return `true` if `p` is inside the maze and not a wall.
    pub fn passable(&self, p: Pos) -> bool {
        self.in_bounds(p) && !self.walls[p.0 * self.width + p.1]
    }

    /// Return the cell reached from `p` by `m`.
    ///
    /// Returns [`Error::InvalidMove`] if the target cell is not passable.
    pub fn try_result(&self, p: Pos, m: Move) -> Result<Pos, Error> {
        m.apply(p).filter(|&q| self.passable(q)).ok_or(Error::InvalidMove)
    }

    /// Return an iterator over all passable cells, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        (0..self.height * width)
            .filter(move |&i| !self.walls[i])
            .map(move |i| (i / width, i % width))
    }

    /// Return the maze with start and goal cell exchanged.
    ///
    /// ```
    /// use bestfirst::maze::Maze;
    ///
    /// let maze = Maze::from_ascii("S..G").unwrap();
    /// let rev = maze.reversed();
    /// assert_eq!(rev.start_cell(), (0, 3));
    /// assert_eq!(rev.goal_cell(), (0, 0));
    /// ```
    pub fn reversed(&self) -> Maze {
        Maze {
            start: self.goal,
            goal: self.start,
            ..self.clone()
        }
    }
}

impl Problem for Maze {
    type State = Pos;
    type Action = Move;
    type Cost = f64;

    fn initial(&self) -> Pos {
        self.start
    }

    fn is_goal(&self, p: &Pos) -> bool {
        *p == self.goal
    }

    fn actions(&self, p: &Pos) -> Vec<Move> {
        Move::ALL
            .iter()
            .cloned()
            .filter(|&m| self.try_result(*p, m).is_ok())
            .collect()
    }

    /// Return the cell reached from `p` by `m`.
    ///
    /// Panics if the move is not one of [`actions`](Problem::actions).
    fn result(&self, p: &Pos, m: &Move) -> Pos {
        match self.try_result(*p, *m) {
            Ok(q) => q,
            Err(e) => panic!("{} {:?} from {:?}", e, m, p),
        }
    }

    fn goal(&self) -> Option<Pos> {
        Some(self.goal)
    }
}

fn delta(a: &Pos, b: &Pos) -> (f64, f64) {
    let dr = if a.0 > b.0 { a.0 - b.0 } else { b.0 - a.0 };
    let dc = if a.1 > b.1 { a.1 - b.1 } else { b.1 - a.1 };
    (dr as f64, dc as f64)
}

/// Manhattan distance, admissible and consistent for 4-directional moves.
pub fn manhattan(a: &Pos, b: &Pos) -> f64 {
    let (dr, dc) = delta(a, b);
    dr + dc
}

/// Euclidean (straight-line) distance.
pub fn euclidean(a: &Pos, b: &Pos) -> f64 {
    let (dr, dc) = delta(a, b);
    dr.hypot(dc)
}

/// Chebyshev distance, the number of king moves.
pub fn chebyshev(a: &Pos, b: &Pos) -> f64 {
    let (dr, dc) = delta(a, b);
    dr.max(dc)
}

/// Octile distance, diagonal steps cost `sqrt(2)`.
pub fn octile(a: &Pos, b: &Pos) -> f64 {
    let (dr, dc) = delta(a, b);
    dr.max(dc) + (std::f64::consts::SQRT_2 - 1.0) * dr.min(dc)
}

/// Twice the inverse Manhattan distance (`0` at the goal).
///
/// This heuristic is not admissible: next to the goal it estimates `2.0`
/// for a single step. A* may return a non-optimal path with it.
pub fn inadmissible(a: &Pos, b: &Pos) -> f64 {
    let d = manhattan(a, b);
    if d == 0.0 {
        0.0
    } else {
        2.0 / d
    }
}
