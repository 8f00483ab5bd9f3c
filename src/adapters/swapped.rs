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

//! Swap the initial state and the goal state of a problem.

use crate::problem::Problem;
use crate::search::Error;

/// A problem wrapping an existing problem with initial and goal state
/// exchanged.
///
/// The transitions are the same as those of the wrapped problem. Hence the
/// swapped problem is the reverse problem only if the transitions of the
/// wrapped problem are symmetric, which is the case for grid mazes.
///
/// # Example
///
/// ```
/// use bestfirst::adapters::swap;
/// use bestfirst::maze::Maze;
/// use bestfirst::problem::Problem;
///
/// let maze = Maze::from_ascii("S.G").unwrap();
/// assert_eq!(maze.initial(), (0, 0));
///
/// // Can be used by wrapping a reference.
/// let swapped = swap(&maze).unwrap();
/// assert_eq!(swapped.initial(), (0, 2));
/// assert!(swapped.is_goal(&(0, 0)));
/// assert!(!swapped.is_goal(&(0, 2)));
/// assert_eq!(swapped.goal(), Some((0, 0)));
///
/// // Swapping twice gives the original problem.
/// let twice = swap(&swapped).unwrap();
/// assert_eq!(twice.initial(), (0, 0));
/// assert_eq!(twice.goal(), Some((0, 2)));
/// ```
#[derive(Clone)]
pub struct Swapped<'a, P>
where
    P: Problem,
{
    problem: &'a P,
    start: P::State,
    goal: P::State,
}

impl<'a, P> Swapped<'a, P>
where
    P: Problem,
{
    /// Wrap `problem`.
    ///
    /// Returns [`Error::MissingGoal`] if the problem does not have a goal
    /// state.
    pub fn new(problem: &'a P) -> Result<Self, Error> {
        let goal = problem.goal().ok_or(Error::MissingGoal)?;
        Ok(Swapped {
            problem,
            start: problem.initial(),
            goal,
        })
    }

    /// Return the wrapped problem.
    pub fn inner(&self) -> &'a P {
        self.problem
    }
}

impl<'a, P> Problem for Swapped<'a, P>
where
    P: Problem,
{
    type State = P::State;
    type Action = P::Action;
    type Cost = P::Cost;

    fn initial(&self) -> P::State {
        self.goal.clone()
    }

    fn is_goal(&self, state: &P::State) -> bool {
        *state == self.start
    }

    fn actions(&self, state: &P::State) -> Vec<P::Action> {
        self.problem.actions(state)
    }

    fn result(&self, state: &P::State, action: &P::Action) -> P::State {
        self.problem.result(state, action)
    }

    fn action_cost(&self, state: &P::State, action: &P::Action, next: &P::State) -> P::Cost {
        self.problem.action_cost(state, action, next)
    }

    fn goal(&self) -> Option<P::State> {
        Some(self.start.clone())
    }
}

/// Return the problem with initial and goal state of `problem` exchanged.
pub fn swap<P>(problem: &P) -> Result<Swapped<P>, Error>
where
    P: Problem,
{
    Swapped::new(problem)
}

#[cfg(test)]
mod tests {
    use super::swap;
    use crate::problem::Problem;
    use crate::search::Error;

    struct Line;

    impl Problem for Line {
        type State = i32;
        type Action = i32;
        type Cost = u32;

        fn initial(&self) -> i32 {
            0
        }

        fn is_goal(&self, s: &i32) -> bool {
            *s == 3
        }

        fn actions(&self, _s: &i32) -> Vec<i32> {
            vec![-1, 1]
        }

        fn result(&self, s: &i32, a: &i32) -> i32 {
            s + a
        }
    }

    #[test]
    fn test_missing_goal() {
        assert_eq!(swap(&Line).err(), Some(Error::MissingGoal));
    }
}
