/*
 * Copyright (c) 2018, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Unidirectional best-first search.
//!
//! The search keeps a [`Frontier`] of nodes ordered by an evaluation function
//! `f` and a [`Reached`] table with the best node for each discovered state.
//! In each step the node with the smallest priority is popped. If its state
//! is a goal state, the search stops. Otherwise each successor is created and
//! pushed to the frontier if its state is new or has been reached with a
//! worse value before (see [`Dominance`]).
//!
//! The first goal popped is optimal if all step costs are non-negative and
//! `f = g` (Dijkstra) or `f = g + h` with a consistent heuristic `h` (A*).
//!
//! # Example
//!
//! ```
//! use bestfirst::heuristic::build_table;
//! use bestfirst::maze::{manhattan, Maze};
//! use bestfirst::search::{astar, dijkstra, greedy};
//!
//! let maze = Maze::from_ascii(
//!     "
//!     ......
//!     .####.
//!     .S..#G
//!     .####.
//!     ......
//!     ",
//! )
//! .unwrap();
//!
//! let table = build_table(&maze, &maze.goal_cell(), manhattan);
//!
//! // greedy walks into the dead end first and returns a valid path
//! let sol = greedy(&maze, &table).unwrap();
//! assert_eq!(sol.path().first(), Some(&(2, 1)));
//! assert_eq!(sol.path().last(), Some(&(2, 5)));
//!
//! let sol = dijkstra(&maze).unwrap();
//! assert_eq!(sol.cost(), 10.0);
//!
//! let sol = astar(&maze, &table).unwrap();
//! assert_eq!(sol.cost(), 10.0);
//! ```

use super::frontier::{Frontier, Reached};
use super::{ProblemNode, ProblemSolution, Solution};
use crate::heuristic::HeuristicTable;
use crate::node::{self, Node, NodeId, Tree};
use crate::observe::{Direction, Event, NoObserver, Observer, Snapshot, SNAPSHOT_VERSION};
use crate::problem::Problem;

use num_traits::Zero;

/// Rule deciding whether a rediscovered state replaces the reached node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dominance {
    /// Replace if the path cost `g` is strictly smaller.
    Cost,
    /// Replace if the priority `f` is strictly smaller.
    ///
    /// Used by greedy search, where the path cost is not what is optimized.
    Priority,
}

impl Default for Dominance {
    fn default() -> Self {
        Dominance::Cost
    }
}

/// One direction of a search: the problem, the evaluation function and the
/// search data structures.
pub(crate) struct Side<'a, P, F>
where
    P: Problem,
{
    pub(crate) problem: &'a P,
    f: F,
    table: Option<&'a HeuristicTable<P::State, P::Cost>>,
    dominance: Dominance,
    pub(crate) tree: Tree<P::State, P::Action, P::Cost>,
    pub(crate) frontier: Frontier<P::Cost>,
    pub(crate) reached: Reached<P::State>,
    pub(crate) root: NodeId,
}

impl<'a, P, F> Side<'a, P, F>
where
    P: Problem,
    F: Fn(&ProblemNode<P>) -> P::Cost,
{
    /// Create the root node and push it to the frontier.
    pub(crate) fn new(
        problem: &'a P,
        f: F,
        table: Option<&'a HeuristicTable<P::State, P::Cost>>,
        dominance: Dominance,
    ) -> Self {
        let start = problem.initial();
        let h = match table {
            Some(table) => table.get(&start),
            None => problem.heuristic(&start),
        };
        let mut tree = Tree::new();
        let root = tree.add_root(start.clone(), P::Cost::zero(), h);
        let mut frontier = Frontier::new();
        frontier.push(root, f(tree.node(root)));
        let mut reached = Reached::new();
        reached.insert(start, root);

        Side {
            problem,
            f,
            table,
            dominance,
            tree,
            frontier,
            reached,
            root,
        }
    }

    fn heuristic(&self, state: &P::State) -> P::Cost {
        match self.table {
            Some(table) => table.get(state),
            None => self.problem.heuristic(state),
        }
    }

    /// Return the smallest priority in the frontier.
    pub(crate) fn top_priority(&self) -> Option<P::Cost> {
        self.frontier.top_priority()
    }

    /// Pop the next node to be expanded, skipping stale entries.
    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        while let Some((u, _)) = self.frontier.pop() {
            if self.reached.is_current(&self.tree.node(u).state, u) {
                return Some(u);
            }
            log::trace!("Skip stale frontier entry {}", u.index());
        }
        None
    }

    /// Return the actions and resulting states of all transitions from `u`.
    pub(crate) fn successors(&self, u: NodeId) -> Vec<(P::Action, P::State)> {
        let state = &self.tree.node(u).state;
        self.problem
            .actions(state)
            .into_iter()
            .map(|a| {
                let v = self.problem.result(state, &a);
                (a, v)
            })
            .collect()
    }

    /// Create the child of `parent` reached via `action`.
    ///
    /// If the child's state is new or the child dominates the reached node
    /// of its state, the child is added to the reached table and pushed to
    /// the frontier and its handle is returned. Otherwise the child is
    /// dropped and `None` is returned.
    pub(crate) fn relax(&mut self, parent: NodeId, action: P::Action, state: P::State) -> Option<NodeId> {
        let pnode = self.tree.node(parent);
        let g = pnode.g + self.problem.action_cost(&pnode.state, &action, &state);
        let h = self.heuristic(&state);
        let child = Node {
            state,
            parent: Some(parent),
            action: Some(action),
            g,
            h,
        };
        let priority = (self.f)(&child);

        if let Some(old) = self.reached.get(&child.state) {
            let old = self.tree.node(old);
            let dominates = match self.dominance {
                Dominance::Cost => child.g < old.g,
                Dominance::Priority => priority < (self.f)(old),
            };
            if !dominates {
                return None;
            }
        }

        let state = child.state.clone();
        let v = self.tree.add(child);
        self.reached.insert(state, v);
        self.frontier.push(v, priority);
        Some(v)
    }

    /// Create a snapshot of this side with `u` as current node.
    pub(crate) fn snapshot(
        &self,
        event: Event,
        direction: Option<Direction>,
        u: NodeId,
        opposite_reached: Vec<P::State>,
        nodes_expanded: usize,
    ) -> Snapshot<P::State, P::Cost> {
        let node = self.tree.node(u);
        Snapshot {
            version: SNAPSHOT_VERSION,
            event,
            direction,
            current: node.state.clone(),
            cost: node.g,
            frontier: self.frontier.nodes().map(|v| self.tree.node(v).state.clone()).collect(),
            reached: self.reached.states().cloned().collect(),
            opposite_reached,
            nodes_expanded,
        }
    }
}

/// A unidirectional best-first search.
///
/// The search is configured by the builder methods and started by
/// [`run`](BestFirst::run).
pub struct BestFirst<'a, P, F, O = NoObserver>
where
    P: Problem,
{
    problem: &'a P,
    f: F,
    table: Option<&'a HeuristicTable<P::State, P::Cost>>,
    /// The rule for replacing reached nodes.
    pub dominance: Dominance,
    observer: O,
}

impl<'a, P, F> BestFirst<'a, P, F, NoObserver>
where
    P: Problem,
    F: Fn(&ProblemNode<P>) -> P::Cost,
{
    /// Create a new search on `problem` with evaluation function `f`.
    ///
    /// Without a heuristic table, the `h` values of the nodes are taken from
    /// [`Problem::heuristic`].
    pub fn new(problem: &'a P, f: F) -> Self {
        BestFirst {
            problem,
            f,
            table: None,
            dominance: Dominance::default(),
            observer: NoObserver,
        }
    }
}

impl<'a, P, F, O> BestFirst<'a, P, F, O>
where
    P: Problem,
    F: Fn(&ProblemNode<P>) -> P::Cost,
    O: Observer<P::State, P::Cost>,
{
    /// Use precomputed heuristic values.
    pub fn with_table(mut self, table: &'a HeuristicTable<P::State, P::Cost>) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the dominance rule.
    pub fn with_dominance(mut self, dominance: Dominance) -> Self {
        self.dominance = dominance;
        self
    }

    /// Set an observer.
    pub fn with_observer<O2>(self, observer: O2) -> BestFirst<'a, P, F, O2>
    where
        O2: Observer<P::State, P::Cost>,
    {
        BestFirst {
            problem: self.problem,
            f: self.f,
            table: self.table,
            dominance: self.dominance,
            observer,
        }
    }

    /// Run the search.
    ///
    /// Returns the first goal node popped from the frontier or `None` if the
    /// frontier runs empty.
    pub fn run(self) -> Option<ProblemSolution<P>> {
        let BestFirst {
            problem,
            f,
            table,
            dominance,
            mut observer,
        } = self;

        let mut side = Side::new(problem, f, table, dominance);
        let mut nodes_expanded = 0;

        while let Some(u) = side.pop() {
            if problem.is_goal(&side.tree.node(u).state) {
                log::debug!("Found goal after {} expansions", nodes_expanded);
                return Some(Solution::new(side.tree, u, nodes_expanded));
            }

            if observer.enabled() {
                observer.observe(&side.snapshot(Event::ExpandNode, None, u, vec![], nodes_expanded));
            }

            for (a, s) in side.successors(u) {
                if let Some(v) = side.relax(u, a, s) {
                    nodes_expanded += 1;
                    if observer.enabled() {
                        observer.observe(&side.snapshot(Event::PushChild, None, v, vec![], nodes_expanded));
                    }
                }
            }
        }

        log::debug!("Frontier exhausted after {} expansions, no path", nodes_expanded);
        None
    }
}

/// Run a best-first search with evaluation function `f`.
///
/// This is a convenience wrapper around [`BestFirst`] with default settings.
pub fn best_first_search<P, F>(problem: &P, f: F) -> Option<ProblemSolution<P>>
where
    P: Problem,
    F: Fn(&ProblemNode<P>) -> P::Cost,
{
    BestFirst::new(problem, f).run()
}

/// Run a uniform-cost search (Dijkstra's algorithm), `f = g`.
pub fn dijkstra<P>(problem: &P) -> Option<ProblemSolution<P>>
where
    P: Problem,
{
    BestFirst::new(problem, node::uninformed).run()
}

/// Run a greedy best-first search, `f = h`.
///
/// The heuristic values are read from `table`. Rediscovered states are only
/// accepted if their priority improves ([`Dominance::Priority`]). The
/// returned path is not necessarily a shortest one.
pub fn greedy<P>(problem: &P, table: &HeuristicTable<P::State, P::Cost>) -> Option<ProblemSolution<P>>
where
    P: Problem,
{
    BestFirst::new(problem, node::greedy)
        .with_table(table)
        .with_dominance(Dominance::Priority)
        .run()
}

/// Run an A*-search, `f = g + h`.
///
/// The heuristic values are read from `table`. The returned path is a
/// shortest path if the heuristic is admissible and consistent.
pub fn astar<P>(problem: &P, table: &HeuristicTable<P::State, P::Cost>) -> Option<ProblemSolution<P>>
where
    P: Problem,
{
    BestFirst::new(problem, node::astar).with_table(table).run()
}

#[cfg(test)]
mod tests {
    use super::{greedy, BestFirst, Dominance};
    use crate::heuristic::HeuristicTable;
    use crate::node::{self, uninformed, Node};
    use crate::observe::{Event, Snapshot};
    use crate::problem::Problem;

    /// A tiny weighted digraph on `0..4` where the direct edge to node 3 is
    /// expensive and a detour is cheap.
    ///
    /// ```text
    /// 0 --10--> 3 --1--> 4
    /// 0 --1--> 1 --1--> 2 --1--> 3
    /// ```
    struct Detour {
        goal: u32,
    }

    impl Problem for Detour {
        type State = u32;
        type Action = u32;
        type Cost = u32;

        fn initial(&self) -> u32 {
            0
        }

        fn is_goal(&self, s: &u32) -> bool {
            *s == self.goal
        }

        fn actions(&self, s: &u32) -> Vec<u32> {
            match *s {
                0 => vec![3, 1],
                1 => vec![2],
                2 => vec![3],
                3 => vec![4],
                _ => vec![],
            }
        }

        fn result(&self, _s: &u32, a: &u32) -> u32 {
            *a
        }

        fn action_cost(&self, s: &u32, _a: &u32, t: &u32) -> u32 {
            if *s == 0 && *t == 3 {
                10
            } else {
                1
            }
        }
    }

    #[test]
    fn test_rediscovery_with_lower_cost() {
        let mut pushes = vec![];
        let sol = BestFirst::new(&Detour { goal: 3 }, uninformed)
            .with_observer(|s: &Snapshot<u32, u32>| {
                if s.event == Event::PushChild {
                    pushes.push((s.current, s.cost))
                }
            })
            .run()
            .unwrap();
        assert_eq!(sol.path(), vec![0, 1, 2, 3]);
        assert_eq!(sol.actions(), vec![1, 2, 3]);
        assert_eq!(sol.cost(), 3);
        assert_eq!(pushes, vec![(3, 10), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(sol.nodes_expanded(), 4);
    }

    #[test]
    fn test_stale_entry_skipped() {
        // the goal does not exist, so the stale entry of 3 (cost 10) is popped
        let mut expanded = vec![];
        let sol = BestFirst::new(&Detour { goal: 5 }, uninformed)
            .with_observer(|s: &Snapshot<u32, u32>| {
                if s.event == Event::ExpandNode {
                    expanded.push((s.current, s.cost))
                }
            })
            .run();
        assert!(sol.is_none());
        assert_eq!(expanded, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_priority_dominance() {
        // with f = g both dominance rules behave the same
        let f = |n: &Node<u32, u32, u32>| n.g;
        let problem = Detour { goal: 3 };
        let a = BestFirst::new(&problem, f).run().unwrap();
        let b = BestFirst::new(&problem, f).with_dominance(Dominance::Priority).run().unwrap();
        assert_eq!(a.path(), b.path());
        assert_eq!(a.nodes_expanded(), b.nodes_expanded());
    }

    /// Heuristic values for `Detour`. The expensive edge to 3 looks best, the
    /// goal 4 looks worst.
    fn detour_table() -> HeuristicTable<u32, u32> {
        vec![(0, 3), (1, 2), (2, 2), (3, 1), (4, 5)].into_iter().collect()
    }

    fn greedy_pushes(dominance: Dominance) -> (Vec<(u32, u32)>, Vec<u32>, u32, usize) {
        let table = detour_table();
        let mut pushes = vec![];
        let sol = BestFirst::new(&Detour { goal: 4 }, node::greedy)
            .with_table(&table)
            .with_dominance(dominance)
            .with_observer(|s: &Snapshot<u32, u32>| {
                if s.event == Event::PushChild {
                    pushes.push((s.current, s.cost))
                }
            })
            .run()
            .unwrap();
        (pushes, sol.path(), sol.cost(), sol.nodes_expanded())
    }

    #[test]
    fn test_greedy_ignores_cheaper_rediscovery() {
        // 3 is found again via 2 with g = 3 but the same h, so it is not pushed
        let (pushes, path, cost, nodes_expanded) = greedy_pushes(Dominance::Priority);
        assert_eq!(pushes, vec![(3, 10), (4, 11), (1, 1), (2, 2)]);
        assert_eq!(path, vec![0, 3, 4]);
        assert_eq!(cost, 11);
        assert_eq!(nodes_expanded, 4);

        let sol = greedy(&Detour { goal: 4 }, &detour_table()).unwrap();
        assert_eq!(sol.path(), vec![0, 3, 4]);
        assert_eq!(sol.cost(), 11);
        assert_eq!(sol.nodes_expanded(), 4);
    }

    #[test]
    fn test_greedy_with_cost_dominance() {
        let (pushes, path, cost, nodes_expanded) = greedy_pushes(Dominance::Cost);
        assert_eq!(pushes, vec![(3, 10), (4, 11), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
        assert_eq!(cost, 4);
        assert_eq!(nodes_expanded, 6);
    }
}
