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

use bestfirst::heuristic::build_table;
use bestfirst::maze::{manhattan, Maze, Move, Pos};
use bestfirst::node;
use bestfirst::observe::{Event, Snapshot};
use bestfirst::problem::Problem;
use bestfirst::search::{
    astar, bidirectional_dijkstra, dijkstra, greedy, validate_path, BestFirst, Bidirectional, Termination,
};
use bestfirst::swap;

use rand::prelude::*;

use std::collections::{HashMap, VecDeque};
use std::error::Error;

/// Length of a shortest path computed by plain breadth-first search.
fn bfs_distance(maze: &Maze) -> Option<usize> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(maze.start_cell(), 0);
    queue.push_back(maze.start_cell());
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        if p == maze.goal_cell() {
            return Some(d);
        }
        for &m in Move::ALL.iter() {
            if let Ok(q) = maze.try_result(p, m) {
                if !dist.contains_key(&q) {
                    dist.insert(q, d + 1);
                    queue.push_back(q);
                }
            }
        }
    }
    None
}

/// Generate a random maze with start in the upper left and goal in the
/// lower right corner.
fn random_maze(rng: &mut StdRng, height: usize, width: usize) -> Result<Maze, Box<dyn Error>> {
    let mut text = String::new();
    for r in 0..height {
        for c in 0..width {
            let ch = if (r, c) == (0, 0) {
                'S'
            } else if (r, c) == (height - 1, width - 1) {
                'G'
            } else if rng.random_bool(0.3) {
                '#'
            } else {
                '.'
            };
            text.push(ch);
        }
        text.push('\n');
    }
    Ok(Maze::from_ascii(&text)?)
}

fn random_mazes() -> Result<Vec<Maze>, Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut mazes = vec![];
    for i in 0..100 {
        mazes.push(random_maze(&mut rng, 5 + i % 4, 5 + i % 5)?);
    }
    Ok(mazes)
}

/// The corridor to the right looks promising but leads into a long detour.
const DETOUR: &str = "
    .........
    .#######.
    S......#G
    ######.#.
    ######.#.
    ######.#.
    ######...
";

/// The maze with the goal moved onto the start cell.
struct StartIsGoal(Maze);

impl Problem for StartIsGoal {
    type State = Pos;
    type Action = Move;
    type Cost = f64;

    fn initial(&self) -> Pos {
        self.0.start_cell()
    }

    fn is_goal(&self, p: &Pos) -> bool {
        *p == self.0.start_cell()
    }

    fn actions(&self, p: &Pos) -> Vec<Move> {
        self.0.actions(p)
    }

    fn result(&self, p: &Pos, m: &Move) -> Pos {
        self.0.result(p, m)
    }

    fn goal(&self) -> Option<Pos> {
        Some(self.0.start_cell())
    }
}

#[test]
fn test_no_path() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(
        "
        S.#..
        ..#..
        ..#.G
        ",
    )?;
    let table = build_table(&maze, &maze.goal_cell(), manhattan);

    assert!(dijkstra(&maze).is_none());
    assert!(greedy(&maze, &table).is_none());
    assert!(astar(&maze, &table).is_none());
    assert!(bidirectional_dijkstra(&maze)?.is_none());

    let rev = maze.reversed();
    let sol = Bidirectional::new(&maze, node::uninformed, &rev, node::uninformed)
        .with_termination(Termination::Bounded)
        .run()?;
    assert!(sol.is_none());

    Ok(())
}

#[test]
fn test_trivial_path() -> Result<(), Box<dyn Error>> {
    let problem = StartIsGoal(Maze::from_ascii("..S..G")?);
    let table = build_table(&problem, &(0, 2), manhattan);

    let solutions = vec![
        dijkstra(&problem).ok_or("no path")?,
        greedy(&problem, &table).ok_or("no path")?,
        astar(&problem, &table).ok_or("no path")?,
        bidirectional_dijkstra(&problem)?.ok_or("no path")?,
    ];
    for sol in solutions {
        assert_eq!(sol.path(), vec![(0, 2)]);
        assert!(sol.actions().is_empty());
        assert_eq!(sol.cost(), 0.0);
        assert_eq!(sol.nodes_expanded(), 0);
    }

    Ok(())
}

#[test]
fn test_dijkstra_small() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(
        "
        S....
        .....
        .###.
        .....
        ....G
        ",
    )?;
    let sol = dijkstra(&maze).ok_or("no path")?;
    assert_eq!(sol.cost(), 8.0);
    assert_eq!(sol.path().len(), 9);
    assert_eq!(bfs_distance(&maze), Some(8));
    validate_path(&maze, &sol.path())?;

    Ok(())
}

#[test]
fn test_dijkstra_optimal() -> Result<(), Box<dyn Error>> {
    for maze in random_mazes()? {
        let sol = dijkstra(&maze);
        assert_eq!(sol.as_ref().map(|s| s.cost() as usize), bfs_distance(&maze));
        if let Some(sol) = sol {
            assert_eq!(sol.path().len(), sol.cost() as usize + 1);
            validate_path(&maze, &sol.path())?;
        }
    }
    Ok(())
}

#[test]
fn test_astar_optimal() -> Result<(), Box<dyn Error>> {
    for maze in random_mazes()? {
        let table = build_table(&maze, &maze.goal_cell(), manhattan);
        let a = astar(&maze, &table).map(|s| s.cost());
        let d = dijkstra(&maze).map(|s| s.cost());
        assert_eq!(a, d);
    }
    Ok(())
}

#[test]
fn test_greedy_not_optimal() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(DETOUR)?;
    let table = build_table(&maze, &maze.goal_cell(), manhattan);

    let g = greedy(&maze, &table).ok_or("no path")?;
    let d = dijkstra(&maze).ok_or("no path")?;
    let a = astar(&maze, &table).ok_or("no path")?;

    assert_eq!(d.cost(), 12.0);
    assert_eq!(a.cost(), 12.0);
    assert_eq!(g.cost(), 16.0);
    assert!(g.cost() > d.cost());
    validate_path(&maze, &g.path())?;

    Ok(())
}

#[test]
fn test_reconstruction() -> Result<(), Box<dyn Error>> {
    for maze in random_mazes()?.iter().take(20) {
        let table = build_table(maze, &maze.goal_cell(), manhattan);
        let mut paths = vec![];
        paths.extend(dijkstra(maze).map(|s| (s.path(), s.actions())));
        paths.extend(greedy(maze, &table).map(|s| (s.path(), s.actions())));
        paths.extend(astar(maze, &table).map(|s| (s.path(), s.actions())));
        paths.extend(bidirectional_dijkstra(maze)?.map(|s| (s.path(), s.actions())));

        for (path, actions) in paths {
            validate_path(maze, &path)?;
            assert_eq!(path[0], maze.initial());
            assert!(maze.is_goal(&path[path.len() - 1]));
            assert_eq!(actions.len(), path.len() - 1);
            for (i, m) in actions.iter().enumerate() {
                assert_eq!(maze.result(&path[i], m), path[i + 1]);
            }
        }
    }
    Ok(())
}

#[test]
fn test_bidirectional_parity() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(DETOUR)?;
    let d = dijkstra(&maze).ok_or("no path")?;
    let b = bidirectional_dijkstra(&maze)?.ok_or("no path")?;
    assert_eq!(b.cost(), d.cost());
    assert_eq!(b.path(), d.path());
    validate_path(&maze, &b.path())?;

    Ok(())
}

#[test]
fn test_bidirectional_bounded() -> Result<(), Box<dyn Error>> {
    for maze in random_mazes()? {
        let swapped = swap(&maze)?;
        let d = dijkstra(&maze).map(|s| s.cost());

        let first = Bidirectional::new(&maze, node::uninformed, &swapped, node::uninformed).run()?;
        let bounded = Bidirectional::new(&maze, node::uninformed, &swapped, node::uninformed)
            .with_termination(Termination::Bounded)
            .run()?;

        assert_eq!(bounded.as_ref().map(|s| s.cost()), d);
        assert_eq!(first.is_some(), d.is_some());
        if let (Some(first), Some(bounded)) = (first, bounded) {
            assert!(first.cost() >= bounded.cost());
            assert_eq!(first.path().len(), first.cost() as usize + 1);
            validate_path(&maze, &first.path())?;
            validate_path(&maze, &bounded.path())?;
        }
    }
    Ok(())
}

#[test]
fn test_monotonic_reached() -> Result<(), Box<dyn Error>> {
    for maze in random_mazes()?.iter().take(30) {
        let table = build_table(maze, &maze.goal_cell(), manhattan);
        // greedy priorities with cost dominance rediscover states with lower cost
        let mut pushes = vec![];
        BestFirst::new(maze, node::greedy)
            .with_table(&table)
            .with_observer(|s: &Snapshot<Pos, f64>| {
                if s.event == Event::PushChild {
                    pushes.push((s.current, s.cost))
                }
            })
            .run();

        let mut best = HashMap::new();
        best.insert(maze.initial(), 0.0);
        for (p, cost) in pushes {
            if let Some(&old) = best.get(&p) {
                assert!(cost < old, "cost of {:?} increased from {} to {}", p, old, cost);
            }
            best.insert(p, cost);
        }
    }
    Ok(())
}

#[test]
fn test_determinism() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(DETOUR)?;
    let table = build_table(&maze, &maze.goal_cell(), manhattan);

    let run = || {
        let mut events = vec![];
        let sol = BestFirst::new(&maze, node::astar)
            .with_table(&table)
            .with_observer(|s: &Snapshot<Pos, f64>| events.push((s.event, s.current, s.nodes_expanded)))
            .run()
            .map(|s| (s.path(), s.nodes_expanded()));
        (sol, events)
    };
    assert_eq!(run(), run());

    for _ in 0..3 {
        let a = bidirectional_dijkstra(&maze)?.ok_or("no path")?;
        let b = bidirectional_dijkstra(&maze)?.ok_or("no path")?;
        assert_eq!(a.path(), b.path());
        assert_eq!(a.nodes_expanded(), b.nodes_expanded());
    }

    Ok(())
}

#[test]
fn test_snapshots_repeatable() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(
        "
        S........
        .........
        .........
        ........G
        ",
    )?;
    let rev = maze.reversed();

    let unidirectional = || {
        let mut snapshots = vec![];
        BestFirst::new(&maze, node::uninformed)
            .with_observer(|s: &Snapshot<Pos, f64>| snapshots.push(s.clone()))
            .run();
        snapshots
    };
    let a = unidirectional();
    assert!(!a.is_empty());
    assert_eq!(a, unidirectional());
    // reached states are listed in discovery order
    assert_eq!(a[1].reached, vec![(0, 0), (1, 0)]);
    assert_eq!(a[2].reached, vec![(0, 0), (1, 0), (0, 1)]);

    let bidirectional = || -> Result<Vec<Snapshot<Pos, f64>>, Box<dyn Error>> {
        let mut snapshots = vec![];
        Bidirectional::new(&maze, node::uninformed, &rev, node::uninformed)
            .with_termination(Termination::Bounded)
            .with_observer(|s: &Snapshot<Pos, f64>| snapshots.push(s.clone()))
            .run()?;
        Ok(snapshots)
    };
    let b = bidirectional()?;
    assert!(!b.is_empty());
    assert_eq!(b, bidirectional()?);

    Ok(())
}

#[test]
fn test_heuristic_table() -> Result<(), Box<dyn Error>> {
    let maze = Maze::from_ascii(DETOUR)?;
    let table = build_table(&maze, &maze.goal_cell(), manhattan);

    assert_eq!(table.len(), maze.positions().count());
    for p in maze.positions() {
        assert_eq!(table.get(&p), manhattan(&p, &maze.goal_cell()));
    }
    // walls are never reached
    assert!(!table.contains(&(1, 1)));
    assert_eq!(table.get(&(1, 1)), 0.0);
    assert_eq!(table.get(&(100, 100)), 0.0);

    Ok(())
}
