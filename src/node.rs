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

//! Search tree nodes.
//!
//! The nodes created during a search are stored in an arena, a [`Tree`]. A
//! node refers to its parent by a [`NodeId`], which is just the index of the
//! parent in the arena. The tree outlives the frontier and the reached table
//! of the search, so paths can be reconstructed after the search finished.
//!
//! The module also provides the three standard evaluation functions
//! [`uninformed`], [`greedy`] and [`astar`].

use std::ops::Add;

/// Handle of a node in a [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

impl NodeId {
    /// Return the index of the node in its tree.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the search tree.
#[derive(Clone, Debug)]
pub struct Node<S, A, D> {
    /// The state represented by this node.
    pub state: S,
    /// The parent node, `None` for a root.
    pub parent: Option<NodeId>,
    /// The action leading from the parent to this node, `None` for a root.
    pub action: Option<A>,
    /// The path cost from the root.
    pub g: D,
    /// The heuristic estimate of the remaining cost.
    pub h: D,
}

impl<S, A, D> Node<S, A, D>
where
    D: Copy + Add<Output = D>,
{
    /// The priority in uninformed search, i.e. `g`.
    pub fn f_uninformed(&self) -> D {
        self.g
    }

    /// The priority in greedy search, i.e. `h`.
    pub fn f_greedy(&self) -> D {
        self.h
    }

    /// The priority in A*-search, i.e. `g + h`.
    pub fn f_astar(&self) -> D {
        self.g + self.h
    }
}

/// Evaluation function of uniform-cost search (Dijkstra).
pub fn uninformed<S, A, D>(node: &Node<S, A, D>) -> D
where
    D: Copy + Add<Output = D>,
{
    node.f_uninformed()
}

/// Evaluation function of greedy best-first search.
pub fn greedy<S, A, D>(node: &Node<S, A, D>) -> D
where
    D: Copy + Add<Output = D>,
{
    node.f_greedy()
}

/// Evaluation function of A*-search.
pub fn astar<S, A, D>(node: &Node<S, A, D>) -> D
where
    D: Copy + Add<Output = D>,
{
    node.f_astar()
}

/// An arena of search tree nodes.
///
/// Nodes are never removed, so a [`NodeId`] stays valid as long as the tree
/// exists.
#[derive(Clone, Debug)]
pub struct Tree<S, A, D> {
    nodes: Vec<Node<S, A, D>>,
}

impl<S, A, D> Default for Tree<S, A, D> {
    fn default() -> Self {
        Tree { nodes: vec![] }
    }
}

impl<S, A, D> Tree<S, A, D> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a new root node.
    pub fn add_root(&mut self, state: S, g: D, h: D) -> NodeId {
        self.add(Node {
            state,
            parent: None,
            action: None,
            g,
            h,
        })
    }

    /// Add a new node with parent `parent`.
    pub fn add_child(&mut self, parent: NodeId, action: A, state: S, g: D, h: D) -> NodeId {
        self.add(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            g,
            h,
        })
    }

    /// Add a node.
    ///
    /// The parent of the node, if any, must be contained in this tree.
    pub fn add(&mut self, node: Node<S, A, D>) -> NodeId {
        debug_assert!(node.parent.map(|p| p.0 < self.nodes.len()).unwrap_or(true));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Return the node with the given handle.
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node<S, A, D> {
        &self.nodes[id.0]
    }

    /// Return a mutable reference to the node with the given handle.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<S, A, D> {
        &mut self.nodes[id.0]
    }

    /// Return an iterator over the handles from `id` up to its root.
    ///
    /// The first element is `id` itself, the last one the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let u = cur?;
            cur = self.nodes[u.0].parent;
            Some(u)
        })
    }

    /// Return the states on the path from the root to `id`.
    pub fn path(&self, id: NodeId) -> Vec<S>
    where
        S: Clone,
    {
        let mut path = self.ancestors(id).map(|u| self.nodes[u.0].state.clone()).collect::<Vec<_>>();
        path.reverse();
        path
    }

    /// Return the actions on the path from the root to `id`.
    pub fn actions(&self, id: NodeId) -> Vec<A>
    where
        A: Clone,
    {
        let mut actions = self
            .ancestors(id)
            .filter_map(|u| self.nodes[u.0].action.clone())
            .collect::<Vec<_>>();
        actions.reverse();
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::{astar, greedy, uninformed, Tree};

    #[test]
    fn test_path() {
        let mut tree = Tree::new();
        let r = tree.add_root('r', 0, 3);
        let a = tree.add_child(r, 1, 'a', 1, 2);
        let b = tree.add_child(a, 2, 'b', 3, 1);
        // a sibling branch sharing the same ancestors
        let c = tree.add_child(a, 3, 'c', 2, 5);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.path(b), vec!['r', 'a', 'b']);
        assert_eq!(tree.path(c), vec!['r', 'a', 'c']);
        assert_eq!(tree.path(r), vec!['r']);
        assert_eq!(tree.actions(b), vec![1, 2]);
        assert!(tree.actions(r).is_empty());
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![c, a, r]);
    }

    #[test]
    fn test_evaluation() {
        let mut tree = Tree::<(), (), u32>::new();
        let r = tree.add_root((), 4, 7);
        let node = tree.node(r);
        assert_eq!(uninformed(node), 4);
        assert_eq!(greedy(node), 7);
        assert_eq!(astar(node), 11);
    }
}
