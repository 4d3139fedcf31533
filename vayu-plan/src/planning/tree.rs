//! Arena-backed planning tree.
//!
//! Nodes live in an append-only `Vec` and refer to their parent by
//! [`NodeId`]. Rewiring overwrites a node's parent index and cost in place;
//! nothing is ever removed.
//!
//! Stored costs satisfy `cost(child) >= cost(parent) + |child - parent|` at
//! all times, with equality right after insertion or rewiring. A rewire lowers
//! one node's cost without touching its descendants unless
//! [`PlanningTree::propagate_cost`] is called, so descendants may carry stale
//! (too high) costs. Because stale costs only ever err high, a rewire can
//! never pick a descendant as the new parent and the parent graph stays a tree.

use std::collections::VecDeque;

use serde::Serialize;

use crate::core::WorldPoint;

/// Stable index of a node in its [`PlanningTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Insertion index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One explored configuration.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Node position
    pub position: WorldPoint,
    /// Parent node, `None` only for the root
    pub parent: Option<NodeId>,
    /// Path length from the root along parent links
    pub cost: f64,
}

/// `(child, parent)` segment for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TreeEdge {
    /// Child node position
    pub child: WorldPoint,
    /// Parent node position
    pub parent: WorldPoint,
}

/// Growable tree rooted at the start position.
#[derive(Clone, Debug)]
pub struct PlanningTree {
    nodes: Vec<TreeNode>,
}

impl PlanningTree {
    /// Tree holding only the root.
    pub fn new(root: WorldPoint) -> Self {
        Self::with_capacity(root, 1)
    }

    /// Tree holding only the root, with room for `capacity` nodes.
    pub fn with_capacity(root: WorldPoint, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(TreeNode {
            position: root,
            parent: None,
            cost: 0.0,
        });
        Self { nodes }
    }

    /// Root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id.
    ///
    /// # Panics
    /// If `id` came from a different tree and is out of range.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Nodes in insertion order with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Node closest to `target`. Ties go to the earliest inserted node.
    pub fn nearest(&self, target: WorldPoint) -> NodeId {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (i, n) in self.nodes.iter().enumerate() {
            let d = n.position.distance_squared(&target);
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        NodeId(best)
    }

    /// All nodes within `radius` of `target` (inclusive), in insertion order.
    pub fn within_radius(&self, target: WorldPoint, radius: f64) -> Vec<NodeId> {
        let r_sq = radius * radius;
        self.iter()
            .filter(|(_, n)| n.position.distance_squared(&target) <= r_sq)
            .map(|(id, _)| id)
            .collect()
    }

    /// Insert a new node under `parent`.
    pub fn append(&mut self, position: WorldPoint, parent: NodeId, cost: f64) -> NodeId {
        debug_assert!(parent.0 < self.nodes.len(), "parent {parent:?} not in tree");
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            position,
            parent: Some(parent),
            cost,
        });
        id
    }

    /// Reattach `id` under `new_parent` with a strictly lower cost.
    ///
    /// Descendants keep their old costs; see [`PlanningTree::propagate_cost`].
    pub fn rewire(&mut self, id: NodeId, new_parent: NodeId, new_cost: f64) {
        debug_assert!(id != self.root(), "root cannot be rewired");
        debug_assert!(
            new_cost < self.nodes[id.0].cost,
            "rewire must lower cost ({} -> {})",
            self.nodes[id.0].cost,
            new_cost
        );
        let node = &mut self.nodes[id.0];
        node.parent = Some(new_parent);
        node.cost = new_cost;
    }

    /// Recompute costs of every descendant of `id` from their parents.
    ///
    /// Returns the number of nodes updated.
    pub fn propagate_cost(&mut self, id: NodeId) -> usize {
        let mut updated = 0;
        let mut queue = VecDeque::from([id]);
        while let Some(parent) = queue.pop_front() {
            let parent_pos = self.nodes[parent.0].position;
            let parent_cost = self.nodes[parent.0].cost;
            for i in 0..self.nodes.len() {
                if self.nodes[i].parent == Some(parent) {
                    let child = &mut self.nodes[i];
                    child.cost = parent_cost + child.position.distance(&parent_pos);
                    updated += 1;
                    queue.push_back(NodeId(i));
                }
            }
        }
        updated
    }

    /// Positions from `id` back to the root, `id` first.
    pub fn path_to_root(&self, id: NodeId) -> Vec<WorldPoint> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = &self.nodes[c.0];
            path.push(node.position);
            current = node.parent;
        }
        path
    }

    /// Root-to-goal waypoints through `terminal`, ending exactly at `goal`.
    pub fn extract_path(&self, terminal: NodeId, goal: WorldPoint) -> Vec<WorldPoint> {
        let mut path = self.path_to_root(terminal);
        path.reverse();
        path.push(goal);
        path
    }

    /// Every `(child, parent)` pair.
    pub fn edges(&self) -> Vec<TreeEdge> {
        self.nodes
            .iter()
            .filter_map(|n| {
                n.parent.map(|p| TreeEdge {
                    child: n.position,
                    parent: self.nodes[p.0].position,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::SQRT_2;

    /// root(0,0) ─ a(0,1) ─ b(1,1) ─ c(2,1)
    fn chain() -> (PlanningTree, [NodeId; 3]) {
        let mut tree = PlanningTree::new(WorldPoint::ZERO);
        let a = tree.append(WorldPoint::new(0.0, 1.0), tree.root(), 1.0);
        let b = tree.append(WorldPoint::new(1.0, 1.0), a, 2.0);
        let c = tree.append(WorldPoint::new(2.0, 1.0), b, 3.0);
        (tree, [a, b, c])
    }

    #[test]
    fn test_root() {
        let tree = PlanningTree::new(WorldPoint::new(1.0, 2.0));
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        let root = tree.node(tree.root());
        assert_eq!(root.position, WorldPoint::new(1.0, 2.0));
        assert!(root.parent.is_none());
        assert_eq!(root.cost, 0.0);
    }

    #[test]
    fn test_nearest_tie_prefers_first() {
        let mut tree = PlanningTree::new(WorldPoint::new(-1.0, 0.0));
        let right = tree.append(WorldPoint::new(1.0, 0.0), tree.root(), 2.0);
        assert_eq!(tree.nearest(WorldPoint::ZERO), tree.root());
        assert_eq!(tree.nearest(WorldPoint::new(0.9, 0.0)), right);
    }

    #[test]
    fn test_within_radius_inclusive() {
        let (tree, [a, b, _]) = chain();
        let near = tree.within_radius(WorldPoint::new(0.5, 1.0), 0.5);
        assert_eq!(near, vec![a, b]);
        assert!(tree.within_radius(WorldPoint::new(0.5, 5.0), 1.0).is_empty());
    }

    #[test]
    fn test_extract_path_ends_at_goal() {
        let (tree, [_, _, c]) = chain();
        let path = tree.extract_path(c, WorldPoint::new(3.2, 0.1));
        assert_eq!(path.first(), Some(&WorldPoint::ZERO));
        assert_eq!(path.last(), Some(&WorldPoint::new(3.2, 0.1)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_rewire_leaves_descendants_stale() {
        let (mut tree, [_, b, c]) = chain();
        // Diagonal from the root reaches b for sqrt(2) instead of 2.
        tree.rewire(b, tree.root(), SQRT_2);
        assert_eq!(tree.node(b).parent, Some(tree.root()));
        assert_relative_eq!(
            tree.node(b).cost,
            tree.node(tree.root()).cost + tree.node(b).position.distance(&WorldPoint::ZERO)
        );
        // c still carries the cost computed through the old b.
        assert_eq!(tree.node(c).cost, 3.0);
        assert!(tree.node(c).cost > tree.node(b).cost + 1.0);
    }

    #[test]
    fn test_propagate_cost_updates_descendants() {
        let (mut tree, [_, b, c]) = chain();
        tree.rewire(b, tree.root(), SQRT_2);
        let updated = tree.propagate_cost(b);
        assert_eq!(updated, 1);
        assert_relative_eq!(tree.node(c).cost, SQRT_2 + 1.0);
    }

    #[test]
    fn test_edges() {
        let (tree, _) = chain();
        let edges = tree.edges();
        assert_eq!(edges.len(), 3);
        assert_eq!(
            edges[0],
            TreeEdge {
                child: WorldPoint::new(0.0, 1.0),
                parent: WorldPoint::ZERO
            }
        );
    }
}
