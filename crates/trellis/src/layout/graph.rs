//! The per-pass dependency graph between sibling views.
//!
//! Nodes are the direct subviews of one superview, held in an index arena.
//! An edge (a, b) means b's constraints read a's frame, so a must be resolved
//! first. The graph is rebuilt for every pass and never stored.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    error::{Error, Result},
    id::ViewId,
};

/// Sibling dependency graph.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Nodes, in subview order.
    nodes: Vec<ViewId>,
    /// Edges as (referenced, referencing) node indices, deduplicated.
    edges: Vec<(usize, usize)>,
}

impl DependencyGraph {
    /// Build the graph for `children`. `references` yields every view named by
    /// a child's constraints. A reference to a view outside the set is allowed
    /// only if `is_enclosing` accepts it (the superview or one of its
    /// ancestors); such references add no edge.
    pub fn build(
        children: &[ViewId],
        mut references: impl FnMut(ViewId) -> Vec<ViewId>,
        is_enclosing: impl Fn(ViewId) -> bool,
    ) -> Result<Self> {
        let index = |id: ViewId| children.iter().position(|c| *c == id);
        let mut edges = Vec::new();
        for (to, &view) in children.iter().enumerate() {
            for target in references(view) {
                if target == view {
                    continue;
                }
                match index(target) {
                    Some(from) => {
                        if !edges.contains(&(from, to)) {
                            edges.push((from, to));
                        }
                    }
                    None if is_enclosing(target) => {}
                    None => return Err(Error::UnresolvedReference { view, target }),
                }
            }
        }
        Ok(Self {
            nodes: children.to_vec(),
            edges,
        })
    }

    /// Edges as (referenced, referencing) view pairs.
    pub fn edges(&self) -> impl Iterator<Item = (ViewId, ViewId)> + '_ {
        self.edges
            .iter()
            .map(|(a, b)| (self.nodes[*a], self.nodes[*b]))
    }

    /// A resolution order. Views with no pending dependencies go first, in
    /// subview order. Views caught in a cycle cannot be strictly ordered; they
    /// are appended in subview order and each is evaluated against whatever
    /// geometry its peers have at that point.
    pub fn order(&self) -> Vec<ViewId> {
        let n = self.nodes.len();
        let mut indegree = vec![0usize; n];
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(a, b) in &self.edges {
            indegree[b] += 1;
            out[a].push(b);
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|i| indegree[*i] == 0).collect();
        let mut placed = vec![false; n];
        let mut result = Vec::with_capacity(n);
        while let Some(i) = queue.pop_front() {
            placed[i] = true;
            result.push(self.nodes[i]);
            for &j in &out[i] {
                indegree[j] -= 1;
                if indegree[j] == 0 {
                    queue.push_back(j);
                }
            }
        }

        if result.len() < n {
            let cyclic: Vec<ViewId> = (0..n)
                .filter(|i| !placed[*i])
                .map(|i| self.nodes[i])
                .collect();
            debug!(?cyclic, "unorderable sibling references, resolving independently");
            result.extend(cyclic);
        }
        result
    }
}
