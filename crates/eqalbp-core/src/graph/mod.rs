//! Directed-graph utilities over the precedence DAG.
//!
//! Nodes are dense `usize` ids `0..n`. Edges point from a node to the nodes it
//! depends on, so a valid topological order lists dependencies first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::equipment::EquipmentSet;
use crate::error::GraphError;


/// A dependency graph: `dependencies[n]` lists the direct dependencies of `n`.
///
/// Dependency lists are sorted and deduplicated on construction. Edges to
/// unknown nodes are kept so that [`validate`](Self::validate) can report them.
///
/// # Examples
///
/// ```
/// use eqalbp_core::DependencyGraph;
///
/// // 0 -> 2, 1 -> 2, 2 -> 3
/// let graph = DependencyGraph::new(vec![vec![], vec![], vec![0, 1], vec![2]]);
/// assert_eq!(graph.topological_sort().unwrap(), vec![0, 1, 2, 3]);
/// assert_eq!(graph.topological_layers().unwrap(), vec![vec![0, 1], vec![2], vec![3]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    dependencies: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Creates a graph from per-node dependency lists.
    pub fn new(mut dependencies: Vec<Vec<usize>>) -> Self {
        for deps in &mut dependencies {
            deps.sort_unstable();
            deps.dedup();
        }
        Self { dependencies }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    /// Returns the direct dependencies of `node`.
    pub fn dependencies(&self, node: usize) -> &[usize] {
        &self.dependencies[node]
    }

    /// Checks that every edge targets a known node.
    pub fn validate(&self) -> Result<(), GraphError> {
        let n = self.node_count();
        for (node, deps) in self.dependencies.iter().enumerate() {
            if let Some(&dependency) = deps.iter().find(|&&d| d >= n) {
                return Err(GraphError::UnknownNode { node, dependency });
            }
        }
        Ok(())
    }

    /// Builds the dependent-on-me graph: `flipped.dependencies(d)` lists every
    /// node that depends on `d`, in ascending order.
    ///
    /// Edges to unknown nodes are dropped.
    pub fn flip_edges(&self) -> DependencyGraph {
        let n = self.node_count();
        let mut successors = vec![Vec::new(); n];
        for (node, deps) in self.dependencies.iter().enumerate() {
            for &d in deps {
                if d < n {
                    successors[d].push(node);
                }
            }
        }
        DependencyGraph {
            dependencies: successors,
        }
    }

    /// Total order consistent with the DAG. Among the nodes ready at any
    /// point, the smallest id comes first.
    pub fn topological_sort(&self) -> Result<Vec<usize>, GraphError> {
        self.validate()?;
        let successors = self.flip_edges();
        let mut remaining: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = remaining
            .iter()
            .enumerate()
            .filter(|(_, &count)| count == 0)
            .map(|(node, _)| Reverse(node))
            .collect();

        let mut order = Vec::with_capacity(self.node_count());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for &s in successors.dependencies(node) {
                remaining[s] -= 1;
                if remaining[s] == 0 {
                    ready.push(Reverse(s));
                }
            }
        }

        if order.len() < self.node_count() {
            return Err(self.cycle_error());
        }
        Ok(order)
    }

    /// Partitions nodes into strata `L0, L1, ...` where `Li` holds exactly the
    /// nodes whose dependencies all lie in `L0..Li-1`. Each layer is sorted.
    pub fn topological_layers(&self) -> Result<Vec<Vec<usize>>, GraphError> {
        self.validate()?;
        let successors = self.flip_edges();
        let mut remaining: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut layer: Vec<usize> = (0..self.node_count())
            .filter(|&node| remaining[node] == 0)
            .collect();

        let mut layers = Vec::new();
        let mut placed = 0;
        while !layer.is_empty() {
            placed += layer.len();
            let mut next = Vec::new();
            for &node in &layer {
                for &s in successors.dependencies(node) {
                    remaining[s] -= 1;
                    if remaining[s] == 0 {
                        next.push(s);
                    }
                }
            }
            next.sort_unstable();
            layers.push(std::mem::replace(&mut layer, next));
        }

        if placed < self.node_count() {
            return Err(self.cycle_error());
        }
        Ok(layers)
    }

    /// Returns the layer index of every node (see
    /// [`topological_layers`](Self::topological_layers)).
    pub fn layer_indices(&self) -> Result<Vec<usize>, GraphError> {
        let mut indices = vec![0; self.node_count()];
        for (i, layer) in self.topological_layers()?.iter().enumerate() {
            for &node in layer {
                indices[node] = i;
            }
        }
        Ok(indices)
    }

    fn cycle_error(&self) -> GraphError {
        GraphError::Cycle {
            path: self.find_cycle().unwrap_or_default(),
        }
    }

    /// Finds a cycle, returned in dependency order and closed (first node
    /// repeated at the end). Edges to unknown nodes are ignored.
    ///
    /// Iterative depth-first search; no recursion depth limit applies.
    pub fn find_cycle(&self) -> Option<Vec<usize>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            OnStack,
            Done,
        }

        let n = self.node_count();
        let mut mark = vec![Mark::New; n];
        // (node, index of the next dependency to visit)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if mark[root] != Mark::New {
                continue;
            }
            mark[root] = Mark::OnStack;
            stack.push((root, 0));

            while let Some(top) = stack.last_mut() {
                let (node, next) = *top;
                let Some(&dep) = self.dependencies[node].get(next) else {
                    mark[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                top.1 += 1;
                if dep >= n {
                    continue;
                }
                match mark[dep] {
                    Mark::New => {
                        mark[dep] = Mark::OnStack;
                        stack.push((dep, 0));
                    }
                    Mark::OnStack => {
                        let start = stack.iter().position(|&(v, _)| v == dep)?;
                        let mut path: Vec<usize> = stack[start..].iter().map(|&(v, _)| v).collect();
                        path.push(dep);
                        return Some(path);
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }

    /// Computes the transitive closure of the dependency relation for every
    /// node, in one pass over a topological order: each closure is the union of
    /// its direct dependencies and their closures.
    pub fn deep_dependencies(&self) -> Result<Vec<EquipmentSet>, GraphError> {
        let order = self.topological_sort()?;
        Ok(self.deep_dependencies_in_order(&order))
    }

    /// Same as [`deep_dependencies`](Self::deep_dependencies), reusing a
    /// precomputed topological order.
    pub fn deep_dependencies_in_order(&self, order: &[usize]) -> Vec<EquipmentSet> {
        let mut closures = vec![EquipmentSet::new(); self.node_count()];
        for &node in order {
            let closure = self.dependencies[node]
                .iter()
                .fold(EquipmentSet::new(), |acc, &d| acc.union(&closures[d]).with(d));
            closures[node] = closure;
        }
        closures
    }
}
