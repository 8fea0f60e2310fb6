//! Resolved dependency graph construction and traversal.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use vsolve_core::constraint::Constraint;
use vsolve_core::package::PackageName;
use vsolve_core::version::Version;

use crate::solver::Selection;

/// A node in the resolved graph. The root (the project itself) has no version.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResolvedNode {
    pub name: String,
    pub version: Option<Version>,
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{} {}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}

/// Edge label: the range the dependent asked for.
#[derive(Debug, Clone)]
pub struct DepEdge {
    pub constraint: Constraint,
}

/// The packages of a solution linked by the dependency edges of the chosen
/// records, backed by petgraph.
pub struct ResolvedGraph {
    graph: DiGraph<ResolvedNode, DepEdge>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl ResolvedGraph {
    /// Build the graph for `selection`, which must have been produced from
    /// `dependencies`.
    pub fn build(
        root_name: &str,
        dependencies: &BTreeMap<PackageName, Constraint>,
        selection: &Selection<'_>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(ResolvedNode {
            name: root_name.to_string(),
            version: None,
        });
        let mut resolved = Self {
            graph,
            index: HashMap::new(),
            root,
        };

        for (name, record) in selection {
            let idx = resolved.graph.add_node(ResolvedNode {
                name: name.clone(),
                version: Some(record.version),
            });
            resolved.index.insert(name.clone(), idx);
        }

        for (name, constraint) in dependencies {
            if let Some(to) = resolved.find(name) {
                resolved.add_edge(root, to, *constraint);
            }
        }

        for (name, record) in selection {
            let Some(from) = resolved.find(name) else {
                continue;
            };
            for (dep, constraint) in &record.dependencies {
                if let Some(to) = resolved.find(dep) {
                    resolved.add_edge(from, to, *constraint);
                }
            }
        }

        resolved
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, constraint: Constraint) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, DepEdge { constraint });
        }
    }

    /// Look up a package node by name.
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ResolvedNode {
        &self.graph[idx]
    }

    /// Direct dependencies of a node, ordered by name.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DepEdge)> {
        self.neighbors(idx, Direction::Outgoing)
    }

    /// Reverse dependencies (who depends on this node), ordered by name.
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DepEdge)> {
        self.neighbors(idx, Direction::Incoming)
    }

    fn neighbors(&self, idx: NodeIndex, direction: Direction) -> Vec<(NodeIndex, &DepEdge)> {
        let mut found: Vec<(NodeIndex, &DepEdge)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| match direction {
                Direction::Outgoing => (e.target(), e.weight()),
                Direction::Incoming => (e.source(), e.weight()),
            })
            .collect();
        found.sort_by(|a, b| self.graph[a.0].name.cmp(&self.graph[b.0].name));
        found
    }

    /// Print the dependency tree to a string.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.graph[self.root]);
        let mut visited = HashSet::new();
        visited.insert(self.root);

        let deps = self.dependencies_of(self.root);
        let count = deps.len();
        for (i, (idx, _)) in deps.iter().enumerate() {
            self.print_subtree(&mut output, *idx, "", i == count - 1, 1, max_depth, &mut visited);
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        // Cut cycles: a node already on the current path is printed but not expanded.
        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, _)) in deps.iter().enumerate() {
            self.print_subtree(
                output,
                *child,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }

    /// Find a path from the root to the named package, if it is part of the
    /// solution.
    pub fn find_path(&self, name: &str) -> Option<Vec<&ResolvedNode>> {
        let target = self.find(name)?;
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if self.dfs_path(self.root, target, &mut path, &mut visited) {
            Some(path.iter().map(|&idx| &self.graph[idx]).collect())
        } else {
            None
        }
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        if !visited.insert(current) {
            return false;
        }
        path.push(current);
        if current == target {
            return true;
        }
        for (child, _) in self.dependencies_of(current) {
            if self.dfs_path(child, target, path, visited) {
                return true;
            }
        }
        path.pop();
        false
    }
}
