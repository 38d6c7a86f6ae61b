//! Network Topology
//!
//! Undirected drone network with selectable construction strategy and
//! breadth-first shortest-path search. Adjacency is keyed by the stable
//! drone id; drone state stays with the entity that owns it.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use swarm_events::NetworkSummary;

use crate::components::drone::DroneRecord;

/// How a network is wired from an ordered group of drones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    /// Bounded-branching tree: breadth-first parent assignment.
    Tree,
    /// Star: every drone linked to the first one.
    Star,
}

/// Undirected graph over drone ids.
///
/// Edges are symmetric and idempotent by construction. The node list keeps
/// insertion order, which fixes BFS neighbor exploration order.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<u32>,
    adjacency: HashMap<u32, Vec<u32>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a network over the group using the given strategy.
    pub fn build(kind: TopologyKind, branching_factor: usize, records: &[DroneRecord]) -> Self {
        match kind {
            TopologyKind::Tree => Self::tree(records, branching_factor),
            TopologyKind::Star => Self::star(records),
        }
    }

    /// Bounded-branching tree: the first record is the root; a frontier
    /// queue hands each dequeued parent up to `branching_factor` still
    /// unplaced records in input order.
    pub fn tree(records: &[DroneRecord], branching_factor: usize) -> Self {
        let mut network = Self::new();
        let Some(root) = records.first() else {
            return network;
        };
        network.add_node(root.id);

        let mut queue = VecDeque::new();
        queue.push_back(root.id);

        let mut index = 1;
        while let Some(parent) = queue.pop_front() {
            if index >= records.len() {
                break;
            }
            for _ in 0..branching_factor {
                if index >= records.len() {
                    break;
                }
                let child = records[index].id;
                index += 1;
                network.add_node(child);
                network.add_edge(parent, child);
                queue.push_back(child);
            }
        }

        network
    }

    /// Star: the first record is the hub; every other record gets exactly
    /// one edge to it.
    pub fn star(records: &[DroneRecord]) -> Self {
        let mut network = Self::new();
        let Some(hub) = records.first() else {
            return network;
        };
        network.add_node(hub.id);

        for record in &records[1..] {
            network.add_node(record.id);
            network.add_edge(hub.id, record.id);
        }

        network
    }

    /// Adds a node with no edges; re-adding is a no-op.
    pub fn add_node(&mut self, id: u32) {
        if !self.adjacency.contains_key(&id) {
            self.adjacency.insert(id, Vec::new());
            self.nodes.push(id);
        }
    }

    /// Adds a symmetric edge between two existing nodes; missing endpoints
    /// and duplicate edges are no-ops.
    pub fn add_edge(&mut self, a: u32, b: u32) {
        if !self.adjacency.contains_key(&a) || !self.adjacency.contains_key(&b) {
            return;
        }
        let already = self.adjacency.get(&a).map_or(false, |n| n.contains(&b));
        if already {
            return;
        }
        if let Some(neighbors) = self.adjacency.get_mut(&a) {
            neighbors.push(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(&b) {
            neighbors.push(a);
        }
    }

    /// Removes a node and prunes it from every neighbor list.
    pub fn remove_node(&mut self, id: u32) {
        if let Some(neighbors) = self.adjacency.remove(&id) {
            for neighbor in neighbors {
                if let Some(list) = self.adjacency.get_mut(&neighbor) {
                    list.retain(|&n| n != id);
                }
            }
            self.nodes.retain(|&n| n != id);
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    /// Neighbors of a node in edge-insertion order; empty for unknown ids.
    pub fn neighbors(&self, id: u32) -> &[u32] {
        self.adjacency.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn average_degree(&self) -> f32 {
        if self.nodes.is_empty() {
            0.0
        } else {
            (self.edge_count() * 2) as f32 / self.nodes.len() as f32
        }
    }

    /// Breadth-first shortest path by edge count, as a sequence of ids.
    ///
    /// Each queue entry carries the full path so far, so reconstruction is
    /// free. Returns `None` when either endpoint is unknown or the target
    /// is unreachable; `start == target` yields the single-node path.
    pub fn shortest_path(&self, start: u32, target: u32) -> Option<Vec<u32>> {
        if !self.adjacency.contains_key(&start) || !self.adjacency.contains_key(&target) {
            return None;
        }

        let mut queue: VecDeque<Vec<u32>> = VecDeque::new();
        let mut visited: HashSet<u32> = HashSet::new();
        queue.push_back(vec![start]);
        visited.insert(start);

        while let Some(path) = queue.pop_front() {
            let current = match path.last() {
                Some(&c) => c,
                None => continue,
            };
            if current == target {
                return Some(path);
            }
            for &neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    let mut next_path = path.clone();
                    next_path.push(neighbor);
                    queue.push_back(next_path);
                }
            }
        }

        None
    }

    /// Shape summary for the metrics sink.
    pub fn summary(&self, name: &str, bfs_latency_ms: Option<f32>) -> NetworkSummary {
        NetworkSummary {
            network: name.to_string(),
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            average_degree: self.average_degree(),
            bfs_latency_ms,
        }
    }
}
