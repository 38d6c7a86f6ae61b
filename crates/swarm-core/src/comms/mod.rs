//! Communication Structures
//!
//! The per-partition directory indexes, the temperature partitioner, and the
//! network topologies with BFS path search. Everything here is rebuilt from
//! the live membership every tick; queries run against whichever build is
//! current.

use bevy_ecs::prelude::*;
use std::fmt;

use crate::components::drone::DroneRecord;
use crate::config::TopologyConfig;

pub mod directory;
pub mod network;
pub mod partition;

pub use directory::Directory;
pub use network::{Network, TopologyKind};
pub use partition::{partition, pivot_temperature};

/// Result of probing the directories: the record (if any) plus the simulated
/// cost accumulated over every hop taken, across both trees.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub record: Option<DroneRecord>,
    pub cost: f32,
}

/// Resource: the two per-partition directories, replaced wholesale on each
/// rebuild. Queries probe the low-partition tree first and fall back to the
/// high one, accumulating cost across both.
#[derive(Resource, Debug, Default)]
pub struct DirectoryPair {
    pub low: Directory,
    pub high: Directory,
    /// Pivot used for the split this tick; `None` before the first rebuild
    /// or when the flock was empty.
    pub pivot: Option<i32>,
}

impl DirectoryPair {
    pub fn new(time_factor: f32) -> Self {
        Self {
            low: Directory::new(time_factor),
            high: Directory::new(time_factor),
            pivot: None,
        }
    }

    /// Rebuilds both trees from the partitioned groups.
    pub fn rebuild(&mut self, time_factor: f32, low: &[DroneRecord], high: &[DroneRecord]) {
        self.low = Directory::rebuild(time_factor, low);
        self.high = Directory::rebuild(time_factor, high);
    }

    pub fn live_count(&self) -> usize {
        self.low.len() + self.high.len()
    }

    /// Point lookup across both trees.
    pub fn search_by_id(&self, id: u32) -> SearchOutcome {
        let (record, mut cost) = self.low.find(id);
        if record.is_some() {
            return SearchOutcome { record, cost };
        }
        let (record, high_cost) = self.high.find(id);
        cost += high_cost;
        SearchOutcome { record, cost }
    }

    /// Locates and deletes a drone, returning its record and the lookup cost.
    pub fn delete_by_id(&mut self, id: u32) -> (Option<DroneRecord>, f32) {
        let (found, mut cost) = self.low.find(id);
        if found.is_some() {
            return (self.low.delete(id), cost);
        }
        let (found, high_cost) = self.high.find(id);
        cost += high_cost;
        if found.is_some() {
            (self.high.delete(id), cost)
        } else {
            (None, cost)
        }
    }

    /// Exhaustive predicate search across both trees.
    pub fn search_by_predicate<F>(&self, predicate: F) -> SearchOutcome
    where
        F: Fn(&DroneRecord) -> bool,
    {
        let (record, mut cost) = self.low.search(&predicate);
        if record.is_some() {
            return SearchOutcome { record, cost };
        }
        let (record, high_cost) = self.high.search(&predicate);
        cost += high_cost;
        SearchOutcome { record, cost }
    }

    /// Flags a drone inactive in whichever tree holds it.
    pub fn mark_inactive(&mut self, id: u32) -> bool {
        self.low.mark_inactive(id) || self.high.mark_inactive(id)
    }
}

/// Which of the two communication networks a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    /// Built over the low partition.
    Primary,
    /// Built over the high partition.
    Secondary,
}

impl NetworkId {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkId::Primary => "primary",
            NetworkId::Secondary => "secondary",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource: the two communication networks, rebuilt alongside the
/// directories each tick.
#[derive(Resource, Debug, Default)]
pub struct NetworkPair {
    pub primary: Network,
    pub secondary: Network,
}

impl NetworkPair {
    pub fn get(&self, id: NetworkId) -> &Network {
        match id {
            NetworkId::Primary => &self.primary,
            NetworkId::Secondary => &self.secondary,
        }
    }

    /// Rebuilds both networks from the partitioned groups.
    pub fn rebuild(&mut self, config: &TopologyConfig, low: &[DroneRecord], high: &[DroneRecord]) {
        self.primary = Network::build(config.primary, config.branching_factor, low);
        self.secondary = Network::build(config.secondary, config.branching_factor, high);
    }

    /// Drops a drone from both networks, pruning its edges.
    pub fn remove_node(&mut self, id: u32) {
        self.primary.remove_node(id);
        self.secondary.remove_node(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::world::Vec2;

    const TIME_FACTOR: f32 = 0.1;

    fn record(id: u32, temperature: i32) -> DroneRecord {
        DroneRecord::new(id, temperature, Vec2::ZERO)
    }

    fn pair_from(records: &[DroneRecord]) -> DirectoryPair {
        let (low, high) = partition(records);
        let mut pair = DirectoryPair::new(TIME_FACTOR);
        pair.pivot = pivot_temperature(records);
        pair.rebuild(TIME_FACTOR, &low, &high);
        pair
    }

    #[test]
    fn test_search_falls_back_to_high_tree() {
        let records: Vec<DroneRecord> = (0..6)
            .map(|id| record(id, if id % 2 == 0 { 10 } else { 90 }))
            .collect();
        let pair = pair_from(&records);

        // Odd ids live in the high tree but are still found.
        assert!(pair.search_by_id(3).record.is_some());
        assert!(pair.search_by_id(4).record.is_some());
        assert!(pair.search_by_id(99).record.is_none());
        assert_eq!(pair.live_count(), 6);
    }

    #[test]
    fn test_delete_by_id_targets_the_right_tree() {
        let records: Vec<DroneRecord> = (0..6)
            .map(|id| record(id, if id % 2 == 0 { 10 } else { 90 }))
            .collect();
        let mut pair = pair_from(&records);

        let (removed, _) = pair.delete_by_id(5);
        assert_eq!(removed.map(|r| r.id), Some(5));
        assert!(pair.search_by_id(5).record.is_none());
        assert_eq!(pair.live_count(), 5);

        let (missing, _) = pair.delete_by_id(42);
        assert!(missing.is_none());
        assert_eq!(pair.live_count(), 5);
    }

    #[test]
    fn test_predicate_search_spans_both_trees() {
        let records: Vec<DroneRecord> = (0..6)
            .map(|id| record(id, if id % 2 == 0 { 10 } else { 90 }))
            .collect();
        let pair = pair_from(&records);

        let outcome = pair.search_by_predicate(|r| r.temperature > 50);
        assert!(outcome.record.is_some());
        assert_eq!(outcome.record.map(|r| r.temperature), Some(90));
    }

    #[test]
    fn test_mark_inactive_hits_either_tree() {
        let records: Vec<DroneRecord> = (0..4)
            .map(|id| record(id, if id % 2 == 0 { 10 } else { 90 }))
            .collect();
        let mut pair = pair_from(&records);

        assert!(pair.mark_inactive(1));
        assert!(pair.search_by_id(1).record.is_none());
        assert!(!pair.mark_inactive(99));
    }
}
