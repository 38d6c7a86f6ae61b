//! Drone Roster
//!
//! The membership registry of live drones. Keeps the insertion-ordered id
//! sequence that feeds the partitioner and topology builders, and owns the
//! monotonic id allocator.

use bevy_ecs::prelude::*;

use crate::components::drone::DroneRecord;

/// Resource: ordered registry of live drone ids.
///
/// Appends are O(1) pushes to the tail. Removal unlinks by value and is a
/// no-op for absent ids. Drones that died since the last pass are pruned
/// lazily while taking a snapshot.
#[derive(Resource, Debug, Default)]
pub struct DroneRoster {
    entries: Vec<u32>,
    next_id: u32,
}

impl DroneRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next drone id (running counter, post-increment).
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends an id to the tail of the live sequence.
    pub fn append(&mut self, id: u32) {
        self.entries.push(id);
    }

    /// Unlinks an id; absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: u32) {
        self.entries.retain(|&entry| entry != id);
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered ids in insertion order.
    pub fn ids(&self) -> &[u32] {
        &self.entries
    }

    /// Ordered records of the currently-active drones.
    ///
    /// `lookup` resolves an id to its current record, or `None` for an id
    /// whose entity no longer exists. Entries that resolve to an inactive or
    /// missing drone are unlinked as a side effect (lazy deletion).
    pub fn snapshot<F>(&mut self, lookup: F) -> Vec<DroneRecord>
    where
        F: Fn(u32) -> Option<DroneRecord>,
    {
        let mut records = Vec::with_capacity(self.entries.len());
        self.entries.retain(|&id| match lookup(id) {
            Some(record) if record.active => {
                records.push(record);
                true
            }
            _ => false,
        });
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::world::Vec2;

    fn record(id: u32, active: bool) -> DroneRecord {
        let mut r = DroneRecord::new(id, 20, Vec2::ZERO);
        r.active = active;
        r
    }

    #[test]
    fn test_allocate_id_monotonic() {
        let mut roster = DroneRoster::new();
        assert_eq!(roster.allocate_id(), 0);
        assert_eq!(roster.allocate_id(), 1);
        assert_eq!(roster.allocate_id(), 2);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut roster = DroneRoster::new();
        for id in [5, 3, 9] {
            roster.append(id);
        }
        assert_eq!(roster.ids(), &[5, 3, 9]);
    }

    #[test]
    fn test_remove_head_middle_and_absent() {
        let mut roster = DroneRoster::new();
        for id in 0..4 {
            roster.append(id);
        }

        roster.remove(0);
        assert_eq!(roster.ids(), &[1, 2, 3]);

        roster.remove(2);
        assert_eq!(roster.ids(), &[1, 3]);

        // Absent id is a no-op
        roster.remove(42);
        assert_eq!(roster.ids(), &[1, 3]);
    }

    #[test]
    fn test_snapshot_prunes_inactive() {
        let mut roster = DroneRoster::new();
        for id in 0..5 {
            roster.append(id);
        }

        let records = roster.snapshot(|id| {
            if id == 1 || id == 3 {
                Some(record(id, false))
            } else if id == 4 {
                None // entity despawned
            } else {
                Some(record(id, true))
            }
        });

        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2]);
        // Dead entries were unlinked as a side effect
        assert_eq!(roster.ids(), &[0, 2]);
    }
}
