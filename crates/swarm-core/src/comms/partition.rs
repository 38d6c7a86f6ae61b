//! Temperature Partitioner
//!
//! Splits a snapshot of live drones into two disjoint groups around a pivot
//! temperature. The pivot is the first record's temperature, not a median:
//! the split is deterministic and O(n), and the whole thing is redone every
//! tick because temperatures re-randomize continuously.

use crate::components::drone::DroneRecord;

/// Splits records into `(low, high)` groups: `temperature <= pivot` goes
/// low, everything else high. An empty input yields two empty groups.
pub fn partition(records: &[DroneRecord]) -> (Vec<DroneRecord>, Vec<DroneRecord>) {
    let mut low = Vec::new();
    let mut high = Vec::new();

    let Some(first) = records.first() else {
        return (low, high);
    };
    let pivot = first.temperature;

    for &record in records {
        if record.temperature <= pivot {
            low.push(record);
        } else {
            high.push(record);
        }
    }

    (low, high)
}

/// The pivot a partition of these records would use.
pub fn pivot_temperature(records: &[DroneRecord]) -> Option<i32> {
    records.first().map(|r| r.temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::world::Vec2;

    fn record(id: u32, temperature: i32) -> DroneRecord {
        DroneRecord::new(id, temperature, Vec2::ZERO)
    }

    #[test]
    fn test_partition_completeness() {
        let records: Vec<DroneRecord> = (0..10)
            .map(|id| record(id, if id % 2 == 0 { 10 } else { 90 }))
            .collect();

        let (low, high) = partition(&records);
        assert_eq!(low.len() + high.len(), records.len());

        // Pivot comes from the first record (temperature 10): evens go low.
        let low_ids: Vec<u32> = low.iter().map(|r| r.id).collect();
        let high_ids: Vec<u32> = high.iter().map(|r| r.id).collect();
        assert_eq!(low_ids, vec![0, 2, 4, 6, 8]);
        assert_eq!(high_ids, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_pivot_equal_goes_low() {
        let records = vec![record(0, 50), record(1, 50), record(2, 51)];
        let (low, high) = partition(&records);
        assert_eq!(low.len(), 2);
        assert_eq!(high.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let (low, high) = partition(&[]);
        assert!(low.is_empty());
        assert!(high.is_empty());
        assert_eq!(pivot_temperature(&[]), None);
    }

    #[test]
    fn test_maximally_unbalanced_split_is_legal() {
        // First record holds the maximum: everything lands in the low group.
        let records = vec![record(0, 99), record(1, 10), record(2, 45)];
        let (low, high) = partition(&records);
        assert_eq!(low.len(), 3);
        assert!(high.is_empty());
    }
}
