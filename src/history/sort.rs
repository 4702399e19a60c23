//! Recency ordering for history tables and exports

use std::cmp::Ordering;

use crate::models::Record;

/// Sort records most-recent-first, undated records last.
///
/// The sort is stable: ties and undated records keep their input order, so
/// repeated runs over identical input produce identical export output.
pub fn sort_by_recency(records: &mut [Record]) {
    records.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordKind;
    use chrono::{TimeZone, Utc};

    fn record(subject: &str, day: Option<u32>) -> Record {
        let mut record = Record::new(RecordKind::EquipmentRequest, "staff-1", subject, "");
        record.created_at = day.map(|d| Utc.with_ymd_and_hms(2025, 1, d, 9, 0, 0).unwrap());
        record
    }

    fn subjects(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.subject.as_str()).collect()
    }

    #[test]
    fn test_descending_with_nulls_last() {
        let mut records = vec![
            record("a", Some(5)),
            record("b", None),
            record("c", Some(20)),
            record("d", Some(1)),
        ];
        sort_by_recency(&mut records);
        assert_eq!(subjects(&records), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_no_records_dropped() {
        let mut records = vec![record("a", None), record("b", Some(3)), record("c", None)];
        let before = records.len();
        sort_by_recency(&mut records);
        assert_eq!(records.len(), before);
    }

    #[test]
    fn test_stable_among_ties_and_nulls() {
        let mut records = vec![
            record("n1", None),
            record("t1", Some(7)),
            record("n2", None),
            record("t2", Some(7)),
            record("n3", None),
        ];
        sort_by_recency(&mut records);
        assert_eq!(subjects(&records), vec!["t1", "t2", "n1", "n2", "n3"]);

        // Idempotent: sorting again changes nothing
        let once = subjects(&records).join(",");
        sort_by_recency(&mut records);
        assert_eq!(subjects(&records).join(","), once);
    }
}
