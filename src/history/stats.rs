//! Summary statistics for history cards and charts

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Priority, Record};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One priority bucket of the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritySlice {
    pub priority: Priority,
    pub count: u64,
    /// Share of total, one decimal place
    pub percentage: f64,
}

/// Record counts for one month of the year.
///
/// `count` is the month total; `completed` and `inactive` split it by
/// canonical status so the activity charts can show both series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: u64,
    pub completed: u64,
    pub inactive: u64,
}

/// Summary statistics over a record list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Count of records
    pub total: u64,

    /// Records whose canonical status is not completed-equivalent
    pub inactive_count: u64,

    /// `inactive_count / total * 100`, one decimal place, 0.0 on empty input
    pub inactive_percentage: f64,

    /// High/Medium/Low buckets with counts and percentages; zero buckets omitted.
    /// Unrecognized priorities bucket as Low, so counts always sum to `total`.
    pub priority_breakdown: Vec<PrioritySlice>,

    /// Jan..Dec in calendar order, month-of-year bucketing across all years,
    /// with per-month completed/inactive splits. All twelve entries are
    /// always present so derived charts keep every bar.
    pub monthly_activity: Vec<MonthlyCount>,
}

impl HistoryStats {
    /// Compute summary statistics over a record list.
    pub fn aggregate(records: &[Record]) -> Self {
        let total = records.len() as u64;
        let inactive_count = records.iter().filter(|r| !r.is_completed()).count() as u64;
        let inactive_percentage = percentage(inactive_count, total);

        let mut priority_counts: HashMap<Priority, u64> = HashMap::new();
        for record in records {
            *priority_counts.entry(record.priority_bucket()).or_insert(0) += 1;
        }
        let priority_breakdown = [Priority::High, Priority::Medium, Priority::Low]
            .into_iter()
            .filter_map(|priority| {
                let count = priority_counts.get(&priority).copied().unwrap_or(0);
                (count > 0).then(|| PrioritySlice {
                    priority,
                    count,
                    percentage: percentage(count, total),
                })
            })
            .collect();

        // Undated records appear in `total` but in no month bucket.
        let mut completed_counts = [0u64; 12];
        let mut inactive_counts = [0u64; 12];
        for record in records {
            if let Some(date) = record.local_date() {
                if record.is_completed() {
                    completed_counts[date.month0() as usize] += 1;
                } else {
                    inactive_counts[date.month0() as usize] += 1;
                }
            }
        }
        let monthly_activity = MONTHS
            .iter()
            .zip(completed_counts.into_iter().zip(inactive_counts))
            .map(|(month, (completed, inactive))| MonthlyCount {
                month: (*month).to_string(),
                count: completed + inactive,
                completed,
                inactive,
            })
            .collect();

        Self {
            total,
            inactive_count,
            inactive_percentage,
            priority_breakdown,
            monthly_activity,
        }
    }
}

/// Share of `count` in `total` as a one-decimal percentage; 0.0 when the
/// total is zero so empty inputs never produce NaN or infinity.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
