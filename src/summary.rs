// src/summary.rs
use std::collections::HashSet;

use crate::models::ExerciseRecord;

const RECENT_LIMIT: usize = 5;

/// Dashboard numbers for the loaded exercise list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSummary {
    pub total_exercises: usize,
    pub muscle_groups: usize,
    pub total_sets: i64,
    pub total_reps: i64,
    /// Last listed records, newest first.
    pub recent: Vec<ExerciseRecord>,
}

impl WorkoutSummary {
    pub fn from_records(records: &[ExerciseRecord]) -> Self {
        let muscle_groups = records
            .iter()
            .map(|r| r.muscle_group)
            .collect::<HashSet<_>>()
            .len();
        let total_sets = records.iter().map(|r| i64::from(r.sets)).sum();
        let total_reps = records
            .iter()
            .map(|r| i64::from(r.sets) * i64::from(r.reps))
            .sum();
        let recent = records.iter().rev().take(RECENT_LIMIT).cloned().collect();

        Self {
            total_exercises: records.len(),
            muscle_groups,
            total_sets,
            total_reps,
            recent,
        }
    }
}
