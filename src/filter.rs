// src/filter.rs
use crate::models::{DayOfWeek, ExerciseRecord, MuscleGroup};

/// Search text and selectors controlling which records are shown.
/// `None` selectors mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub muscle_group: Option<MuscleGroup>,
    pub day_of_week: Option<DayOfWeek>,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || self.muscle_group.is_some() || self.day_of_week.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, record: &ExerciseRecord) -> bool {
        let name_ok = self.search_text.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        let group_ok = self.muscle_group.map_or(true, |g| record.muscle_group == g);
        let day_ok = self.day_of_week.map_or(true, |d| record.day_of_week == d);
        name_ok && group_ok && day_ok
    }
}

/// Records passing `state`, in their original order.
pub fn filter<'a>(records: &'a [ExerciseRecord], state: &FilterState) -> Vec<&'a ExerciseRecord> {
    records.iter().filter(|r| state.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, group: MuscleGroup, day: DayOfWeek) -> ExerciseRecord {
        ExerciseRecord {
            id,
            name: name.to_string(),
            muscle_group: group,
            day_of_week: day,
            weights: 100,
            sets: 3,
            reps: 10,
        }
    }

    fn sample() -> Vec<ExerciseRecord> {
        vec![
            record(1, "Squat", MuscleGroup::Legs, DayOfWeek::Monday),
            record(2, "Bench Press", MuscleGroup::Chest, DayOfWeek::Monday),
            record(3, "Incline Bench", MuscleGroup::Chest, DayOfWeek::Thursday),
            record(4, "Front Squat", MuscleGroup::Legs, DayOfWeek::Thursday),
            record(5, "Plank", MuscleGroup::Core, DayOfWeek::Sunday),
        ]
    }

    fn ids(view: &[&ExerciseRecord]) -> Vec<i64> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let records = sample();
        let view = filter(&records, &FilterState::default());
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5]);
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = sample();
        let state = FilterState {
            search_text: "SQU".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &state)), vec![1, 4]);
    }

    #[test]
    fn selectors_combine_with_search() {
        let records = sample();
        let state = FilterState {
            search_text: "bench".into(),
            muscle_group: Some(MuscleGroup::Chest),
            day_of_week: Some(DayOfWeek::Thursday),
        };
        assert_eq!(ids(&filter(&records, &state)), vec![3]);
    }

    #[test]
    fn view_preserves_original_order() {
        let records = sample();
        let state = FilterState {
            day_of_week: Some(DayOfWeek::Thursday),
            ..Default::default()
        };
        let view = filter(&records, &state);
        assert_eq!(ids(&view), vec![3, 4]);
        // Each result is the same element as in the source list.
        assert!(std::ptr::eq(view[0], &records[2]));
    }

    #[test]
    fn unmatched_muscle_group_yields_nothing() {
        let records = vec![ExerciseRecord {
            id: 1,
            name: "Squat".into(),
            muscle_group: MuscleGroup::Legs,
            day_of_week: DayOfWeek::Monday,
            weights: 135,
            sets: 3,
            reps: 5,
        }];
        let state = FilterState {
            muscle_group: Some(MuscleGroup::Chest),
            ..Default::default()
        };
        assert!(filter(&records, &state).is_empty());
    }

    #[test]
    fn whitespace_search_is_matched_literally() {
        let records = sample();
        let state = FilterState {
            search_text: " ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &state)), vec![2, 3, 4]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = FilterState {
            search_text: "x".into(),
            muscle_group: Some(MuscleGroup::Back),
            day_of_week: Some(DayOfWeek::Friday),
        };
        assert!(state.is_active());
        state.clear();
        assert_eq!(state, FilterState::default());
    }
}
