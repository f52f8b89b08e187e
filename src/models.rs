// src/models.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Legs,
    Core,
    Cardio,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// An exercise as stored by the backend. The `id` is assigned on create and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub id: i64,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub day_of_week: DayOfWeek,
    pub weights: i32, // pounds
    pub sets: i32,
    pub reps: i32,
}

/// Field values of an exercise that has not been saved (yet).
///
/// Muscle group and day stay `None` until the user picks one; on the wire an
/// unselected value is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub name: String,
    #[serde(with = "blank_as_none")]
    pub muscle_group: Option<MuscleGroup>,
    #[serde(with = "blank_as_none")]
    pub day_of_week: Option<DayOfWeek>,
    pub weights: i32,
    pub sets: i32,
    pub reps: i32,
}

impl From<&ExerciseRecord> for ExerciseDraft {
    fn from(record: &ExerciseRecord) -> Self {
        Self {
            name: record.name.clone(),
            muscle_group: Some(record.muscle_group),
            day_of_week: Some(record.day_of_week),
            weights: record.weights,
            sets: record.sets,
            reps: record.reps,
        }
    }
}

// Optional enum <-> string where "" means "not selected".
mod blank_as_none {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.trim().parse().map(Some).map_err(de::Error::custom)
    }
}
