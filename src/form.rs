// src/form.rs
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::models::{DayOfWeek, ExerciseDraft, ExerciseRecord, MuscleGroup};

/// Editable fields of an exercise draft, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum DraftField {
    Name,
    MuscleGroup,
    DayOfWeek,
    Weights,
    Sets,
    Reps,
}

/// A new value for a single draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    MuscleGroup(Option<MuscleGroup>),
    DayOfWeek(Option<DayOfWeek>),
    Weights(i32),
    Sets(i32),
    Reps(i32),
}

impl FieldChange {
    pub const fn field(&self) -> DraftField {
        match self {
            FieldChange::Name(_) => DraftField::Name,
            FieldChange::MuscleGroup(_) => DraftField::MuscleGroup,
            FieldChange::DayOfWeek(_) => DraftField::DayOfWeek,
            FieldChange::Weights(_) => DraftField::Weights,
            FieldChange::Sets(_) => DraftField::Sets,
            FieldChange::Reps(_) => DraftField::Reps,
        }
    }

    fn apply(self, draft: &mut ExerciseDraft) {
        match self {
            FieldChange::Name(v) => draft.name = v,
            FieldChange::MuscleGroup(v) => draft.muscle_group = v,
            FieldChange::DayOfWeek(v) => draft.day_of_week = v,
            FieldChange::Weights(v) => draft.weights = v,
            FieldChange::Sets(v) => draft.sets = v,
            FieldChange::Reps(v) => draft.reps = v,
        }
    }
}

/// Messages for the fields that are currently invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn remove(&mut self, field: DraftField) {
        self.0.remove(&field);
    }
}

/// Checks every field of `draft` and collects all violations.
pub fn validate(draft: &ExerciseDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if draft.name.trim().is_empty() {
        errors.insert(DraftField::Name, "Exercise name is required");
    }
    if draft.muscle_group.is_none() {
        errors.insert(DraftField::MuscleGroup, "Muscle group is required");
    }
    if draft.day_of_week.is_none() {
        errors.insert(DraftField::DayOfWeek, "Day of week is required");
    }
    if draft.weights < 0 {
        errors.insert(DraftField::Weights, "Weight cannot be negative");
    }
    if draft.sets < 1 {
        errors.insert(DraftField::Sets, "Sets must be at least 1");
    }
    if draft.reps < 1 {
        errors.insert(DraftField::Reps, "Reps must be at least 1");
    }
    errors
}

/// What a submission will do once it reaches the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ExerciseRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(ExerciseRecord),
    Submitting(SubmitTarget),
}

/// A validated draft, handed out when the form enters `Submitting`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub target: SubmitTarget,
    pub draft: ExerciseDraft,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("The exercise form is already open")]
    AlreadyOpen,
    #[error("The exercise form is not open")]
    NotOpen,
    #[error("The exercise is still being saved")]
    Submitting,
    #[error("No submission is in progress")]
    NotSubmitting,
    #[error("Exercise has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
}

/// Draft state and field errors for the add/edit exercise form.
#[derive(Debug, Clone, Default)]
pub struct ExerciseForm {
    state: FormState,
    draft: ExerciseDraft,
    errors: FieldErrors,
}

impl ExerciseForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn draft(&self) -> &ExerciseDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            FormState::OpenForCreate | FormState::OpenForEdit(_)
        )
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting(_))
    }

    fn ensure_closed(&self) -> Result<(), FormError> {
        match self.state {
            FormState::Closed => Ok(()),
            FormState::Submitting(_) => Err(FormError::Submitting),
            _ => Err(FormError::AlreadyOpen),
        }
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        match self.state {
            FormState::OpenForCreate | FormState::OpenForEdit(_) => Ok(()),
            FormState::Submitting(_) => Err(FormError::Submitting),
            FormState::Closed => Err(FormError::NotOpen),
        }
    }

    /// Opens an empty form for a new exercise.
    pub fn open_create(&mut self) -> Result<(), FormError> {
        self.ensure_closed()?;
        self.draft = ExerciseDraft::default();
        self.errors = FieldErrors::default();
        self.state = FormState::OpenForCreate;
        Ok(())
    }

    /// Opens the form pre-filled with `record`'s values.
    pub fn open_edit(&mut self, record: ExerciseRecord) -> Result<(), FormError> {
        self.ensure_closed()?;
        self.draft = ExerciseDraft::from(&record);
        self.errors = FieldErrors::default();
        self.state = FormState::OpenForEdit(record);
        Ok(())
    }

    /// Sets one field and drops its error, whether or not the new value is valid.
    /// Validation only runs again on the next submit.
    pub fn update(&mut self, change: FieldChange) -> Result<(), FormError> {
        self.ensure_open()?;
        self.errors.remove(change.field());
        change.apply(&mut self.draft);
        Ok(())
    }

    /// Discards the draft without touching the server.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.reset();
        Ok(())
    }

    /// Validates the whole draft. On success the form moves to `Submitting`
    /// and the caller gets the draft to send; otherwise it stays open with
    /// the collected field errors.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        self.ensure_open()?;
        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            return Err(FormError::Invalid(self.errors.clone()));
        }

        let target = match std::mem::take(&mut self.state) {
            FormState::OpenForEdit(record) => SubmitTarget::Update(record),
            _ => SubmitTarget::Create,
        };
        self.state = FormState::Submitting(target.clone());
        Ok(Submission {
            target,
            draft: self.draft.clone(),
        })
    }

    /// The server accepted the submission; the form closes.
    pub fn submit_succeeded(&mut self) -> Result<(), FormError> {
        if !self.is_submitting() {
            return Err(FormError::NotSubmitting);
        }
        self.reset();
        Ok(())
    }

    /// The server rejected the submission; the form reopens with the draft intact.
    pub fn submit_failed(&mut self) -> Result<(), FormError> {
        let reopened = match std::mem::take(&mut self.state) {
            FormState::Submitting(SubmitTarget::Create) => FormState::OpenForCreate,
            FormState::Submitting(SubmitTarget::Update(record)) => FormState::OpenForEdit(record),
            other => {
                self.state = other;
                return Err(FormError::NotSubmitting);
            }
        };
        self.state = reopened;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = FormState::Closed;
        self.draft = ExerciseDraft::default();
        self.errors = FieldErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat() -> ExerciseRecord {
        ExerciseRecord {
            id: 1,
            name: "Squat".into(),
            muscle_group: MuscleGroup::Legs,
            day_of_week: DayOfWeek::Monday,
            weights: 135,
            sets: 3,
            reps: 5,
        }
    }

    fn fill_valid(form: &mut ExerciseForm) {
        form.update(FieldChange::Name("Plank".into())).unwrap();
        form.update(FieldChange::MuscleGroup(Some(MuscleGroup::Core)))
            .unwrap();
        form.update(FieldChange::DayOfWeek(Some(DayOfWeek::Sunday)))
            .unwrap();
        form.update(FieldChange::Sets(1)).unwrap();
        form.update(FieldChange::Reps(1)).unwrap();
    }

    #[test]
    fn open_create_starts_from_empty_defaults() {
        let mut form = ExerciseForm::new();
        form.open_create().unwrap();
        assert_eq!(form.state(), &FormState::OpenForCreate);
        let draft = form.draft();
        assert_eq!(draft.name, "");
        assert_eq!(draft.muscle_group, None);
        assert_eq!(draft.day_of_week, None);
        assert_eq!((draft.weights, draft.sets, draft.reps), (0, 0, 0));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate(&ExerciseDraft::default());
        assert_eq!(errors.get(DraftField::Name), Some("Exercise name is required"));
        assert_eq!(
            errors.get(DraftField::MuscleGroup),
            Some("Muscle group is required")
        );
        assert_eq!(
            errors.get(DraftField::DayOfWeek),
            Some("Day of week is required")
        );
        assert_eq!(errors.get(DraftField::Sets), Some("Sets must be at least 1"));
        assert_eq!(errors.get(DraftField::Reps), Some("Reps must be at least 1"));
        assert!(!errors.contains(DraftField::Weights));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let draft = ExerciseDraft {
            weights: -5,
            ..ExerciseDraft::from(&squat())
        };
        let errors = validate(&draft);
        assert_eq!(
            errors.get(DraftField::Weights),
            Some("Weight cannot be negative")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn minimum_numbers_pass() {
        let draft = ExerciseDraft {
            weights: 0,
            sets: 1,
            reps: 1,
            ..ExerciseDraft::from(&squat())
        };
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn blank_name_fails_only_on_name() {
        let mut form = ExerciseForm::new();
        form.open_create().unwrap();
        fill_valid(&mut form);
        form.update(FieldChange::Name("  ".into())).unwrap();

        match form.begin_submit() {
            Err(FormError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.contains(DraftField::Name));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(form.state(), &FormState::OpenForCreate);
        assert!(form.errors().contains(DraftField::Name));
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = ExerciseForm::new();
        form.open_create().unwrap();
        assert!(form.begin_submit().is_err());
        assert!(form.errors().contains(DraftField::Sets));

        // Still invalid, but the error is cleared until the next submit.
        form.update(FieldChange::Sets(0)).unwrap();
        assert!(!form.errors().contains(DraftField::Sets));
        assert!(form.errors().contains(DraftField::Reps));

        assert!(form.begin_submit().is_err());
        assert!(form.errors().contains(DraftField::Sets));
    }

    #[test]
    fn open_edit_copies_record_values() {
        let mut form = ExerciseForm::new();
        form.open_edit(squat()).unwrap();
        assert_eq!(form.draft(), &ExerciseDraft::from(&squat()));
        assert_eq!(form.state(), &FormState::OpenForEdit(squat()));

        form.cancel().unwrap();
        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.draft(), &ExerciseDraft::default());
    }

    #[test]
    fn valid_edit_submits_an_update_for_the_source_record() {
        let mut form = ExerciseForm::new();
        form.open_edit(squat()).unwrap();
        form.update(FieldChange::Weights(145)).unwrap();

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.target, SubmitTarget::Update(squat()));
        assert_eq!(submission.draft.weights, 145);
        assert!(form.is_submitting());

        // Inputs are locked while the request is in flight.
        assert_eq!(
            form.update(FieldChange::Reps(2)),
            Err(FormError::Submitting)
        );
        assert_eq!(form.cancel(), Err(FormError::Submitting));
    }

    #[test]
    fn failed_submit_reopens_with_draft_preserved() {
        let mut form = ExerciseForm::new();
        form.open_edit(squat()).unwrap();
        form.update(FieldChange::Name("Back Squat".into())).unwrap();
        form.begin_submit().unwrap();

        form.submit_failed().unwrap();
        assert_eq!(form.state(), &FormState::OpenForEdit(squat()));
        assert_eq!(form.draft().name, "Back Squat");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn successful_submit_closes_and_discards_draft() {
        let mut form = ExerciseForm::new();
        form.open_create().unwrap();
        fill_valid(&mut form);
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.target, SubmitTarget::Create);

        form.submit_succeeded().unwrap();
        assert_eq!(form.state(), &FormState::Closed);
        assert_eq!(form.draft(), &ExerciseDraft::default());
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut form = ExerciseForm::new();
        assert_eq!(form.cancel(), Err(FormError::NotOpen));
        assert_eq!(
            form.update(FieldChange::Sets(1)),
            Err(FormError::NotOpen)
        );
        assert_eq!(form.submit_succeeded(), Err(FormError::NotSubmitting));
        assert_eq!(form.submit_failed(), Err(FormError::NotSubmitting));
        assert_eq!(form.state(), &FormState::Closed);

        form.open_create().unwrap();
        assert_eq!(form.open_edit(squat()), Err(FormError::AlreadyOpen));
        assert_eq!(form.submit_failed(), Err(FormError::NotSubmitting));
        assert_eq!(form.state(), &FormState::OpenForCreate);
    }

    #[test]
    fn field_names_match_wire_names() {
        assert_eq!(DraftField::MuscleGroup.to_string(), "muscleGroup");
        assert_eq!(DraftField::DayOfWeek.to_string(), "dayOfWeek");
        assert_eq!(DraftField::Weights.to_string(), "weights");
    }
}
