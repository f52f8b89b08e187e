// src/page.rs
use thiserror::Error;
use tracing::{debug, error, info};

use crate::api_client::{ApiError, ExerciseApi};
use crate::filter::{self, FilterState};
use crate::form::{ExerciseForm, FieldChange, FieldErrors, FormError, SubmitTarget};
use crate::models::{DayOfWeek, ExerciseRecord, MuscleGroup};
use crate::summary::WorkoutSummary;

pub const LOAD_FAILED: &str = "Failed to load exercises. Make sure the backend is running.";
pub const CREATE_FAILED: &str = "Failed to create exercise";
pub const UPDATE_FAILED: &str = "Failed to update exercise";
pub const DELETE_FAILED: &str = "Failed to delete exercise";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Exercise with ID {0} is not in the loaded list")]
    ExerciseNotFound(i64),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Tag of an issued list request. Only the most recent one may update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced; holds the number of records loaded.
    Applied(usize),
    /// A newer load was issued (or the page was left) in the meantime.
    Stale,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(ExerciseRecord),
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The server call failed; see [`ExercisesPage::error`].
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    Declined,
    Failed,
}

/// What the exercise list area should currently show.
#[derive(Debug, PartialEq, Eq)]
pub enum PageView<'a> {
    Loading,
    Failed(&'a str),
    /// Nothing has been created yet.
    NoExercises,
    /// There are exercises, but none pass the filters.
    NoMatches,
    Rows(Vec<&'a ExerciseRecord>),
}

/// The exercises screen: owns the loaded list, the filters and the form.
pub struct ExercisesPage<A> {
    api: A,
    records: Vec<ExerciseRecord>,
    filters: FilterState,
    form: ExerciseForm,
    loading: bool,
    error: Option<String>,
    load_generation: u64,
}

impl<A: ExerciseApi> ExercisesPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            filters: FilterState::default(),
            form: ExerciseForm::new(),
            loading: false,
            error: None,
            load_generation: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn form(&self) -> &ExerciseForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: i64) -> Option<&ExerciseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    // --- Loading ---

    /// Entering the page loads the full list.
    pub async fn activate(&mut self) -> LoadOutcome {
        self.reload().await
    }

    /// Leaving the page: any load still in flight will be discarded.
    pub fn deactivate(&mut self) {
        self.load_generation += 1;
        self.loading = false;
    }

    /// Marks a new load as issued. Pair with [`Self::finish_load`] when the
    /// request is driven outside the page (e.g. by an event loop).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.loading = true;
        LoadTicket(self.load_generation)
    }

    /// Applies a list result, unless a newer load was issued after `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ExerciseRecord>, ApiError>,
    ) -> LoadOutcome {
        if ticket.0 != self.load_generation {
            debug!(
                "Discarding list response {} (latest is {})",
                ticket.0, self.load_generation
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.error = None;
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                error!("Error loading exercises: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Fetches the unfiltered list; filtering always happens client-side.
    /// Also serves as "try again" after a failed load.
    pub async fn reload(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = self.api.list(None, None).await;
        self.finish_load(ticket, result)
    }

    // --- Filters ---

    pub fn visible(&self) -> Vec<&ExerciseRecord> {
        filter::filter(&self.records, &self.filters)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
    }

    pub fn set_muscle_group_filter(&mut self, group: Option<MuscleGroup>) {
        self.filters.muscle_group = group;
    }

    pub fn set_day_filter(&mut self, day: Option<DayOfWeek>) {
        self.filters.day_of_week = day;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // --- Form ---

    pub fn open_add(&mut self) -> Result<(), PageError> {
        self.form.open_create()?;
        Ok(())
    }

    pub fn open_edit(&mut self, id: i64) -> Result<(), PageError> {
        let record = self
            .find(id)
            .cloned()
            .ok_or(PageError::ExerciseNotFound(id))?;
        self.form.open_edit(record)?;
        Ok(())
    }

    pub fn update_field(&mut self, change: FieldChange) -> Result<(), PageError> {
        self.form.update(change)?;
        Ok(())
    }

    pub fn cancel_form(&mut self) -> Result<(), PageError> {
        self.form.cancel()?;
        Ok(())
    }

    /// Validates the form and, if it passes, creates or updates the exercise.
    /// A successful save closes the form and reloads the list.
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome, PageError> {
        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(FormError::Invalid(errors)) => return Ok(SubmitOutcome::Invalid(errors)),
            Err(e) => return Err(e.into()),
        };

        let (result, failure_message) = match &submission.target {
            SubmitTarget::Create => (self.api.create(&submission.draft).await, CREATE_FAILED),
            SubmitTarget::Update(record) => (
                self.api.update(record.id, &submission.draft).await,
                UPDATE_FAILED,
            ),
        };

        match result {
            Ok(saved) => {
                info!("Saved exercise '{}' (ID {})", saved.name, saved.id);
                self.form.submit_succeeded()?;
                self.reload().await;
                Ok(SubmitOutcome::Saved(saved))
            }
            Err(e) => {
                error!("Error submitting exercise: {}", e);
                self.error = Some(failure_message.to_string());
                self.form.submit_failed()?;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    // --- Delete ---

    /// Deletes exercise `id` after `confirm` agrees. Declining has no effect.
    pub async fn delete(
        &mut self,
        id: i64,
        confirm: impl FnOnce(&ExerciseRecord) -> bool,
    ) -> Result<DeleteOutcome, PageError> {
        let record = self.find(id).ok_or(PageError::ExerciseNotFound(id))?;
        if !confirm(record) {
            debug!("Delete of exercise {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete(id).await {
            Ok(confirmation) => {
                self.reload().await;
                Ok(DeleteOutcome::Deleted(confirmation))
            }
            Err(e) => {
                error!("Error deleting exercise: {}", e);
                self.error = Some(DELETE_FAILED.to_string());
                Ok(DeleteOutcome::Failed)
            }
        }
    }

    // --- Rendering ---

    pub fn summary(&self) -> WorkoutSummary {
        WorkoutSummary::from_records(&self.records)
    }

    pub fn view(&self) -> PageView<'_> {
        if self.loading {
            return PageView::Loading;
        }
        if let Some(message) = self.error.as_deref() {
            return PageView::Failed(message);
        }
        let rows = self.visible();
        if !rows.is_empty() {
            PageView::Rows(rows)
        } else if self.records.is_empty() {
            PageView::NoExercises
        } else {
            PageView::NoMatches
        }
    }
}
