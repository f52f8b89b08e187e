//! Client-side core of the gym tracker: typed models, the REST client for the
//! exercises collection, the filter engine, the add/edit form state machine
//! and the page controller tying them together.

// --- Declare modules ---
pub mod api_client;
pub mod config;
pub mod filter;
pub mod form;
pub mod models;
pub mod page;
pub mod summary;

// --- Expose public types ---
pub use api_client::{ApiClient, ApiError, ApiOperation, ExerciseApi};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, ConfigError, StandardColor,
};
pub use filter::{filter, FilterState};
pub use form::{
    validate, DraftField, ExerciseForm, FieldChange, FieldErrors, FormError, FormState,
    Submission, SubmitTarget,
};
pub use models::{DayOfWeek, ExerciseDraft, ExerciseRecord, MuscleGroup};
pub use page::{
    DeleteOutcome, ExercisesPage, LoadOutcome, LoadTicket, PageError, PageView, SubmitOutcome,
};
pub use summary::WorkoutSummary;

/// Builds the HTTP client described by `config`.
///
/// # Errors
/// Returns `anyhow::Error` if the timeout is invalid or the client cannot be built.
pub fn client_from_config(config: &Config) -> anyhow::Result<ApiClient> {
    use anyhow::Context;

    let timeout = config.request_timeout()?;
    let base_url = config.resolve_base_url();
    ApiClient::new(base_url.clone(), timeout)
        .with_context(|| format!("Failed to set up API client for {base_url}"))
}
