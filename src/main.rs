//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdin, stdout, Write};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use gym_tracker_lib::{
    client_from_config, get_config_path_util, load_config_util, ApiClient, DeleteOutcome,
    ExerciseApi, ExerciseRecord, ExercisesPage, FieldChange, LoadOutcome, PageView, SubmitOutcome,
    WorkoutSummary,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli_args = cli::parse_args();

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();

        eprintln!("Generating completion script for {}...", shell); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    // Logs go to stderr so tables and CSV on stdout stay clean
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config_path = get_config_path_util().context("Failed to determine configuration file path")?;
    if let cli::Commands::ConfigPath = cli_args.command {
        println!("Config file is located at: {}", config_path.display());
        return Ok(());
    }

    let config = load_config_util(&config_path)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?;
    let header_color = config.header_color().unwrap_or_else(|e| {
        warn!("{}; falling back to green table headers", e);
        Color::Green
    });
    let client = client_from_config(&config)?;
    let mut page = ExercisesPage::new(client);

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } | cli::Commands::ConfigPath => {
            unreachable!("Handled before the page was set up");
        }
        cli::Commands::Health => {
            let status = page
                .api()
                .health_check()
                .await
                .context("Backend health check failed")?;
            println!("{}", status);
        }
        cli::Commands::List {
            search,
            muscle_group,
            day,
            export_csv,
        } => {
            load_page(&mut page).await?;
            page.set_search_text(search.unwrap_or_default());
            page.set_muscle_group_filter(muscle_group);
            page.set_day_filter(day);

            match page.view() {
                PageView::Rows(rows) => {
                    if export_csv {
                        write_csv(&rows).context("Failed to write CSV")?;
                    } else {
                        println!("Exercises ({})", rows.len());
                        print_exercise_table(&rows, header_color);
                    }
                }
                PageView::NoExercises => {
                    println!("No exercises found. Create your first exercise to get started!")
                }
                PageView::NoMatches => println!("No exercises match your current filters."),
                PageView::Failed(message) => bail!("{}", message),
                PageView::Loading => unreachable!("List was awaited above"),
            }
        }
        cli::Commands::Add {
            name,
            muscle_group,
            day,
            weights,
            sets,
            reps,
        } => {
            page.open_add()?;
            for change in [
                FieldChange::Name(name),
                FieldChange::MuscleGroup(muscle_group),
                FieldChange::DayOfWeek(day),
                FieldChange::Weights(weights),
                FieldChange::Sets(sets),
                FieldChange::Reps(reps),
            ] {
                page.update_field(change)?;
            }
            let outcome = page.submit_form().await?;
            report_submit(&page, outcome)?;
        }
        cli::Commands::Edit {
            id,
            name,
            muscle_group,
            day,
            weights,
            sets,
            reps,
        } => {
            load_page(&mut page).await?;
            page.open_edit(id)
                .with_context(|| format!("Cannot edit exercise {id}"))?;

            let changes = [
                name.map(FieldChange::Name),
                muscle_group.map(|g| FieldChange::MuscleGroup(Some(g))),
                day.map(|d| FieldChange::DayOfWeek(Some(d))),
                weights.map(FieldChange::Weights),
                sets.map(FieldChange::Sets),
                reps.map(FieldChange::Reps),
            ];
            for change in changes.into_iter().flatten() {
                page.update_field(change)?;
            }
            let outcome = page.submit_form().await?;
            report_submit(&page, outcome)?;
        }
        cli::Commands::Delete { id, yes } => {
            load_page(&mut page).await?;
            let outcome = page
                .delete(id, |record| yes || confirm_delete_cli(record))
                .await
                .with_context(|| format!("Cannot delete exercise {id}"))?;
            match outcome {
                DeleteOutcome::Deleted(confirmation) => println!("{}", confirmation),
                DeleteOutcome::Declined => println!("Delete cancelled."),
                DeleteOutcome::Failed => bail!("{}", page.error().unwrap_or("Delete failed")),
            }
        }
        cli::Commands::Summary => {
            load_page(&mut page).await?;
            print_summary(&page.summary(), header_color);
        }
    }

    Ok(())
}

async fn load_page(page: &mut ExercisesPage<ApiClient>) -> Result<()> {
    match page.activate().await {
        LoadOutcome::Applied(_) => Ok(()),
        LoadOutcome::Failed | LoadOutcome::Stale => {
            bail!("{}", page.error().unwrap_or("Failed to load exercises"))
        }
    }
}

fn report_submit(page: &ExercisesPage<ApiClient>, outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Saved(record) => {
            println!(
                "Successfully saved exercise '{}' (ID: {}): {} × {} at {} lbs on {}",
                record.name, record.id, record.sets, record.reps, record.weights, record.day_of_week
            );
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field, message);
            }
            bail!("Exercise was not saved: please fix the fields above.")
        }
        SubmitOutcome::Failed => bail!("{}", page.error().unwrap_or("Failed to save exercise")),
    }
}

/// Asks before deleting. Anything but "y"/"yes" (or unreadable input) declines.
fn confirm_delete_cli(record: &ExerciseRecord) -> bool {
    print!(
        "Are you sure you want to delete this exercise? '{}' ({} on {}) [y/N]: ",
        record.name, record.muscle_group, record.day_of_week
    );
    if stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_exercise_table(exercises: &[&ExerciseRecord], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Muscle Group").fg(header_color),
            Cell::new("Day").fg(header_color),
            Cell::new("Weight").fg(header_color),
            Cell::new("Sets × Reps").fg(header_color),
        ]);

    for exercise in exercises {
        table.add_row(vec![
            Cell::new(exercise.id.to_string()),
            Cell::new(&exercise.name),
            Cell::new(exercise.muscle_group.to_string()),
            Cell::new(exercise.day_of_week.to_string()),
            Cell::new(format!("{} lbs", exercise.weights)),
            Cell::new(format!("{} × {}", exercise.sets, exercise.reps)),
        ]);
    }
    println!("{table}");
}

fn print_summary(summary: &WorkoutSummary, header_color: Color) {
    println!("Total exercises: {}", summary.total_exercises);
    println!("Muscle groups:   {}", summary.muscle_groups);
    println!("Total sets:      {}", summary.total_sets);
    println!("Total reps:      {}", summary.total_reps);

    if summary.recent.is_empty() {
        return;
    }
    println!("\nRecent exercises");
    let recent: Vec<&ExerciseRecord> = summary.recent.iter().collect();
    print_exercise_table(&recent, header_color);
}

fn write_csv(exercises: &[&ExerciseRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(stdout());
    for exercise in exercises {
        writer.serialize(exercise)?;
    }
    writer.flush()?;
    Ok(())
}
