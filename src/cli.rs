// src/cli.rs
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use gym_tracker_lib::{DayOfWeek, MuscleGroup};

const MUSCLE_GROUP_HELP: &str =
    "Chest, Back, Shoulders, Biceps, Triceps, Legs, Core or Cardio";
const DAY_HELP: &str = "Monday through Sunday";

#[derive(Parser, Debug)]
#[command(author, version, about = "A CLI client to track gym exercises", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List exercises, optionally filtered
    List {
        /// Only show exercises whose name contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, help = MUSCLE_GROUP_HELP)]
        muscle_group: Option<MuscleGroup>,
        #[arg(short, long, help = DAY_HELP)]
        day: Option<DayOfWeek>,
        /// Write the listed exercises as CSV to stdout instead of a table
        #[arg(long)]
        export_csv: bool,
    },
    /// Add a new exercise
    Add {
        /// Name of the exercise (e.g., "Bench Press")
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, help = MUSCLE_GROUP_HELP)]
        muscle_group: Option<MuscleGroup>,
        #[arg(short, long, help = DAY_HELP)]
        day: Option<DayOfWeek>,
        /// Weight in lbs
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        weights: i32,
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        sets: i32,
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        reps: i32,
    },
    /// Edit an existing exercise; omitted fields keep their current value
    Edit {
        /// ID of the exercise to edit
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, help = MUSCLE_GROUP_HELP)]
        muscle_group: Option<MuscleGroup>,
        #[arg(short, long, help = DAY_HELP)]
        day: Option<DayOfWeek>,
        /// Weight in lbs
        #[arg(short, long, allow_negative_numbers = true)]
        weights: Option<i32>,
        #[arg(short, long, allow_negative_numbers = true)]
        sets: Option<i32>,
        #[arg(short, long, allow_negative_numbers = true)]
        reps: Option<i32>,
    },
    /// Delete an exercise
    Delete {
        /// ID of the exercise to delete
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show totals and the most recent exercises
    Summary,
    /// Check that the backend is up
    Health,
    /// Show the path to the config file
    ConfigPath,
    /// Generate a shell completion script
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> Command {
    Cli::command()
}
