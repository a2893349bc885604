use crate::types::{Coordinates, SortKey};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts pinned to a map position"
)]
pub struct Cli {
    /// Workout snapshot file.
    ///
    /// Default: <data dir>/mapty/workouts.json
    #[arg(long, env = "MAPTY_STORE", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Current position as LAT,LNG. New workouts are pinned here unless
    /// `add --at` says otherwise.
    #[arg(
        long,
        env = "MAPTY_POSITION",
        value_name = "LAT,LNG",
        global = true,
        allow_hyphen_values = true
    )]
    pub here: Option<Coordinates>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Raw form fields; coercion and validation happen in the tracker.
#[derive(Args, Debug, Default)]
pub struct WorkoutFields {
    /// Distance in km.
    #[arg(long, allow_hyphen_values = true)]
    pub distance: Option<String>,

    /// Duration in minutes.
    #[arg(long, allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// Running cadence in steps per minute.
    #[arg(long, allow_hyphen_values = true)]
    pub cadence: Option<String>,

    /// Cycling elevation gain in metres.
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a new workout.
    Add {
        /// running or cycling
        kind: String,

        #[command(flatten)]
        fields: WorkoutFields,

        /// Map point as LAT,LNG (defaults to --here).
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Option<Coordinates>,
    },

    /// Change a workout; omitted fields keep their current value.
    Edit {
        id: String,

        /// Switch to running or cycling.
        #[arg(long = "type", value_name = "KIND")]
        kind: Option<String>,

        #[command(flatten)]
        fields: WorkoutFields,
    },

    /// Delete a workout.
    Delete { id: String },

    /// Show a workout's position and count the visit.
    Focus { id: String },

    /// List workouts.
    List {
        /// date, type, duration or distance
        #[arg(long, value_name = "KEY")]
        sort: Option<SortKey>,

        /// Print every column, not just the description.
        #[arg(short, long)]
        details: bool,
    },

    /// Delete every workout.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "mapty", "--store", "/tmp/w.json", "add", "running", "--distance", "5.2",
            "--duration", "24", "--cadence", "178", "--at", "51.5,-0.1",
        ])
        .unwrap();
        let Cmd::Add { kind, fields, at } = cli.cmd else {
            panic!("expected add");
        };
        assert_eq!(kind, "running");
        assert_eq!(fields.distance.as_deref(), Some("5.2"));
        assert_eq!(at, Some(Coordinates::new(51.5, -0.1).unwrap()));
    }

    #[test]
    fn rejects_unknown_sort_key() {
        assert!(Cli::try_parse_from(["mapty", "list", "--sort", "pace"]).is_err());
        let cli = Cli::try_parse_from(["mapty", "list", "--sort", "distance", "-d"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Cmd::List {
                sort: Some(SortKey::Distance),
                details: true
            }
        ));
    }
}
