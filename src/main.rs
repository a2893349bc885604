#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{Context, Result};
use clap::Parser;
use mapty::cli::{self, WorkoutFields};
use mapty::geo::FixedPosition;
use mapty::render::TextRenderer;
use mapty::storage::FileStorage;
use mapty::{FormValues, Tracker, WorkoutId, utils};
use std::io;

#[macro_use]
extern crate mapty;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let path = cli.store.unwrap_or_else(utils::default_store_path);
    dlog!("store={} here={:?}", path.display(), cli.here);

    let details = matches!(cli.cmd, cli::Cmd::List { details: true, .. });
    let renderer = TextRenderer::new(io::stdout().lock(), details);
    let mut tracker = Tracker::open(
        FileStorage::new(&path),
        renderer,
        &FixedPosition(cli.here),
    )
    .with_context(|| format!("opening workouts at {}", path.display()))?;

    match cli.cmd {
        cli::Cmd::Add { kind, fields, at } => {
            let form = overlay(
                FormValues {
                    kind,
                    ..FormValues::default()
                },
                fields,
            );
            tracker.submit(&form, at)?;
        }
        cli::Cmd::Edit { id, kind, fields } => {
            let id = WorkoutId::from(id);
            let mut form = tracker.begin_edit(&id)?;
            if let Some(kind) = kind {
                form.kind = kind;
            }
            let form = overlay(form, fields);
            tracker.submit(&form, None)?;
        }
        cli::Cmd::Delete { id } => {
            tracker.delete(&WorkoutId::from(id))?;
        }
        cli::Cmd::Focus { id } => {
            tracker.focus(&WorkoutId::from(id))?;
        }
        cli::Cmd::List { sort, .. } => {
            if tracker.sort(sort).is_empty() {
                tracing::info!(store = %path.display(), "no workouts recorded yet");
            }
        }
        cli::Cmd::Reset => tracker.reset()?,
    }

    Ok(())
}

/// Replaces the form fields given on the command line.
fn overlay(mut form: FormValues, fields: WorkoutFields) -> FormValues {
    let WorkoutFields {
        distance,
        duration,
        cadence,
        elevation,
    } = fields;
    if let Some(v) = distance {
        form.distance = v;
    }
    if let Some(v) = duration {
        form.duration = v;
    }
    if let Some(v) = cadence {
        form.cadence = v;
    }
    if let Some(v) = elevation {
        form.elevation = v;
    }
    form
}
