use crate::types::{Details, Workout, WorkoutId};
use crate::utils::format_minutes;
use std::io::Write;

/// Receives every change the tracker commits, in commit order.
pub trait Renderer {
    /// The store was just loaded from storage.
    fn hydrated(&mut self, workouts: &[Workout]);
    fn workout_added(&mut self, workout: &Workout);
    /// `workout` took the place of the entry with the same id.
    fn workout_replaced(&mut self, workout: &Workout);
    fn workout_removed(&mut self, id: &WorkoutId);
    /// Entries should be shown in exactly this order.
    fn workouts_ordered(&mut self, workouts: &[&Workout]);
    fn workout_focused(&mut self, workout: &Workout);
    fn cleared(&mut self);
}

/// Line-per-workout renderer.
///
/// In details mode each line is tab separated:
/// `index  id  description  distance  duration  metric  extra  clicks`.
/// Otherwise only the description is printed.
pub struct TextRenderer<W: Write> {
    out: W,
    details: bool,
}

impl<W: Write> TextRenderer<W> {
    pub const fn new(out: W, details: bool) -> Self {
        Self { out, details }
    }

    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, s: &str) {
        if let Err(e) = writeln!(self.out, "{s}") {
            tracing::warn!(err = %e, "failed to write output");
        }
    }

    fn entry(&mut self, idx: usize, w: &Workout) {
        let s = if self.details {
            format_workout(idx, w)
        } else {
            w.description().to_string()
        };
        self.line(&s);
    }
}

pub fn format_workout(idx: usize, w: &Workout) -> String {
    let (metric, extra) = match *w.details() {
        Details::Running {
            cadence_spm,
            pace_min_per_km,
        } => (
            format!("{pace_min_per_km:.1} min/km"),
            format!("{cadence_spm} spm"),
        ),
        Details::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => (
            format!("{speed_km_per_h:.1} km/h"),
            format!("{elevation_gain_m} m"),
        ),
    };
    format!(
        "{idx}\t{id}\t{desc}\t{dist} km\t{dur}\t{metric}\t{extra}\t{clicks}",
        id = w.id(),
        desc = w.description(),
        dist = w.distance_km(),
        dur = format_minutes(w.duration_min()),
        clicks = w.click_count(),
    )
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn hydrated(&mut self, workouts: &[Workout]) {
        tracing::debug!(workouts = workouts.len(), "hydrated");
    }

    fn workout_added(&mut self, workout: &Workout) {
        self.line(&format!("added {}: {}", workout.id(), workout.description()));
        if self.details {
            self.entry(1, workout);
        }
    }

    fn workout_replaced(&mut self, workout: &Workout) {
        self.line(&format!("updated {}: {}", workout.id(), workout.description()));
        if self.details {
            self.entry(1, workout);
        }
    }

    fn workout_removed(&mut self, id: &WorkoutId) {
        self.line(&format!("deleted {id}"));
    }

    fn workouts_ordered(&mut self, workouts: &[&Workout]) {
        for (i, w) in workouts.iter().enumerate() {
            self.entry(i + 1, w);
        }
    }

    fn workout_focused(&mut self, workout: &Workout) {
        let c = workout.coordinates();
        self.line(&format!(
            "{}\t{},{}\tclicks={}",
            workout.description(),
            c.lat(),
            c.lng(),
            workout.click_count()
        ));
    }

    fn cleared(&mut self) {
        self.line("all workouts removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WorkoutStore;
    use crate::types::{Coordinates, WorkoutKind};

    fn output(r: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn details_line_has_all_columns() {
        let mut store = WorkoutStore::new();
        let w = store
            .create(
                WorkoutKind::Running,
                Some(Coordinates::new(51.5, -0.1).unwrap()),
                5.2,
                24.0,
                178.0,
            )
            .unwrap();

        let line = format_workout(3, &w);
        let cols: Vec<&str> = line.split('\t').collect();
        assert_eq!(cols.len(), 8);
        assert_eq!(cols[0], "3");
        assert_eq!(cols[1], w.id().as_str());
        assert_eq!(cols[3], "5.2 km");
        assert_eq!(cols[4], "00:24:00");
        assert_eq!(cols[5], "4.6 min/km");
        assert_eq!(cols[6], "178 spm");
        assert_eq!(cols[7], "0");
    }

    #[test]
    fn plain_listing_prints_descriptions_in_given_order() {
        let mut store = WorkoutStore::new();
        let here = Some(Coordinates::new(0.0, 0.0).unwrap());
        store.create(WorkoutKind::Cycling, here, 8.0, 30.0, 10.0).unwrap();
        store.create(WorkoutKind::Running, here, 2.0, 10.0, 160.0).unwrap();

        let mut r = TextRenderer::new(Vec::new(), false);
        let view: Vec<&Workout> = store.all().iter().rev().collect();
        r.workouts_ordered(&view);

        let out = output(r);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Running on "));
        assert!(lines[1].starts_with("Cycling on "));
    }

    #[test]
    fn removal_and_clear_are_reported() {
        let mut r = TextRenderer::new(Vec::new(), false);
        r.workout_removed(&WorkoutId::from("0000000007"));
        r.cleared();
        assert_eq!(output(r), "deleted 0000000007\nall workouts removed\n");
    }
}
