use mapty::geo::FixedPosition;
use mapty::render::TextRenderer;
use mapty::session::EditState;
use mapty::storage::{FileStorage, Storage};
use mapty::{Coordinates, FormValues, SortKey, Tracker, WorkoutError, WorkoutKind};
use std::fs;

fn form(kind: &str, distance: &str, duration: &str, cadence: &str, elevation: &str) -> FormValues {
    FormValues {
        kind: kind.to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation: elevation.to_string(),
    }
}

fn here() -> FixedPosition {
    FixedPosition(Some(Coordinates::new(51.5, -0.1).unwrap()))
}

#[test]
fn workouts_survive_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapty").join("workouts.json");

    let (run_id, ride_id) = {
        let mut t = Tracker::open(FileStorage::new(&path), TextRenderer::new(Vec::new(), false), &here())
            .unwrap();
        let run = t.submit(&form("running", "5.2", "24", "178", ""), None).unwrap();
        let ride = t
            .submit(&form("cycling", "27", "95", "", "523"), None)
            .unwrap();
        t.focus(run.workout().id()).unwrap();

        let out = String::from_utf8(t.renderer().get_ref().clone()).unwrap();
        assert!(out.contains(&format!("added {}", run.workout().id())));
        (run.workout().id().clone(), ride.workout().id().clone())
    };

    let mut t = Tracker::open(FileStorage::new(&path), TextRenderer::new(Vec::new(), true), &FixedPosition(None))
        .unwrap();
    assert_eq!(t.store().len(), 2);

    let run = t.store().find(&run_id).unwrap().clone();
    assert_eq!(run.kind(), WorkoutKind::Running);
    assert_eq!(run.click_count(), 1);
    assert!((run.pace_min_per_km().unwrap() - 4.615).abs() < 1e-3);

    let ride = t.store().find(&ride_id).unwrap();
    assert!((ride.speed_km_per_h().unwrap() - 17.05).abs() < 1e-2);

    // Edit in the second session keeps identity and order.
    let mut values = t.begin_edit(&run_id).unwrap();
    values.duration = "26".to_string();
    t.submit(&values, None).unwrap();
    assert_eq!(t.edit_state(), &EditState::Idle);
    assert_eq!(t.store().all()[0].id(), &run_id);
    assert_eq!(t.store().all()[0].description(), run.description());

    let view = t.sort(Some(SortKey::Type));
    assert_eq!(view[0].id(), &run_id);
    assert_eq!(view[1].id(), &ride_id);

    // Without a position or a clicked point nothing can be created.
    let err = t.submit(&form("running", "3", "15", "170", ""), None).unwrap_err();
    assert!(matches!(err, WorkoutError::Validation { .. }));
    assert_eq!(t.store().len(), 2);
}

#[test]
fn corrupt_file_is_discarded_then_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workouts.json");
    fs::write(&path, r#"[{"type":"rowing","id":"1"}]"#).unwrap();

    let mut t = Tracker::open(FileStorage::new(&path), TextRenderer::new(Vec::new(), false), &here())
        .unwrap();
    assert!(t.store().is_empty());

    t.submit(&form("cycling", "10", "30", "", "0"), None).unwrap();
    let text = FileStorage::new(&path).load().unwrap().unwrap();
    assert!(text.contains(r#""type":"cycling""#), "{text}");
}

#[test]
fn non_utf8_file_is_discarded_and_reset_still_works() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workouts.json");
    fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

    let mut t = Tracker::open(FileStorage::new(&path), TextRenderer::new(Vec::new(), false), &here())
        .unwrap();
    assert!(t.store().is_empty());

    t.reset().unwrap();
    assert!(!path.exists());
}
