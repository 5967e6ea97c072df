//! Trajectory tables, frames and display bounds

use gravsim_core::tests::test_helpers::{anchor, body, domain, orbit_domain};
use gravsim_core::{
    run_domain, trajectory_tables, DisplayBounds, Sample, Scene, TrajectoryTable, WallBounds,
};

#[test]
fn test_one_table_per_body_in_order() {
    let run = run_domain(&orbit_domain(), None).expect("run succeeds");
    let tables = trajectory_tables(&run);

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].body_id, "probe");
    assert_eq!(tables[1].body_id, "sun");
    assert!(tables[1].is_static);
    assert_eq!(tables[0].samples.len(), 2001);
    assert!(tables[0].samples.windows(2).all(|w| w[1].t > w[0].t));
}

#[test]
fn test_csv_layout() {
    let spec = domain("d", 1.0, 2.0, vec![body("ball", 1.0, [0.0, 0.0], [1.0, 0.5])]);
    let run = run_domain(&spec, None).expect("run succeeds");
    let csv = trajectory_tables(&run)[0].to_csv_string();

    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "t,x,y,dxdt,dydt");
    assert_eq!(lines[1], "0,0,0,1,0.5");
    assert_eq!(lines[3], "2,2,1,1,0.5");
}

#[test]
fn test_frames_align_sample_indices() {
    let run = run_domain(&orbit_domain(), None).expect("run succeeds");
    let scene = Scene::from_run(&run);

    assert_eq!(scene.frames.len(), run.time_grid().len());
    for frame in &scene.frames {
        assert_eq!(frame.bodies.len(), 2);
        let probe = &run.body("probe").unwrap().trajectory()[frame.index];
        assert_eq!(frame.t, probe.t);
        assert_eq!(frame.bodies[0].state, *probe);
    }
}

#[test]
fn test_bounds_cover_all_samples() {
    let spec = domain(
        "d",
        1.0,
        4.0,
        vec![
            body("mover", 1.0, [0.0, 0.0], [1.0, -2.0]),
            anchor("post", 1.0, [-3.0, 5.0]),
        ],
    );
    let run = run_domain(&spec, None).expect("run succeeds");
    let bounds = DisplayBounds::from_bodies(run.bodies()).expect("has bodies");

    let all: Vec<_> = run
        .bodies()
        .iter()
        .flat_map(|b| b.trajectory().iter().map(|s| s.pos))
        .collect();
    let x_max = all.iter().map(|p| p.x).fold(f64::MIN, f64::max);
    let y_min = all.iter().map(|p| p.y).fold(f64::MAX, f64::min);

    assert_eq!(bounds.x_min, -3.0);
    assert_eq!(bounds.y_max, 5.0);
    assert_eq!(bounds.x_max, x_max);
    assert_eq!(bounds.y_min, y_min);
}

#[test]
fn test_scene_carries_walls_and_fps() {
    let spec = orbit_domain().with_walls(WallBounds {
        x_min: Some(-20.0),
        ..WallBounds::default()
    });
    let run = run_domain(&spec, None).expect("run succeeds");

    let scene = Scene::from_run(&run);
    assert_eq!(scene.domain, "orbit");
    assert_eq!(scene.walls.x_min, Some(-20.0));
    assert_eq!(scene.fps, 30);
    assert!((scene.duration_secs() - 2001.0 / 30.0).abs() < 1e-9);

    let fast = scene.clone().with_fps(2000);
    assert_eq!(fast.fps, 2000);
    assert_eq!(fast.frames, scene.frames);
}

#[test]
fn test_scene_serializes() {
    let spec = domain("d", 1.0, 1.0, vec![body("ball", 1.0, [0.0, 0.0], [1.0, 0.0])]);
    let run = run_domain(&spec, None).expect("run succeeds");

    let json = serde_json::to_value(Scene::from_run(&run)).expect("scene serializes");
    assert_eq!(json["domain"], "d");
    assert_eq!(json["frames"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["frames"][1]["bodies"][0]["id"], "ball");
}

#[test]
fn test_samples_serialize_flat() {
    let spec = domain("d", 1.0, 1.0, vec![body("ball", 1.0, [0.0, 0.0], [1.0, 0.5])]);
    let run = run_domain(&spec, None).expect("run succeeds");

    let table = serde_json::to_value(&trajectory_tables(&run)[0]).expect("table serializes");
    let last = &table["samples"][1];
    assert_eq!(last["t"], 1.0);
    assert_eq!(last["x"], 1.0);
    assert_eq!(last["y"], 0.5);
    assert_eq!(last["vx"], 1.0);
    assert_eq!(last["vy"], 0.5);
    assert!(last.get("pos").is_none());

    let scene = serde_json::to_value(Scene::from_run(&run)).expect("scene serializes");
    let ball = &scene["frames"][1]["bodies"][0];
    assert_eq!(ball["id"], "ball");
    assert_eq!(ball["x"], 1.0);
    assert_eq!(ball["vy"], 0.5);
}

#[test]
fn test_exported_tables_rebuild_the_scene() {
    let spec = orbit_domain().with_walls(WallBounds {
        y_max: Some(30.0),
        ..WallBounds::default()
    });
    let run = run_domain(&spec, None).expect("run succeeds");

    let json = serde_json::to_string(&trajectory_tables(&run)).expect("tables serialize");
    let tables: Vec<TrajectoryTable> = serde_json::from_str(&json).expect("tables parse back");
    assert_eq!(tables, trajectory_tables(&run));

    let rebuilt = Scene::from_tables(run.id(), *run.walls(), 2000, &tables);
    let original = Scene::from_run(&run);
    assert_eq!(rebuilt.frames, original.frames);
    assert_eq!(rebuilt.bounds, original.bounds);
    assert_eq!(rebuilt, original.with_fps(2000));
}

#[test]
fn test_exported_scene_can_be_retimed() {
    let run = run_domain(&orbit_domain(), None).expect("run succeeds");
    let json = serde_json::to_string(&Scene::from_run(&run)).expect("scene serializes");

    let scene: Scene = serde_json::from_str(&json).expect("scene parses back");
    assert_eq!(scene, Scene::from_run(&run));

    let retimed = scene.with_fps(60);
    assert_eq!(retimed.fps, 60);
    let first: &Sample = &retimed.frames[0].bodies[0].state;
    assert_eq!(first, run.body("probe").unwrap().initial());
}
