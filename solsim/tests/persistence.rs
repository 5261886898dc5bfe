use std::io::Cursor;
use std::path::PathBuf;

use approx::assert_relative_eq;

use solsim::configuration::config::{MotionConfig, ScenarioConfig, ScopeConfig};
use solsim::persistence::diagnostics::STATS_HEADER;
use solsim::{
    generate_system, load_scenario_config, read_system, write_stats_csv, write_system, BodyKind, EnergySample,
    GeneratorConfig, Parameters, Scenario, SimError,
};

fn load(text: &str) -> solsim::LoadReport {
    read_system(Cursor::new(text)).unwrap()
}

fn scenarios_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

// ==================================================================================
// System file tests
// ==================================================================================

#[test]
fn reads_hierarchy_in_file_order() {
    let report = load(
        "# name radius color mass x y vx vy parent\n\
         Star 10 yellow 1.98892e30 0 0 0 0\n\
         \n\
         Planet_Earth 2 blue 5.972e24 1.496e11 0 0 29780\n\
         Planet_Mars 1.5 red 6.39e23 2.279e11 0.0 0.0 24070.0 Star\n\
         Satellite_Moon 0.5 grey 7.342e22 1.536e11 0 0 30802 Planet_Earth\n",
    );

    assert!(report.is_clean(), "{:?}", report.warnings);
    let sys = &report.system;
    assert_eq!(sys.len(), 4);

    let star = sys.find("Star").unwrap();
    let earth = sys.find("Planet_Earth").unwrap();
    let mars = sys.find("Planet_Mars").unwrap();
    let moon = sys.find("Satellite_Moon").unwrap();

    assert_eq!(sys.bodies[star.0].kind, BodyKind::Star);
    assert_eq!(sys.bodies[moon.0].kind, BodyKind::Satellite);
    assert_eq!(sys.bodies[earth.0].parent, None);
    assert_eq!(sys.bodies[mars.0].parent, Some(star));
    assert_eq!(sys.bodies[moon.0].parent, Some(earth));
    assert_eq!(sys.bodies[mars.0].color, "red");
    assert_relative_eq!(sys.bodies[mars.0].v.y, 24070.0);
    assert_relative_eq!(sys.bodies[earth.0].m, 5.972e24);
}

#[test]
fn forward_parent_reference_loads_as_free_body() {
    let report = load(
        "Satellite_Moon 0.5 grey 7.342e22 1.536e11 0 0 30802 Planet_Earth\n\
         Planet_Earth 2 blue 5.972e24 1.496e11 0 0 29780\n",
    );

    assert_eq!(report.system.len(), 2);
    let moon = report.system.find("Satellite_Moon").unwrap();
    assert_eq!(report.system.bodies[moon.0].parent, None);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        SimError::UnresolvedParent { line: 1, parent, .. } if parent == "Planet_Earth"
    ));
}

#[test]
fn planet_naming_a_later_star_loads_without_parent() {
    let report = load(
        "Planet_Early 2 blue 6e24 1e11 0 0 3e4 Star_Late\n\
         Planet_Other 2 green 6e24 2e11 0 0 2e4\n\
         Star_Late 10 yellow 2e30 0 0 0 0\n",
    );

    assert_eq!(report.system.len(), 3);
    let planet = report.system.find("Planet_Early").unwrap();
    assert_eq!(report.system.bodies[planet.0].parent, None);
    assert!(!report.system.bodies[planet.0].is_kinematic());
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        SimError::UnresolvedParent { line: 1, name, parent } if name == "Planet_Early" && parent == "Star_Late"
    ));
}

#[test]
fn non_finite_numbers_are_malformed() {
    let report = load(
        "Star 10 yellow 2e30 0 0 0 0\n\
         Planet_A 2 blue 6e24 NaN 0 0 3e4 Star\n\
         Planet_B 2 blue inf 1e11 0 0 3e4 Star\n\
         Planet_C 2 blue 6e24 1e11 0 -infinity 3e4 Star\n\
         Planet_D 2 green 6e24 2e11 0 0 2e4 Star\n",
    );

    assert_eq!(report.system.len(), 2);
    assert!(report.system.find("Planet_D").is_some());
    let lines: Vec<usize> = report
        .warnings
        .iter()
        .map(|w| match w {
            SimError::MalformedRecord { line, .. } => *line,
            other => panic!("unexpected warning {other:?}"),
        })
        .collect();
    assert_eq!(lines, vec![2, 3, 4]);
    for b in &report.system.bodies {
        assert!(b.x.x.is_finite() && b.x.y.is_finite() && b.v.x.is_finite() && b.m.is_finite());
    }
}

#[test]
fn malformed_lines_are_reported_and_skipped() {
    let report = load(
        "Star 10 yellow 1.98892e30 0 0 0 0\n\
         Planet_A 2 blue heavy 1e11 0 0 3e4 Star\n\
         Planet_B 2 blue 6e24 1e11\n\
         Comet_C 1 white 1e20 1e12 0 0 0\n\
         Planet_D 2 green 6e24 2e11 0 0 2e4 Star\n",
    );

    assert_eq!(report.system.len(), 2);
    assert!(report.system.find("Planet_D").is_some());

    let lines: Vec<usize> = report
        .warnings
        .iter()
        .map(|w| match w {
            SimError::MalformedRecord { line, .. } => *line,
            other => panic!("unexpected warning {other:?}"),
        })
        .collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn wrong_parent_kind_is_dropped() {
    let report = load(
        "Star 10 yellow 2e30 0 0 0 0\n\
         Satellite_S 0.5 grey 1e22 1e10 0 0 0 Star\n",
    );

    let sat = report.system.find("Satellite_S").unwrap();
    assert_eq!(report.system.bodies[sat.0].parent, None);
    assert!(matches!(report.warnings[0], SimError::InvalidParent { .. }));
}

#[test]
fn duplicate_names_keep_the_first_body() {
    let report = load(
        "Planet_X 2 blue 1e24 1e10 0 0 0\n\
         Planet_X 3 red 2e24 2e10 0 0 0\n",
    );

    assert_eq!(report.system.len(), 1);
    assert_relative_eq!(report.system.bodies[0].m, 1.0e24);
    assert!(matches!(report.warnings[0], SimError::MalformedRecord { line: 2, .. }));
}

#[test]
fn written_system_reads_back_the_same() {
    let original = load(
        "Star 10 yellow 1.98892e30 -3e11 0 0 0\n\
         Planet_Earth 2 blue 5.972e24 1.496e11 -2.5e9 12.5 29780.25 Star\n\
         Satellite_Moon 0.5 grey 7.342e22 1.536e11 0 0 30802 Planet_Earth\n",
    )
    .system;

    let mut buf = Vec::new();
    write_system(&mut buf, &original).unwrap();
    let reread = read_system(Cursor::new(buf)).unwrap();

    assert!(reread.is_clean());
    assert_eq!(reread.system.len(), original.len());
    for (a, b) in original.bodies.iter().zip(reread.system.bodies.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.color, b.color);
        assert_eq!(a.parent, b.parent);
        assert_eq!(a.radius, b.radius);
        assert_eq!(a.m, b.m);
        assert_eq!(a.x, b.x);
        assert_eq!(a.v, b.v);
    }
}

// ==================================================================================
// Diagnostics tests
// ==================================================================================

#[test]
fn stats_csv_has_header_and_rows() {
    let samples = [
        EnergySample {
            time: 0.0,
            kinetic: 1.5e30,
            potential: -2.0e33,
            total: 1.5e30 - 2.0e33,
        },
        EnergySample {
            time: 10.0,
            kinetic: 1.5e30,
            potential: -2.0e33,
            total: 1.5e30 - 2.0e33,
        },
    ];

    let mut buf = Vec::new();
    write_stats_csv(&mut buf, &samples).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], STATS_HEADER);
    assert!(lines[2].starts_with("10.0000,1.5000e30,-2.0000e33,"), "{}", lines[2]);
}

// ==================================================================================
// Generator tests
// ==================================================================================

#[test]
fn generator_is_deterministic() {
    let cfg = GeneratorConfig::default();
    let params = Parameters::default();

    let a = generate_system(&cfg, &params).unwrap();
    let b = generate_system(&cfg, &params).unwrap();

    assert_eq!(a.len(), b.len());
    for (ba, bb) in a.bodies.iter().zip(b.bodies.iter()) {
        assert_eq!(ba.name, bb.name);
        assert_eq!(ba.x, bb.x);
        assert_eq!(ba.v, bb.v);
        assert_eq!(ba.m, bb.m);
    }

    let other = generate_system(&GeneratorConfig { seed: 7, ..cfg }, &params).unwrap();
    assert_ne!(a.bodies[1].x, other.bodies[1].x);
}

#[test]
fn generated_layout_respects_hierarchy() {
    let sys = generate_system(&GeneratorConfig::default(), &Parameters::default()).unwrap();

    let count = |kind: BodyKind| sys.bodies.iter().filter(|b| b.kind == kind).count();
    assert_eq!(count(BodyKind::Star), 3);
    assert_eq!(count(BodyKind::Planet), 40);
    // middle star: 20 planets on 5 rings, rings 1, 3, 5 carry moons
    assert_eq!(count(BodyKind::Satellite), 12);

    for b in &sys.bodies {
        let parent_kind = b.parent.and_then(|p| sys.get(p)).map(|p| p.kind);
        assert_eq!(parent_kind, b.kind.parent_kind(), "bad parent for {}", b.name);
        assert!(b.is_kinematic() == (b.kind != BodyKind::Star));
    }
}

#[test]
fn generated_satellites_start_clear_of_their_planet() {
    let params = Parameters::default();
    let sys = generate_system(&GeneratorConfig::default(), &params).unwrap();

    for b in sys.bodies.iter().filter(|b| b.kind == BodyKind::Satellite) {
        let planet = b.parent.and_then(|p| sys.get(p)).unwrap();
        let threshold = solsim::collision_threshold(b, planet, &params);
        assert!(b.distance_to(planet) > threshold, "{} starts inside {}", b.name, planet.name);
    }
}

#[test]
fn satellite_names_carry_planet_and_star_index() {
    let cfg = GeneratorConfig {
        satellite_star: Some(0),
        ..GeneratorConfig::default()
    };
    let sys = generate_system(&cfg, &Parameters::default()).unwrap();

    let sats: Vec<_> = sys.bodies.iter().filter(|b| b.kind == BodyKind::Satellite).collect();
    assert!(!sats.is_empty());
    for sat in sats {
        let planet = sat.parent.and_then(|p| sys.get(p)).unwrap();
        // Planet{j}_{i} -> Satellite1_{j}_{i}
        let suffix = planet.name.trim_start_matches("Planet");
        assert_eq!(sat.name, format!("Satellite1_{suffix}"));
        assert!(sat.name.ends_with("_0"), "{}", sat.name);
    }
}

#[test]
fn generator_can_leave_everything_free() {
    let cfg = GeneratorConfig {
        kinematic: false,
        ..GeneratorConfig::default()
    };
    let sys = generate_system(&cfg, &Parameters::default()).unwrap();
    assert!(sys.bodies.iter().all(|b| !b.is_kinematic()));
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn scenario_yaml_fills_defaults() {
    let cfg: ScenarioConfig = serde_yaml::from_str(
        "engine:\n  motion: kinematic\n  satellite_scope: all\nsystem:\n  file: bodies.txt\n",
    )
    .unwrap();

    assert_eq!(cfg.engine.motion, MotionConfig::Kinematic);
    assert_eq!(cfg.engine.satellite_scope, ScopeConfig::All);
    assert_eq!(cfg.engine.energy_every, 10);
    assert_relative_eq!(cfg.parameters.G, 6.67408e-11);
    assert_relative_eq!(cfg.parameters.min_distance, 1.0e9);
    assert_eq!(cfg.system.file, Some(PathBuf::from("bodies.txt")));
    assert!(cfg.system.generate.is_none());
}

#[test]
fn scenario_without_bodies_is_rejected() {
    let cfg = ScenarioConfig::default();
    assert!(Scenario::build_scenario(cfg, &scenarios_dir()).is_err());
}

#[test]
fn bundled_file_scenario_loads_cleanly() {
    let dir = scenarios_dir();
    let cfg = load_scenario_config(&dir.join("inner_system.yaml")).unwrap();
    let mut scenario = Scenario::build_scenario(cfg, &dir).unwrap();

    assert!(scenario.warnings.is_empty());
    assert_eq!(scenario.engine.bodies().len(), 5);
    assert!(scenario.engine.bodies().iter().all(|b| !b.is_kinematic()));

    let steps = 48;
    let collisions = scenario.engine.run(scenario.settings.dt, steps);
    assert_eq!(collisions, 0);
    assert_relative_eq!(scenario.engine.time(), scenario.settings.dt * steps as f64, max_relative = 1e-12);
}

#[test]
fn bundled_generated_scenario_is_kinematic() {
    let dir = scenarios_dir();
    let cfg = load_scenario_config(&dir.join("three_stars.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg, &dir).unwrap();

    let bodies = scenario.engine.bodies();
    assert!(bodies.iter().filter(|b| b.kind != BodyKind::Star).all(|b| b.is_kinematic()));
}

#[test]
fn kinematic_motion_on_loaded_file_establishes_orbits() {
    let dir = scenarios_dir();
    let mut cfg = load_scenario_config(&dir.join("inner_system.yaml")).unwrap();
    cfg.engine.motion = MotionConfig::Kinematic;

    let scenario = Scenario::build_scenario(cfg, &dir).unwrap();

    let bodies = scenario.engine.bodies();
    let kinematic = bodies.iter().filter(|b| b.is_kinematic()).count();
    let parented = bodies.iter().filter(|b| b.parent.is_some()).count();
    assert_eq!(kinematic, parented);
    assert!(kinematic > 0);
}
