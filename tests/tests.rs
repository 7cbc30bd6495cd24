use approx::assert_relative_eq;

use tdsim::simulation::clock::ObserverClock;
use tdsim::simulation::error::DomainError;
use tdsim::simulation::params::Parameters;
use tdsim::simulation::scenario::{Scenario, ScenarioError};
use tdsim::simulation::states::{GravitySource, Observer, System};
use tdsim::simulation::stepper::tick;
use tdsim::{ConstantsConfig, EngineConfig, ObserverConfig, ScenarioConfig, SourceConfig};

/// Build a 2D system with one resting and one moving observer
pub fn two_clock_system(v1: f64, v2: f64) -> System {
    let o1 = Observer {
        x: [0.0, 0.0].into(),
        clock: ObserverClock::with_velocity(v1),
    };
    let o2 = Observer {
        x: [5.0, 0.0].into(),
        clock: ObserverClock::with_velocity(v2),
    };
    System {
        observers: vec![o1, o2],
        sources: vec![],
        t: 0.0,
    }
}

/// Default normalized-unit parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        c: 1.0,
        G: 1.0,
        time_scale: 1.0,
        max_dt: 0.1,
        seed: 42.0,
    }
}

/// A gravity source at `x` with mass `m`
pub fn source_at(x: [f64; 2], m: f64) -> GravitySource {
    GravitySource {
        x: x.into(),
        m,
        radius: 0.1,
    }
}

fn config_2d(observers: Vec<ObserverConfig>, sources: Vec<SourceConfig>) -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig { dimension: false },
        constants: ConstantsConfig {
            c: 1.0,
            G: 1.0,
            time_scale: 1.0,
            max_dt: 0.1,
            seed: 42.0,
        },
        observers,
        sources,
    }
}

// ==================================================================================
// Dilation scenario tests
// ==================================================================================

#[test]
fn twin_scenario_at_eight_tenths_c() {
    let mut sys = two_clock_system(0.0, 0.8);
    let p = test_params();

    let mut last_factor = 0.0;
    for _ in 0..100 {
        let report = tick(&mut sys, &p, 0.01);
        assert!(report.faults.is_empty());
        last_factor = report.readouts[1].unwrap().combined;
    }

    // gamma(0.8c) = 1.6667, so 1.0s of coordinate time -> 0.6s proper
    assert_relative_eq!(last_factor, 1.0 / 0.6, max_relative = 1e-9);
    assert_relative_eq!(sys.observers[0].clock.proper_time(), 1.0, max_relative = 1e-9);
    assert_relative_eq!(sys.observers[1].clock.proper_time(), 0.6, max_relative = 1e-9);
    assert_relative_eq!(sys.t, 1.0, max_relative = 1e-9);
}

#[test]
fn gravity_is_numerically_invisible_at_demo_constants() {
    // The original demo constants: G in SI, c in pixel units. The
    // Schwarzschild term is ~2.47e-8, so the factor sits at ~1 - 1.2e-8
    let p = Parameters {
        c: 300.0,
        G: 6.674e-11,
        ..test_params()
    };
    let mut sys = System {
        observers: vec![Observer {
            x: [0.0, 0.0].into(),
            clock: ObserverClock::new(),
        }],
        sources: vec![source_at([60.0, 0.0], 1e6)],
        t: 0.0,
    };

    let report = tick(&mut sys, &p, 0.01);
    let readout = report.readouts[0].unwrap();

    let rs_over_r = 2.0 * p.G * 1e6 / (60.0 * p.c * p.c);
    assert_relative_eq!(readout.gravitational, (1.0 - rs_over_r).sqrt(), max_relative = 1e-12);
    // Indistinguishable from no dilation at display precision
    assert_relative_eq!(readout.gravitational, 1.0, max_relative = 1e-7);
    assert!(readout.gravitational < 1.0);
}

#[test]
fn source_order_does_not_change_the_result() {
    let p = test_params();

    let sources = vec![
        source_at([10.0, 0.0], 0.01),
        source_at([-7.0, 3.0], 0.02),
        source_at([0.0, 20.0], 0.005),
    ];
    let mut reversed = sources.clone();
    reversed.reverse();

    let mut sys_a = two_clock_system(0.5, 0.5);
    sys_a.sources = sources;
    let mut sys_b = two_clock_system(0.5, 0.5);
    sys_b.sources = reversed;

    let ra = tick(&mut sys_a, &p, 0.01);
    let rb = tick(&mut sys_b, &p, 0.01);

    assert_relative_eq!(
        ra.readouts[0].unwrap().combined,
        rb.readouts[0].unwrap().combined,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        sys_a.observers[0].clock.proper_time(),
        sys_b.observers[0].clock.proper_time(),
        max_relative = 1e-9
    );
}

#[test]
fn replayed_tick_sequence_is_deterministic() {
    let p = test_params();
    let dts = [0.016, 0.017, 0.033, 0.001, 0.016];

    let mut sys_a = two_clock_system(0.3, 0.9);
    let mut sys_b = two_clock_system(0.3, 0.9);

    for dt in dts {
        tick(&mut sys_a, &p, dt);
    }
    for dt in dts {
        tick(&mut sys_b, &p, dt);
    }

    assert_eq!(
        sys_a.observers[1].clock.proper_time(),
        sys_b.observers[1].clock.proper_time()
    );
}

#[test]
fn velocity_change_takes_effect_on_the_next_tick() {
    let p = test_params();
    let mut sys = two_clock_system(0.0, 0.0);

    tick(&mut sys, &p, 0.01);
    sys.observers[0].clock.set_velocity(0.8);
    let report = tick(&mut sys, &p, 0.01);

    // The stepper recomputes the factor from the new velocity, never a
    // stale one from the previous tick
    assert_relative_eq!(report.readouts[0].unwrap().kinematic, 1.0 / 0.6, max_relative = 1e-9);
    assert_relative_eq!(
        sys.observers[0].clock.proper_time(),
        0.01 + 0.01 * 0.6,
        max_relative = 1e-9
    );
}

// ==================================================================================
// Fault isolation tests
// ==================================================================================

#[test]
fn superluminal_observer_stalls_but_does_not_crash_the_tick() {
    let p = test_params();
    let mut sys = two_clock_system(0.0, 0.8);

    tick(&mut sys, &p, 0.01);
    let before = sys.observers[1].clock.proper_time();

    // Slider glitch: observer 1 set to c
    sys.observers[1].clock.set_velocity(1.0);
    let report = tick(&mut sys, &p, 0.01);

    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].observer, 1);
    assert_eq!(
        report.faults[0].error,
        DomainError::SuperluminalSpeed { speed: 1.0, c: 1.0 }
    );
    assert!(report.readouts[1].is_none());

    // The faulted clock is exactly where it was, the healthy one advanced
    assert_eq!(sys.observers[1].clock.proper_time(), before);
    assert_relative_eq!(sys.observers[0].clock.proper_time(), 0.02, max_relative = 1e-9);
}

#[test]
fn observer_on_top_of_a_source_stalls_with_unchanged_clock() {
    let p = test_params();
    let mut sys = two_clock_system(0.0, 0.0);
    sys.sources.push(source_at([0.0, 0.0], 0.01)); // distance 0 to observer 0

    let report = tick(&mut sys, &p, 0.01);

    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].observer, 0);
    assert_eq!(report.faults[0].error, DomainError::NonPositiveDistance(0.0));
    assert_eq!(sys.observers[0].clock.proper_time(), 0.0);
    // Observer 1 sits at distance 5 and still advances
    assert!(sys.observers[1].clock.proper_time() > 0.0);
}

// ==================================================================================
// Frame-glitch tests
// ==================================================================================

#[test]
fn huge_frame_dt_is_clamped_to_the_ceiling() {
    let p = test_params();
    let mut sys = two_clock_system(0.0, 0.0);

    // Tab suspend: 5 seconds between frames, ceiling is 0.1
    let report = tick(&mut sys, &p, 5.0);

    assert_relative_eq!(report.dt_applied, p.max_dt);
    assert_relative_eq!(sys.observers[0].clock.proper_time(), p.max_dt);
}

#[test]
fn negative_frame_dt_is_clamped_to_zero() {
    let p = test_params();
    let mut sys = two_clock_system(0.0, 0.8);

    tick(&mut sys, &p, 0.01);
    let before = sys.observers[1].clock.proper_time();

    let report = tick(&mut sys, &p, -0.25);

    assert_relative_eq!(report.dt_applied, 0.0);
    assert_eq!(sys.observers[1].clock.proper_time(), before);
    assert_relative_eq!(sys.t, 0.01, max_relative = 1e-12);
}

#[test]
fn time_scale_stretches_simulated_time() {
    let mut p = test_params();
    p.time_scale = 10.0;
    let mut sys = two_clock_system(0.0, 0.0);

    let report = tick(&mut sys, &p, 0.01);

    assert_relative_eq!(report.dt_applied, 0.1);
    assert_relative_eq!(sys.observers[0].clock.proper_time(), 0.1);
}

// ==================================================================================
// Scenario building tests
// ==================================================================================

#[test]
fn build_rejects_superluminal_initial_velocity() {
    let cfg = config_2d(
        vec![ObserverConfig {
            x: vec![0.0, 0.0],
            velocity: 1.5,
        }],
        vec![],
    );

    let err = Scenario::build_scenario(cfg).unwrap_err();
    assert!(matches!(err, ScenarioError::ObserverDomain { index: 0, .. }));
}

#[test]
fn build_rejects_non_positive_source_mass() {
    let cfg = config_2d(
        vec![ObserverConfig {
            x: vec![0.0, 0.0],
            velocity: 0.0,
        }],
        vec![SourceConfig {
            x: vec![1.0, 1.0],
            mass: 0.0,
            radius: 1.0,
        }],
    );

    let err = Scenario::build_scenario(cfg).unwrap_err();
    assert!(matches!(err, ScenarioError::SourceDomain { index: 0, .. }));
}

#[test]
fn build_rejects_wrong_dimension_positions() {
    let cfg = config_2d(
        vec![ObserverConfig {
            x: vec![0.0, 0.0, 0.0],
            velocity: 0.0,
        }],
        vec![],
    );

    let err = Scenario::build_scenario(cfg).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::ObserverDimension {
            index: 0,
            expected: 2,
            got: 3
        }
    ));
}

#[test]
fn build_starts_all_clocks_at_zero() {
    let cfg = config_2d(
        vec![
            ObserverConfig {
                x: vec![0.0, 0.0],
                velocity: 0.0,
            },
            ObserverConfig {
                x: vec![5.0, 0.0],
                velocity: 0.8,
            },
        ],
        vec![SourceConfig {
            x: vec![-3.0, 2.0],
            mass: 0.5,
            radius: 1.0,
        }],
    );

    let scenario = Scenario::build_scenario(cfg).unwrap();
    assert_eq!(scenario.system.observers.len(), 2);
    assert_eq!(scenario.system.sources.len(), 1);
    assert_eq!(scenario.system.t, 0.0);
    for obs in &scenario.system.observers {
        assert_eq!(obs.clock.proper_time(), 0.0);
    }
    assert_relative_eq!(scenario.system.observers[1].clock.velocity(), 0.8);
}
