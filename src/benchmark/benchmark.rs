use std::time::Instant;

use crate::simulation::clock::ObserverClock;
use crate::simulation::dilation::{combined_factor, gravitational_factor, kinematic_factor};
use crate::simulation::params::Parameters;
use crate::simulation::states::{GravitySource3, NVec3, Observer3, System3};
use crate::simulation::stepper::tick_3d;

/// Parameters shared by all benches, SI-ish pixel units
fn bench_params() -> Parameters {
    Parameters {
        c: 300.0,
        G: 6.674e-11,
        time_scale: 1.0,
        max_dt: 0.1,
        seed: 42.0,
    }
}

/// Helper to build a System3 with `n_obs` observers and `n_src` sources
fn make_system3(n_obs: usize, n_src: usize) -> System3 {
    let mut observers = Vec::with_capacity(n_obs);
    for i in 0..n_obs {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        observers.push(Observer3 {
            x,
            clock: ObserverClock::with_velocity(0.8 * 300.0),
        });
    }

    let mut sources = Vec::with_capacity(n_src);
    for i in 0..n_src {
        let i_f = (i + 1000) as f64;
        sources.push(GravitySource3 {
            x: NVec3::new(
                (i_f * 0.37).sin() * 50.0,
                (i_f * 0.13).cos() * 50.0,
                (i_f * 0.07).sin() * 50.0,
            ),
            m: 1e6,
            radius: 1.0,
        });
    }

    System3 {
        observers,
        sources,
        t: 0.0,
    }
}

/// Time raw factor math for a range of source counts
pub fn bench_dilation() {
    let ns = [1, 4, 16, 64, 256, 1024, 4096];
    let params = bench_params();

    for n in ns {
        // Deterministic distances, one per source
        let distances: Vec<f64> = (0..n).map(|i| 10.0 + (i as f64 * 0.37).sin().abs() * 50.0).collect();

        let gamma = kinematic_factor(0.8 * params.c, params.c).unwrap();

        // Warm up
        let mut gravs = Vec::with_capacity(n);
        for d in &distances {
            gravs.push(gravitational_factor(1e6, *d, params.G, params.c).unwrap());
        }
        let _ = combined_factor(gamma, &gravs);

        let t0 = Instant::now();
        gravs.clear();
        for d in &distances {
            gravs.push(gravitational_factor(1e6, *d, params.G, params.c).unwrap());
        }
        let combined = combined_factor(gamma, &gravs);
        let dt = t0.elapsed().as_secs_f64();

        println!("sources = {n:5}, combined = {combined:.9}, factor eval = {dt:8.6} s");
    }
}

/// Benchmark the real tick_3d for a range of observer counts
/// Paste output directly into excel to graph
pub fn bench_tick_curve() {
    println!("observers,sources,tick_us");

    let params = bench_params();

    for n in (50..=3200).step_by(50) {
        // Small n: average over a few ticks to smooth noise
        let steps = if n <= 800 { 20 } else { 5 };

        let mut sys = make_system3(n, 16);

        // Warm-up
        tick_3d(&mut sys, &params, 0.016);

        let t0 = Instant::now();
        for _ in 0..steps {
            tick_3d(&mut sys, &params, 0.016);
        }
        let us_per_tick = t0.elapsed().as_secs_f64() * 1e6 / steps as f64;

        println!("{},{},{:.3}", n, 16, us_per_tick);
    }
}
