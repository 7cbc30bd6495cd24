//! Per-tick driver for the time-dilation core
//!
//! `tick` (2D) and `tick_3d` advance every observer clock by one frame:
//! clamp the raw dt, compute fresh dilation factors from the current
//! velocities and positions, then advance. Factors are always recomputed
//! before advancing; a stale factor from the previous tick is never used
//!
//! A `DomainError` stalls only the affected observer for that tick.
//! Faults are collected in the returned `TickReport` for the caller to log;
//! nothing here can fail the surrounding frame loop

use crate::simulation::dilation::{combined_factor, gravitational_factor, kinematic_factor};
use crate::simulation::error::DomainError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{GravitySource, GravitySource3, NVec2, NVec3, System, System3};

/// Per-observer diagnostics from one tick
#[derive(Debug, Clone, Copy)]
pub struct DilationReadout {
    pub kinematic: f64, // Lorentz factor from the observer's speed
    pub gravitational: f64, // product of all per-source factors
    pub combined: f64, // kinematic * gravitational
    pub proper_time: f64, // accumulated proper time after this tick
}

impl DilationReadout {
    /// Simulated sound pitch scale, `1 / combined`: a dilated clock sounds
    /// lower to the outside observer
    pub fn pitch(&self) -> f64 {
        1.0 / self.combined
    }
}

/// A domain error confined to one observer for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFault {
    pub observer: usize, // index into the system's observer list
    pub error: DomainError,
}

/// Outcome of one tick over the whole system
#[derive(Debug, Clone)]
pub struct TickReport {
    pub dt_applied: f64, // clamped and scaled simulated dt
    pub readouts: Vec<Option<DilationReadout>>, // None where the observer faulted
    pub faults: Vec<TickFault>,
}

/// Clamp a raw frame dt to `[0, max_dt]` and apply the time scale
///
/// Negative or non-finite values (clock-timestamp glitches) clamp to 0;
/// implausibly large values (tab suspend) clamp to the ceiling
fn simulated_dt(raw_dt: f64, params: &Parameters) -> f64 {
    let dt = if raw_dt.is_finite() { raw_dt } else { 0.0 };
    dt.clamp(0.0, params.max_dt.max(0.0)) * params.time_scale
}

/// Advance the 2D system by one frame
///
/// Ordering per observer: kinematic factor from the clock's current
/// velocity, one gravitational factor per source from current positions,
/// combine, then advance the clock. `sys.t` advances by the clamped dt
/// regardless of per-observer faults
pub fn tick(sys: &mut System, params: &Parameters, raw_dt: f64) -> TickReport {
    let dt = simulated_dt(raw_dt, params);

    let n = sys.observers.len();
    let mut readouts = Vec::with_capacity(n);
    let mut faults = Vec::new();

    for (i, obs) in sys.observers.iter_mut().enumerate() {
        let factors = per_observer_factors_2d(obs.x, obs.clock.velocity(), &sys.sources, params);

        match factors {
            Ok((kinematic, gravitational)) => {
                let combined = kinematic * gravitational;
                obs.clock.advance(dt, combined);
                readouts.push(Some(DilationReadout {
                    kinematic,
                    gravitational,
                    combined,
                    proper_time: obs.clock.proper_time(),
                }));
            }
            Err(error) => {
                // Stall this observer for the tick, keep the loop going
                faults.push(TickFault { observer: i, error });
                readouts.push(None);
            }
        }
    }

    sys.t += dt;

    TickReport {
        dt_applied: dt,
        readouts,
        faults,
    }
}

/// Kinematic factor plus the product of all per-source gravitational
/// factors for one 2D observer
fn per_observer_factors_2d(
    x: NVec2,
    velocity: f64,
    sources: &[GravitySource],
    params: &Parameters,
) -> Result<(f64, f64), DomainError> {
    let kinematic = kinematic_factor(velocity, params.c)?;

    let mut gravs = Vec::with_capacity(sources.len());
    for src in sources {
        let distance = (src.x - x).norm();
        gravs.push(gravitational_factor(src.m, distance, params.G, params.c)?);
    }

    // combined_factor folds from 1.0 here so the gravitational product is
    // reported separately from the kinematic term
    Ok((kinematic, combined_factor(1.0, &gravs)))
}

// =========================================================================================
// 2d stuff above
// 3d stuff below
// =========================================================================================

/// Advance the 3D system by one frame
///
/// Same contract as [`tick`]: fresh factors per observer, per-observer
/// fault isolation, coordinate time advanced by the clamped dt
pub fn tick_3d(sys: &mut System3, params: &Parameters, raw_dt: f64) -> TickReport {
    let dt = simulated_dt(raw_dt, params);

    let n = sys.observers.len();
    let mut readouts = Vec::with_capacity(n);
    let mut faults = Vec::new();

    for (i, obs) in sys.observers.iter_mut().enumerate() {
        let factors = per_observer_factors_3d(obs.x, obs.clock.velocity(), &sys.sources, params);

        match factors {
            Ok((kinematic, gravitational)) => {
                let combined = kinematic * gravitational;
                obs.clock.advance(dt, combined);
                readouts.push(Some(DilationReadout {
                    kinematic,
                    gravitational,
                    combined,
                    proper_time: obs.clock.proper_time(),
                }));
            }
            Err(error) => {
                faults.push(TickFault { observer: i, error });
                readouts.push(None);
            }
        }
    }

    sys.t += dt;

    TickReport {
        dt_applied: dt,
        readouts,
        faults,
    }
}

/// Kinematic factor plus the product of all per-source gravitational
/// factors for one 3D observer
fn per_observer_factors_3d(
    x: NVec3,
    velocity: f64,
    sources: &[GravitySource3],
    params: &Parameters,
) -> Result<(f64, f64), DomainError> {
    let kinematic = kinematic_factor(velocity, params.c)?;

    let mut gravs = Vec::with_capacity(sources.len());
    for src in sources {
        let distance = (src.x - x).norm();
        gravs.push(gravitational_factor(src.m, distance, params.G, params.c)?);
    }

    Ok((kinematic, combined_factor(1.0, &gravs)))
}
