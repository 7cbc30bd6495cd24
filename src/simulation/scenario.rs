//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces runtime bundles
//! (`Scenario` for 2D, `Scenario3D` for 3D) containing:
//! - physical constants and numerical settings (`Parameters`)
//! - system state (`System`/`System3` with all clocks at proper time 0)
//!
//! Building is the validation boundary: wrong-dimension position arrays,
//! superluminal initial velocities, and non-positive source masses are
//! rejected here so the per-frame loop never sees them
//!
//! These scenarios are inserted into Bevy as `Resource`s and consumed by
//! the tick and visualization systems

use bevy::prelude::Resource;
use thiserror::Error;

use crate::configuration::config::{ObserverConfig, ScenarioConfig, SourceConfig};
use crate::simulation::clock::ObserverClock;
use crate::simulation::error::DomainError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{
    GravitySource, GravitySource3, NVec2, NVec3, Observer, Observer3, System, System3,
};

/// Configuration rejected while building a runtime scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("observer {index}: position has {got} components, expected {expected}")]
    ObserverDimension {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("source {index}: position has {got} components, expected {expected}")]
    SourceDimension {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("observer {index}: {source}")]
    ObserverDomain {
        index: usize,
        source: DomainError,
    },

    #[error("source {index}: {source}")]
    SourceDomain {
        index: usize,
        source: DomainError,
    },
}

/// Bevy resource representing a fully-initialized 2D scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// physical constants plus the current system state. It is inserted as a
/// `Resource` and then read by the systems responsible for ticking,
/// visualization, and diagnostics
#[derive(Debug, Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        let parameters = build_parameters(&cfg);

        // Observers: map `ObserverConfig` -> runtime `Observer` with a
        // fresh clock carrying the configured initial speed
        let mut observers = Vec::with_capacity(cfg.observers.len());
        for (index, oc) in cfg.observers.iter().enumerate() {
            check_observer(index, oc, 2, &parameters)?;
            observers.push(Observer {
                x: NVec2::new(oc.x[0], oc.x[1]),
                clock: ObserverClock::with_velocity(oc.velocity),
            });
        }

        // Sources: map `SourceConfig` -> runtime `GravitySource`
        let mut sources = Vec::with_capacity(cfg.sources.len());
        for (index, sc) in cfg.sources.iter().enumerate() {
            check_source(index, sc, 2)?;
            sources.push(GravitySource {
                x: NVec2::new(sc.x[0], sc.x[1]),
                m: sc.mass,
                radius: sc.radius,
            });
        }

        // Initial system state: everything at coordinate time t = 0
        let system = System {
            observers,
            sources,
            t: 0.0,
        };

        Ok(Self { parameters, system })
    }
}

// =========================================================================================
// 3d stuff below
// =========================================================================================

/// Bevy resource representing a fully-initialized 3D scenario
///
/// Same shape as [`Scenario`] with 3D state types
#[derive(Debug, Resource)]
pub struct Scenario3D {
    pub parameters: Parameters,
    pub system: System3,
}

impl Scenario3D {
    pub fn build_scenario_3d(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        let parameters = build_parameters(&cfg);

        let mut observers = Vec::with_capacity(cfg.observers.len());
        for (index, oc) in cfg.observers.iter().enumerate() {
            check_observer(index, oc, 3, &parameters)?;
            observers.push(Observer3 {
                x: NVec3::new(oc.x[0], oc.x[1], oc.x[2]),
                clock: ObserverClock::with_velocity(oc.velocity),
            });
        }

        let mut sources = Vec::with_capacity(cfg.sources.len());
        for (index, sc) in cfg.sources.iter().enumerate() {
            check_source(index, sc, 3)?;
            sources.push(GravitySource3 {
                x: NVec3::new(sc.x[0], sc.x[1], sc.x[2]),
                m: sc.mass,
                radius: sc.radius,
            });
        }

        let system = System3 {
            observers,
            sources,
            t: 0.0,
        };

        Ok(Self { parameters, system })
    }
}

// =========================================================================================
// Shared build helpers
// =========================================================================================

/// Parameters (runtime) from the config's constants block
fn build_parameters(cfg: &ScenarioConfig) -> Parameters {
    let c_cfg = &cfg.constants;
    Parameters {
        c: c_cfg.c,
        G: c_cfg.G,
        time_scale: c_cfg.time_scale,
        max_dt: c_cfg.max_dt,
        seed: c_cfg.seed,
    }
}

fn check_observer(
    index: usize,
    oc: &ObserverConfig,
    expected: usize,
    parameters: &Parameters,
) -> Result<(), ScenarioError> {
    if oc.x.len() != expected {
        return Err(ScenarioError::ObserverDimension {
            index,
            expected,
            got: oc.x.len(),
        });
    }
    if oc.velocity.abs() >= parameters.c {
        return Err(ScenarioError::ObserverDomain {
            index,
            source: DomainError::SuperluminalSpeed {
                speed: oc.velocity,
                c: parameters.c,
            },
        });
    }
    Ok(())
}

fn check_source(index: usize, sc: &SourceConfig, expected: usize) -> Result<(), ScenarioError> {
    if sc.x.len() != expected {
        return Err(ScenarioError::SourceDimension {
            index,
            expected,
            got: sc.x.len(),
        });
    }
    if sc.mass <= 0.0 {
        return Err(ScenarioError::SourceDomain {
            index,
            source: DomainError::NonPositiveMass(sc.mass),
        });
    }
    Ok(())
}
