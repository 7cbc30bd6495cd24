pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Observer, GravitySource, System, NVec2, Observer3, GravitySource3, System3, NVec3};
pub use simulation::clock::ObserverClock;
pub use simulation::dilation::{kinematic_factor, gravitational_factor, combined_factor};
pub use simulation::stepper::{tick, tick_3d, TickReport, TickFault, DilationReadout};
pub use simulation::params::Parameters;
pub use simulation::error::DomainError;
pub use simulation::scenario::{Scenario, Scenario3D, ScenarioError};

pub use configuration::config::{EngineConfig, ConstantsConfig, ObserverConfig, SourceConfig, ScenarioConfig};

pub use visualization::{tdsim_vis2d::run_2d, tdsim_vis3d::run_3d};

pub use benchmark::benchmark::{bench_dilation, bench_tick_curve};
