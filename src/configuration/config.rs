//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! time-dilation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]    – global engine options (2D vs 3D viewer)
//! - [`ConstantsConfig`] – unit system and numerical settings
//! - [`ObserverConfig`]  – initial state for each observer clock
//! - [`SourceConfig`]    – each gravitating body
//! - [`ScenarioConfig`]  – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: false        # false -> 2D, true -> 3D
//!
//! constants:
//!   c: 1.0                  # speed of light in scenario units
//!   G: 1.0                  # gravitational constant
//!   time_scale: 1.0         # simulated seconds per real second
//!   max_dt: 0.1             # frame dt ceiling (tab-suspend protection)
//!   seed: 42.0              # deterministic seed for added planets
//!
//! observers:
//!   - x: [ 0.0, 0.0 ]
//!     velocity: 0.0
//!   - x: [ 5.0, 0.0 ]
//!     velocity: 0.8
//!
//! sources:
//!   - x: [ -3.0, 2.0 ]
//!     mass: 1.0e6
//!     radius: 2.0
//! ```
//!
//! The engine maps this configuration into its internal runtime scenario
//! representation; building validates the physical bounds.

use serde::Deserialize;

/// High-level engine configuration
/// Controls which viewer consumes the simulation core
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub dimension: bool, // `false` - 2D viewer, `true` - 3D viewer
}

/// Unit system and numerical settings for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ConstantsConfig {
    pub c: f64,          // speed of light in scenario units
    pub G: f64,          // gravitational constant
    pub time_scale: f64, // simulated seconds per real second
    pub max_dt: f64,     // ceiling on a single raw frame dt
    pub seed: f64,       // deterministic seed to make planet placement reproducable
}

/// Configuration for a single observer's initial state
#[derive(Deserialize, Debug)]
pub struct ObserverConfig {
    pub x: Vec<f64>,   // Initial position vector `x` in scenario units
    pub velocity: f64, // Initial scalar speed, must satisfy |velocity| < c
}

/// Configuration for a single gravitating body
#[derive(Deserialize, Debug)]
pub struct SourceConfig {
    pub x: Vec<f64>, // Position vector in scenario units
    pub mass: f64,   // Mass of the body, must be positive
    pub radius: f64, // Radius of the body, used for visualization scaling only
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration (viewer dimension)
    pub constants: ConstantsConfig, // Unit system and numerical settings
    pub observers: Vec<ObserverConfig>, // Observer clocks present at start
    pub sources: Vec<SourceConfig>, // Gravitating bodies present at start
}
