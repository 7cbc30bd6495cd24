//! Core state types for the time-dilation simulation.
//!
//! Defines 2D and 3D observer/source/system structs:
//! - `Observer` / `GravitySource` / `System`  using `NVec2` (2d)
//! - `Observer3` / `GravitySource3` / `System3` using `NVec3` (3d)
//!
//! Each system holds its observers, the append-only set of gravity sources,
//! and the accumulated coordinate time `t`.

use nalgebra::{Vector2, Vector3};

use crate::simulation::clock::ObserverClock;

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Observer {
    pub x: NVec2, // position
    pub clock: ObserverClock, // proper-time accumulator + current velocity
}

#[derive(Debug, Clone)]
pub struct GravitySource {
    pub x: NVec2, // position
    pub m: f64, // mass
    pub radius: f64, // radius (visual/collision only, not dilation math)
}

#[derive(Debug, Clone)]
pub struct System {
    pub observers: Vec<Observer>, // 2d collection of observers
    pub sources: Vec<GravitySource>, // 2d gravity sources, append-only
    pub t: f64, // coordinate time
}

impl System {
    /// Register another gravity source. Sources live for the whole
    /// session; there is no removal.
    pub fn add_source(&mut self, source: GravitySource) {
        self.sources.push(source);
    }
}

// =========================================================================================
// 2d stuff above
// 3d stuff below
// =========================================================================================

#[derive(Debug, Clone)]
pub struct Observer3 {
    pub x: NVec3, // 3d position
    pub clock: ObserverClock, // proper-time accumulator + current velocity
}

#[derive(Debug, Clone)]
pub struct GravitySource3 {
    pub x: NVec3, // 3d position
    pub m: f64, // mass
    pub radius: f64, // radius (visual/collision only)
}

#[derive(Debug, Clone)]
pub struct System3 {
    pub observers: Vec<Observer3>, // 3d collection of observers
    pub sources: Vec<GravitySource3>, // 3d gravity sources, append-only
    pub t: f64, // coordinate time
}

impl System3 {
    /// Register another gravity source. Sources live for the whole
    /// session; there is no removal.
    pub fn add_source(&mut self, source: GravitySource3) {
        self.sources.push(source);
    }
}
