//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime constants, fixed at startup:
//! - unit system (`c`, `G`),
//! - tick-to-simulated-time scale factor,
//! - frame-glitch ceiling for dt and deterministic seed
//!
//! Different scenarios use different unit systems (c = 1 normalized vs
//! c = 300 pixel units), so none of these values are hard-coded elsewhere

#[derive(Debug, Clone)]
pub struct Parameters {
    pub c: f64, // speed of light in scenario units
    pub G: f64, // gravitational constant
    pub time_scale: f64, // simulated seconds per real second
    pub max_dt: f64, // ceiling on a single raw frame dt
    pub seed: f64, // deterministic seed for user-added planets
}
