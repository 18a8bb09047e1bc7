//! Memoized sample table for the (3,2) trefoil-knot curve

use std::f64::consts::TAU;

/// Number of discrete samples covering one full revolution.
pub const RESOLUTION: usize = 420;

/// Angular distance between adjacent samples.
pub const STEP_SIZE: f64 = TAU / RESOLUTION as f64;

/// Table of 2D curve samples scaled by a radius fixed at construction.
///
/// Entries are computed on access until the owner marks the first full
/// revolution complete; after that the table is frozen and reads skip the
/// trig. Indices wrap modulo the resolution, so phase-offset reads that land
/// past the main fill pointer are still well-defined.
pub struct CurveCache {
    radius: f64,
    step_size: f64,
    samples: Vec<(f64, f64)>,
    ready: bool,
}

impl CurveCache {
    pub fn new(radius: f64, resolution: usize) -> Self {
        Self {
            radius,
            step_size: TAU / resolution as f64,
            samples: vec![(0.0, 0.0); resolution],
            ready: false,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Freeze the table. Called after one full revolution has visited every
    /// index; entries are treated as immutable from here on.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Curve sample at `step`, wrapped modulo the resolution.
    pub fn get(&mut self, step: usize) -> (f64, f64) {
        let idx = step % self.samples.len();
        if !self.ready {
            let t = idx as f64 * self.step_size;
            self.samples[idx] = (
                self.radius * (t.sin() + 2.0 * (2.0 * t).sin()),
                self.radius * (t.cos() - 2.0 * (2.0 * t).cos()),
            );
        }
        self.samples[idx]
    }

    /// Read a stored sample without computing it.
    pub fn sample(&self, step: usize) -> (f64, f64) {
        self.samples[step % self.samples.len()]
    }
}
