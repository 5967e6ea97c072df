//! Pairwise Newtonian gravity
//!
//! Every unordered pair is visited once, in ascending slot order, and its
//! contribution is added into a slot-indexed accumulator. The visiting order
//! is fixed so repeated runs sum in exactly the same order.

use crate::engine::Body;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

/// Two bodies sit on the same point, so no direction or finite force exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coincidence {
    pub a: usize, // slot of the first body
    pub b: usize, // slot of the second body
}

/// Bearing of the displacement `(dx, dy)` in `[0, 2π)`, resolved by quadrant.
///
/// On the axes: straight up is π/2, straight down 3π/2, and a zero vector
/// resolves to 0.
pub fn bearing(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 {
        if dy == 0.0 {
            0.0
        } else if dy > 0.0 {
            FRAC_PI_2
        } else {
            3.0 * FRAC_PI_2
        }
    } else if dx > 0.0 {
        let base = (dy / dx).atan();
        if dy >= 0.0 {
            base
        } else {
            TAU + base
        }
    } else {
        PI + (dy / dx).atan()
    }
}

/// Direct O(n²) gravity between every pair of bodies
#[derive(Debug, Clone, Copy)]
pub struct ForceField {
    pub g: f64,
}

impl Default for ForceField {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
        }
    }
}

impl ForceField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net acceleration of every body from the latest samples.
    /// `out[slot]` receives the total for the body in that slot.
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [DVec2]) -> Result<(), Coincidence> {
        for a in out.iter_mut() {
            *a = DVec2::ZERO;
        }

        let n = bodies.len();
        for i in 0..n {
            let bi = &bodies[i];
            let xi = bi.latest().pos;

            for bj in &bodies[(i + 1)..] {
                let xj = bj.latest().pos;

                let dx = xj.x - xi.x;
                let dy = xj.y - xi.y;
                if dx == 0.0 && dy == 0.0 {
                    return Err(Coincidence {
                        a: bi.slot(),
                        b: bj.slot(),
                    });
                }

                let dist = dx.hypot(dy);
                let theta = bearing(dx, dy);
                let coeff = self.g / (dist * dist);
                let x_coeff = theta.cos() * coeff;
                let y_coeff = theta.sin() * coeff;

                // i is pulled toward j, j toward i
                out[bi.slot()] += DVec2::new(x_coeff * bj.mass, y_coeff * bj.mass);
                out[bj.slot()] += DVec2::new(-x_coeff * bi.mass, -y_coeff * bi.mass);
            }
        }

        Ok(())
    }

    /// Allocating form of [`ForceField::accumulate_accels`]
    pub fn compute(&self, bodies: &[Body]) -> Result<Vec<DVec2>, Coincidence> {
        let mut out = vec![DVec2::ZERO; bodies.len()];
        self.accumulate_accels(bodies, &mut out)?;
        Ok(out)
    }
}
