//! Wall reflection
//!
//! A body found past a wall has the matching velocity component pointed back
//! into the domain. The correction rewrites the newest sample, i.e. the state
//! the next integration step starts from.

use crate::config::WallBounds;
use crate::engine::Body;

/// Velocity selection at a lower wall: `max(v, -v)`
pub fn reflect_lower(v: f64) -> f64 {
    v.max(-v)
}

/// Velocity selection at an upper wall: `min(v, -v)`
pub fn reflect_upper(v: f64) -> f64 {
    v.min(-v)
}

/// The four optional walls of a domain
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryPolicy {
    pub walls: WallBounds,
}

impl BoundaryPolicy {
    pub fn new(walls: WallBounds) -> Self {
        Self { walls }
    }

    /// Correct the newest sample of every mobile body. Static bodies never
    /// move, so their velocity is left at zero.
    /// Returns how many velocity components were rewritten.
    pub fn apply(&self, bodies: &mut [Body]) -> usize {
        if self.walls.is_open() {
            return 0;
        }

        let mut corrected = 0;
        for body in bodies.iter_mut().filter(|b| !b.is_static) {
            let sample = body.latest_mut();

            if let Some(x_min) = self.walls.x_min {
                if sample.pos.x < x_min {
                    sample.vel.x = reflect_lower(sample.vel.x);
                    corrected += 1;
                }
            }
            if let Some(x_max) = self.walls.x_max {
                if sample.pos.x > x_max {
                    sample.vel.x = reflect_upper(sample.vel.x);
                    corrected += 1;
                }
            }
            if let Some(y_min) = self.walls.y_min {
                if sample.pos.y < y_min {
                    sample.vel.y = reflect_lower(sample.vel.y);
                    corrected += 1;
                }
            }
            if let Some(y_max) = self.walls.y_max {
                if sample.pos.y > y_max {
                    sample.vel.y = reflect_upper(sample.vel.y);
                    corrected += 1;
                }
            }
        }

        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodySpec;
    use glam::DVec2;

    fn body_at(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body::from_spec(&BodySpec::new("b", 1.0, [x, y], [vx, vy]), 0)
    }

    #[test]
    fn selection_points_inward() {
        assert_eq!(reflect_lower(-2.0), 2.0);
        assert_eq!(reflect_lower(2.0), 2.0);
        assert_eq!(reflect_upper(2.0), -2.0);
        assert_eq!(reflect_upper(-2.0), -2.0);
    }

    #[test]
    fn outward_velocity_is_flipped() {
        let policy = BoundaryPolicy::new(WallBounds {
            x_min: Some(0.0),
            y_max: Some(10.0),
            ..WallBounds::default()
        });
        let mut bodies = vec![body_at(-1.0, 11.0, -3.0, 4.0)];

        let corrected = policy.apply(&mut bodies);

        assert_eq!(corrected, 2);
        assert_eq!(bodies[0].latest().vel, DVec2::new(3.0, -4.0));
    }

    #[test]
    fn inside_walls_nothing_changes() {
        let policy = BoundaryPolicy::new(WallBounds {
            x_min: Some(-5.0),
            x_max: Some(5.0),
            y_min: Some(-5.0),
            y_max: Some(5.0),
        });
        let mut bodies = vec![body_at(4.9, -4.9, 7.0, -7.0)];

        assert_eq!(policy.apply(&mut bodies), 0);
        assert_eq!(bodies[0].latest().vel, DVec2::new(7.0, -7.0));
    }

    #[test]
    fn sitting_on_a_wall_is_not_a_crossing() {
        let policy = BoundaryPolicy::new(WallBounds {
            x_min: Some(0.0),
            ..WallBounds::default()
        });
        let mut bodies = vec![body_at(0.0, 0.0, -1.0, 0.0)];

        assert_eq!(policy.apply(&mut bodies), 0);
        assert_eq!(bodies[0].latest().vel.x, -1.0);
    }
}
