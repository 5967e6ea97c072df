use crate::engine::{Body, Sample};
use glam::DVec2;

/// Append one sample to `body` using the trapezoidal update.
///
/// The acceleration is held at its start-of-step value: `v' = v + a*dt`,
/// then the position moves by the mean of `v` and `v'`. Static bodies keep
/// their position and report zero velocity.
pub fn step(body: &mut Body, dt: f64, accel: DVec2) {
    let prev = *body.latest();
    let t = prev.t + dt;

    let next = if body.is_static {
        Sample::new(t, prev.pos, DVec2::ZERO)
    } else {
        let vel = prev.vel + accel * dt;
        let mid = (prev.vel + vel) / 2.0;
        Sample::new(t, prev.pos + mid * dt, vel)
    };

    body.push(next);
}

/// Step every body with its accumulated acceleration, looked up by slot
pub fn advance(bodies: &mut [Body], dt: f64, accels: &[DVec2]) {
    for body in bodies.iter_mut() {
        let accel = accels[body.slot()];
        step(body, dt, accel);
    }
}
