use crate::config::BodySpec;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One recorded state of a body
///
/// Serialized flat as `{t, x, y, vx, vy}`, the same columns as the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "SampleRow", from = "SampleRow")]
pub struct Sample {
    pub t: f64,
    pub pos: DVec2,
    pub vel: DVec2,
}

#[derive(Serialize, Deserialize)]
struct SampleRow {
    t: f64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl From<Sample> for SampleRow {
    fn from(s: Sample) -> Self {
        Self {
            t: s.t,
            x: s.pos.x,
            y: s.pos.y,
            vx: s.vel.x,
            vy: s.vel.y,
        }
    }
}

impl From<SampleRow> for Sample {
    fn from(row: SampleRow) -> Self {
        Self::new(row.t, DVec2::new(row.x, row.y), DVec2::new(row.vx, row.vy))
    }
}

impl Sample {
    pub fn new(t: f64, pos: DVec2, vel: DVec2) -> Self {
        Self { t, pos, vel }
    }
}

/// A point mass and its full history
///
/// The trajectory is seeded with the initial state and only ever grows. The
/// one in-place edit allowed is the wall correction of the newest sample's
/// velocity, which happens before that sample is integrated from.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: String,
    pub color: String,
    pub is_static: bool,
    pub mass: f64,
    slot: usize,
    trajectory: Vec<Sample>,
}

impl Body {
    /// Build a body at `t = 0` from its spec. Static bodies start at rest
    /// whatever initial velocity they were given.
    pub fn from_spec(spec: &BodySpec, slot: usize) -> Self {
        let pos = DVec2::from(spec.position);
        let vel = if spec.is_static {
            DVec2::ZERO
        } else {
            DVec2::from(spec.velocity)
        };

        Self {
            id: spec.id.clone(),
            color: spec.color.clone(),
            is_static: spec.is_static,
            mass: spec.mass,
            slot,
            trajectory: vec![Sample::new(0.0, pos, vel)],
        }
    }

    /// Index of this body's entry in per-tick accumulators
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn trajectory(&self) -> &[Sample] {
        &self.trajectory
    }

    pub fn initial(&self) -> &Sample {
        &self.trajectory[0]
    }

    /// Most recent sample; the trajectory is never empty
    pub fn latest(&self) -> &Sample {
        &self.trajectory[self.trajectory.len() - 1]
    }

    pub(crate) fn latest_mut(&mut self) -> &mut Sample {
        let last = self.trajectory.len() - 1;
        &mut self.trajectory[last]
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.trajectory.push(sample);
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Body {}
