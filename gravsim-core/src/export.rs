//! In-memory views of a finished run for exporters and visualizers
//!
//! Nothing here touches the filesystem. A host serializes these values (or
//! walks them directly) and decides where they go.

use crate::config::WallBounds;
use crate::domain::DomainRun;
use crate::engine::{Body, Sample};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Chronological samples of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTable {
    pub body_id: String,
    pub color: String,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub mass: f64,
    pub samples: Vec<Sample>,
}

impl TrajectoryTable {
    pub fn from_body(body: &Body) -> Self {
        Self {
            body_id: body.id.clone(),
            color: body.color.clone(),
            is_static: body.is_static,
            mass: body.mass,
            samples: body.trajectory().to_vec(),
        }
    }

    /// `t,x,y,dxdt,dydt` header followed by one row per sample
    pub fn to_csv_string(&self) -> String {
        let mut out = String::from("t,x,y,dxdt,dydt\n");
        for s in &self.samples {
            // writing into a String cannot fail
            let _ = writeln!(out, "{},{},{},{},{}", s.t, s.pos.x, s.pos.y, s.vel.x, s.vel.y);
        }
        out
    }
}

/// One table per body, in body order
pub fn trajectory_tables(run: &DomainRun) -> Vec<TrajectoryTable> {
    run.bodies().iter().map(TrajectoryTable::from_body).collect()
}

/// Extent of every recorded position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DisplayBounds {
    /// Min/max over all samples of all bodies, `None` without bodies
    pub fn from_bodies(bodies: &[Body]) -> Option<Self> {
        Self::from_positions(bodies.iter().flat_map(|b| b.trajectory().iter().map(|s| s.pos)))
    }

    /// Same as [`DisplayBounds::from_bodies`] for exported tables
    pub fn from_tables(tables: &[TrajectoryTable]) -> Option<Self> {
        Self::from_positions(tables.iter().flat_map(|t| t.samples.iter().map(|s| s.pos)))
    }

    fn from_positions(mut positions: impl Iterator<Item = DVec2>) -> Option<Self> {
        let first = positions.next()?;

        let (lo, hi) = positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self {
            x_min: lo.x,
            x_max: hi.x,
            y_min: lo.y,
            y_max: hi.y,
        })
    }

    /// View box with half of each axis' span added on both sides
    pub fn padded(&self) -> Self {
        let half_x = (self.x_max - self.x_min) / 2.0;
        let half_y = (self.y_max - self.y_min) / 2.0;
        Self {
            x_min: self.x_min - half_x,
            x_max: self.x_max + half_x,
            y_min: self.y_min - half_y,
            y_max: self.y_max + half_y,
        }
    }
}

/// State of one body inside a frame, serialized flat as
/// `{id, color, t, x, y, vx, vy}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameBody {
    pub id: String,
    pub color: String,
    #[serde(flatten)]
    pub state: Sample,
}

/// Every body at one sample index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub index: usize,
    pub t: f64,
    pub bodies: Vec<FrameBody>,
}

/// Everything a renderer needs to animate a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub domain: String,
    pub walls: WallBounds,
    pub fps: u32,
    pub bounds: Option<DisplayBounds>,
    pub frames: Vec<Frame>,
}

impl Scene {
    pub fn from_run(run: &DomainRun) -> Self {
        Self {
            domain: run.id().to_string(),
            walls: *run.walls(),
            fps: run.parameters().fps,
            bounds: DisplayBounds::from_bodies(run.bodies()),
            frames: frames(run.bodies()),
        }
    }

    /// Rebuild a scene from previously exported tables, without the run
    pub fn from_tables(domain: &str, walls: WallBounds, fps: u32, tables: &[TrajectoryTable]) -> Self {
        let tracks: Vec<Track<'_>> = tables
            .iter()
            .map(|t| Track {
                id: &t.body_id,
                color: &t.color,
                samples: &t.samples,
            })
            .collect();

        Self {
            domain: domain.to_string(),
            walls,
            fps,
            bounds: DisplayBounds::from_tables(tables),
            frames: frames_of(&tracks),
        }
    }

    /// Same frames played back at another rate; nothing is re-simulated
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Playback length at the scene's frame rate
    pub fn duration_secs(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / self.fps as f64
    }
}

struct Track<'a> {
    id: &'a str,
    color: &'a str,
    samples: &'a [Sample],
}

/// One frame per sample index. Trajectories grow in lockstep, so index `k`
/// is the same simulated time for every body.
pub fn frames(bodies: &[Body]) -> Vec<Frame> {
    let tracks: Vec<Track<'_>> = bodies
        .iter()
        .map(|b| Track {
            id: &b.id,
            color: &b.color,
            samples: b.trajectory(),
        })
        .collect();
    frames_of(&tracks)
}

fn frames_of(tracks: &[Track<'_>]) -> Vec<Frame> {
    let n = tracks.iter().map(|t| t.samples.len()).min().unwrap_or(0);

    (0..n)
        .map(|index| Frame {
            index,
            t: tracks[0].samples[index].t,
            bodies: tracks
                .iter()
                .map(|track| FrameBody {
                    id: track.id.to_string(),
                    color: track.color.to_string(),
                    state: track.samples[index],
                })
                .collect(),
        })
        .collect()
}
