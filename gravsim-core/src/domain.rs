use crate::analyzer::analyze_domain;
use crate::boundary::BoundaryPolicy;
use crate::clock::{RunState, TimeGrid};
use crate::config::{DomainSpec, Parameters, WallBounds};
use crate::diagnostics::Diagnostics;
use crate::engine::{Body, Sample};
use crate::error::EngineError;
use crate::forces::ForceField;
use crate::integrator;
use glam::DVec2;
use tracing::{error, info, trace, warn};

/// One self-contained simulation: bodies, walls and the time grid they run on
#[derive(Debug, Clone)]
pub struct DomainRun {
    id: String,
    parameters: Parameters,
    grid: TimeGrid,
    bodies: Vec<Body>,
    forces: ForceField,
    boundary: BoundaryPolicy,
    state: RunState,
    ticks_completed: usize,
    // slot-indexed acceleration scratch, reused every tick
    accels: Vec<DVec2>,
}

/// Final state of one body after a run
#[derive(Debug, Clone, PartialEq)]
pub struct BodySummary {
    pub id: String,
    pub is_static: bool,
    pub samples: usize,
    pub last: Sample,
}

/// Console-friendly overview of a run
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSummary {
    pub domain: String,
    pub state: RunState,
    pub ticks: usize,
    pub t: f64,
    pub bodies: Vec<BodySummary>,
}

impl DomainRun {
    /// Validate `spec` and build the run. `shared` is the campaign-wide time
    /// grid, used when the domain has none of its own.
    ///
    /// Warnings are logged; any error rejects the whole domain.
    pub fn new(spec: &DomainSpec, shared: Option<&Parameters>) -> Result<Self, EngineError> {
        let diagnostics = analyze_domain(spec, shared);
        for warning in diagnostics.warnings() {
            warn!(domain = %spec.id, "{}", warning);
        }
        if diagnostics.has_errors() {
            return Err(EngineError::InvalidConfig(diagnostics));
        }

        // analyze_domain guarantees both of these exist
        let (parameters, grid) = match spec
            .resolve_parameters(shared)
            .and_then(|p| TimeGrid::new(&p).map(|grid| (p, grid)))
        {
            Some(resolved) => resolved,
            None => return Err(EngineError::InvalidConfig(Diagnostics::new())),
        };

        let bodies: Vec<Body> = spec
            .bodies
            .iter()
            .enumerate()
            .map(|(slot, body_spec)| Body::from_spec(body_spec, slot))
            .collect();

        Ok(Self {
            id: spec.id.clone(),
            parameters,
            grid,
            accels: vec![DVec2::ZERO; bodies.len()],
            bodies,
            forces: ForceField::default(),
            boundary: BoundaryPolicy::new(spec.walls),
            state: RunState::NotStarted,
            ticks_completed: 0,
        })
    }

    /// Swap the force model, e.g. a different gravitational constant for
    /// scaled-down test systems. Only allowed before the run starts.
    pub fn with_force_field(mut self, forces: ForceField) -> Self {
        if self.state == RunState::NotStarted {
            self.forces = forces;
        }
        self
    }

    /// Run every tick of the time grid.
    ///
    /// Each tick evaluates gravity on the newest samples, applies the wall
    /// correction to those same samples, then appends one integrated sample
    /// per body. On failure the run is left `Aborted` with trajectories ending
    /// at the last completed tick.
    pub fn begin(&mut self) -> Result<(), EngineError> {
        if self.state != RunState::NotStarted {
            return Err(EngineError::AlreadyStarted {
                domain: self.id.clone(),
            });
        }

        self.state = RunState::Running;
        info!(
            domain = %self.id,
            bodies = self.bodies.len(),
            ticks = self.grid.ticks(),
            "starting run"
        );

        let intervals: Vec<f64> = self.grid.intervals().collect();
        for dt in intervals {
            if let Err(e) = self.tick(dt) {
                self.state = RunState::Aborted;
                error!(domain = %self.id, tick = self.ticks_completed + 1, "run aborted: {}", e);
                return Err(e);
            }
        }

        self.state = RunState::Completed;
        info!(
            domain = %self.id,
            ticks = self.ticks_completed,
            t = self.grid.t_end(),
            "run completed"
        );
        Ok(())
    }

    fn tick(&mut self, dt: f64) -> Result<(), EngineError> {
        if let Err(c) = self.forces.accumulate_accels(&self.bodies, &mut self.accels) {
            let a = &self.bodies[c.a];
            return Err(EngineError::Singularity {
                domain: self.id.clone(),
                a: a.id.clone(),
                b: self.bodies[c.b].id.clone(),
                t: a.latest().t,
            });
        }

        let corrected = self.boundary.apply(&mut self.bodies);
        integrator::advance(&mut self.bodies, dt, &self.accels);

        self.ticks_completed += 1;
        trace!(domain = %self.id, tick = self.ticks_completed, dt, corrected, "tick");
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn walls(&self) -> &WallBounds {
        &self.boundary.walls
    }

    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn ticks_completed(&self) -> usize {
        self.ticks_completed
    }

    pub fn summary(&self) -> DomainSummary {
        let bodies = self
            .bodies
            .iter()
            .map(|b| BodySummary {
                id: b.id.clone(),
                is_static: b.is_static,
                samples: b.len(),
                last: *b.latest(),
            })
            .collect();

        DomainSummary {
            domain: self.id.clone(),
            state: self.state,
            ticks: self.ticks_completed,
            t: self.grid.points()[self.ticks_completed],
            bodies,
        }
    }
}
