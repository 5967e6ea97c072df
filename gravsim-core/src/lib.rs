pub mod analyzer;
pub mod boundary;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod forces;
pub mod integrator;
pub mod runtime;

pub use analyzer::{analyze_campaign, analyze_domain};
pub use boundary::BoundaryPolicy;
pub use clock::{RunState, TimeGrid, MAX_TICKS};
pub use config::{BodySpec, CampaignSpec, DomainSpec, Parameters, WallBounds};
pub use diagnostics::{format_error_chain, Diagnostic, DiagnosticSeverity, Diagnostics};
pub use domain::{BodySummary, DomainRun, DomainSummary};
pub use engine::{Body, Sample};
pub use error::EngineError;
pub use export::{trajectory_tables, DisplayBounds, Frame, FrameBody, Scene, TrajectoryTable};
pub use forces::{bearing, ForceField, GRAVITATIONAL_CONSTANT};
pub use runtime::{build_domain, run_campaign, run_domain, Campaign};
