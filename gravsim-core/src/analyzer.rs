//! Static validation of domain and campaign inputs
//!
//! Everything that would make a run meaningless is caught here, before any
//! body is built: bad ids, non-positive masses, crossed walls, a degenerate
//! time grid. All findings are collected so the caller sees them at once.

use crate::clock::{tick_count, MAX_TICKS};
use crate::config::{BodySpec, CampaignSpec, DomainSpec, Parameters, WallBounds};
use crate::diagnostics::{Diagnostic, Diagnostics};
use std::collections::HashMap;

/// Analyze a single domain against the parameters it will run with
pub fn analyze_domain(domain: &DomainSpec, shared: Option<&Parameters>) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if domain.id.trim().is_empty() {
        diagnostics.push(Diagnostic::error("domain id must not be empty", None));
    }

    match domain.resolve_parameters(shared) {
        Some(params) => diagnostics.extend(check_parameters(&params)),
        None => diagnostics.push(Diagnostic::error(
            "no time parameters: set `parameters` on the domain or the campaign",
            Some(format!("domain {}", domain.id)),
        )),
    }

    diagnostics.extend(check_walls(&domain.walls));

    if domain.bodies.is_empty() {
        diagnostics.push(Diagnostic::warning(
            "domain has no bodies",
            Some(format!("domain {}", domain.id)),
        ));
    }

    // Unique ids
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for (idx, body) in domain.bodies.iter().enumerate() {
        if body.id.trim().is_empty() {
            diagnostics.push(Diagnostic::error(
                format!("body #{} has an empty id", idx),
                None,
            ));
        } else if ids.insert(body.id.as_str(), idx).is_some() {
            diagnostics.push(Diagnostic::error(
                format!("duplicate body id '{}'", body.id),
                Some(body.id.clone()),
            ));
        }

        diagnostics.extend(check_body(body, &domain.walls));
    }

    // Coincident starting points would divide by zero on the first tick
    for (i, a) in domain.bodies.iter().enumerate() {
        for b in &domain.bodies[(i + 1)..] {
            if a.position == b.position {
                diagnostics.push(Diagnostic::error(
                    format!(
                        "bodies '{}' and '{}' start at the same point ({}, {})",
                        a.id, b.id, a.position[0], a.position[1]
                    ),
                    Some(a.id.clone()),
                ));
            }
        }
    }

    diagnostics
}

/// Analyze every domain of a campaign
pub fn analyze_campaign(campaign: &CampaignSpec) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if campaign.domains.is_empty() {
        diagnostics.push(Diagnostic::warning("campaign has no domains", None));
    }

    let mut ids: HashMap<&str, usize> = HashMap::new();
    for (idx, domain) in campaign.domains.iter().enumerate() {
        if ids.insert(domain.id.as_str(), idx).is_some() {
            diagnostics.push(Diagnostic::error(
                format!("duplicate domain id '{}'", domain.id),
                Some(format!("domain {}", domain.id)),
            ));
        }
        diagnostics.extend(analyze_domain(domain, campaign.parameters.as_ref()));
    }

    diagnostics
}

fn check_parameters(params: &Parameters) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    if !params.dt.is_finite() || params.dt <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("dt must be positive and finite, got {}", params.dt),
            Some("parameters.dt".to_string()),
        ));
    }
    if !params.t_end.is_finite() || params.t_end <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("t_end must be positive and finite, got {}", params.t_end),
            Some("parameters.t_end".to_string()),
        ));
    }
    let dt_ok = params.dt.is_finite() && params.dt > 0.0;
    let t_end_ok = params.t_end.is_finite() && params.t_end > 0.0;
    if dt_ok && t_end_ok && tick_count(params).is_none() {
        diagnostics.push(Diagnostic::error(
            format!(
                "t_end / dt = {} needs more than {} ticks",
                params.t_end / params.dt,
                MAX_TICKS
            ),
            Some("parameters.dt".to_string()),
        ));
    }
    if params.fps == 0 {
        diagnostics.push(Diagnostic::error(
            "fps must be at least 1",
            Some("parameters.fps".to_string()),
        ));
    }

    diagnostics
}

fn check_walls(walls: &WallBounds) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let axes = [("x", walls.x_min, walls.x_max), ("y", walls.y_min, walls.y_max)];
    for (axis, lower, upper) in axes {
        for bound in [lower, upper].into_iter().flatten() {
            if !bound.is_finite() {
                diagnostics.push(Diagnostic::error(
                    format!("{} wall must be finite, got {}", axis, bound),
                    Some(format!("walls.{}", axis)),
                ));
            }
        }

        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi {
                diagnostics.push(Diagnostic::error(
                    format!("lower {} wall {} is above upper wall {}", axis, lo, hi),
                    Some(format!("walls.{}", axis)),
                ));
            } else if lo == hi {
                diagnostics.push(Diagnostic::warning(
                    format!("{} walls coincide at {}", axis, lo),
                    Some(format!("walls.{}", axis)),
                ));
            }
        }
    }

    diagnostics
}

fn check_body(body: &BodySpec, walls: &WallBounds) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let subject = Some(body.id.clone());

    if !body.mass.is_finite() {
        diagnostics.push(Diagnostic::error(
            format!("mass must be finite, got {}", body.mass),
            subject.clone(),
        ));
    } else if body.mass <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("mass must be positive, got {}", body.mass),
            subject.clone(),
        ));
    }

    if body.position.iter().any(|c| !c.is_finite()) {
        diagnostics.push(Diagnostic::error("position must be finite", subject.clone()));
    }
    if body.velocity.iter().any(|c| !c.is_finite()) {
        diagnostics.push(Diagnostic::error("velocity must be finite", subject.clone()));
    }

    let [x, y] = body.position;
    let outside = walls.x_min.is_some_and(|w| x < w)
        || walls.x_max.is_some_and(|w| x > w)
        || walls.y_min.is_some_and(|w| y < w)
        || walls.y_max.is_some_and(|w| y > w);
    if outside {
        diagnostics.push(Diagnostic::warning(
            format!("starts outside the walls at ({}, {})", x, y),
            subject,
        ));
    }

    diagnostics
}
