//! Input model for domains and campaigns
//!
//! These are thin, `serde`-friendly descriptions of what a host hands to the
//! engine. The engine never reads files itself; a loader deserializes one of
//! these from whatever format it likes and passes it to
//! [`crate::runtime::build_domain`] or [`crate::runtime::Campaign::from_spec`].
//!
//! # YAML shape
//!
//! ```yaml
//! parameters:          # shared time grid for every domain
//!   dt: 1.0
//!   t_end: 2000.0
//!   fps: 30
//! domains:
//!   - id: orbit
//!     walls:
//!       x_min: -20.0
//!       x_max: 20.0
//!     bodies:
//!       - id: sun
//!         color: orange
//!         static: true
//!         mass: 5.0e8
//!         position: [0.0, 0.0]
//!       - id: probe
//!         mass: 1.0e3
//!         position: [10.0, 0.0]
//!         velocity: [0.0, 0.058]
//! ```
//!
//! A domain may carry its own `parameters`, which then replace the shared
//! ones for that domain only.

use serde::{Deserialize, Deserializer, Serialize};

/// Time grid and playback settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub dt: f64,    // time increment between grid points
    pub t_end: f64, // final simulated time
    #[serde(default = "default_fps")]
    pub fps: u32, // frame rate handed to the visualizer, unused by the engine
}

impl Parameters {
    pub fn new(dt: f64, t_end: f64) -> Self {
        Self {
            dt,
            t_end,
            fps: default_fps(),
        }
    }
}

fn default_fps() -> u32 {
    30
}

/// Optional wall coordinates; an absent bound leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

impl WallBounds {
    pub fn is_open(&self) -> bool {
        self.x_min.is_none() && self.x_max.is_none() && self.y_min.is_none() && self.y_max.is_none()
    }
}

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    pub mass: f64,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
}

impl BodySpec {
    pub fn new(id: impl Into<String>, mass: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self {
            id: id.into(),
            color: default_color(),
            is_static: false,
            mass,
            position,
            velocity,
        }
    }

    /// Same body, pinned in place
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

fn default_color() -> String {
    "black".to_string()
}

/// One self-contained simulation: bodies, walls and (optionally) its own grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(default, skip_serializing_if = "WallBounds::is_open")]
    pub walls: WallBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
}

impl DomainSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            walls: WallBounds::default(),
            parameters: None,
            bodies: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_walls(mut self, walls: WallBounds) -> Self {
        self.walls = walls;
        self
    }

    pub fn with_body(mut self, body: BodySpec) -> Self {
        self.bodies.push(body);
        self
    }

    /// The domain's own parameters win over the shared ones
    pub fn resolve_parameters(&self, shared: Option<&Parameters>) -> Option<Parameters> {
        self.parameters.or_else(|| shared.copied())
    }

    /// A ready-to-run starter domain: a probe on a near-circular orbit around
    /// a pinned heavy body, with walls on the x axis
    pub fn template() -> Self {
        DomainSpec::new("orbit")
            .with_parameters(Parameters::new(1.0, 2000.0))
            .with_walls(WallBounds {
                x_min: Some(-20.0),
                x_max: Some(20.0),
                ..WallBounds::default()
            })
            .with_body(
                BodySpec::new("sun", 5.0e8, [0.0, 0.0], [0.0, 0.0])
                    .pinned()
                    .with_color("orange"),
            )
            .with_body(BodySpec::new("probe", 1.0e3, [10.0, 0.0], [0.0, 0.058]).with_color("blue"))
    }
}

/// Several independent domains run one after another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
    pub domains: Vec<DomainSpec>,
}

impl CampaignSpec {
    pub fn new(parameters: Option<Parameters>, domains: Vec<DomainSpec>) -> Self {
        Self {
            parameters,
            domains,
        }
    }
}

impl From<DomainSpec> for CampaignSpec {
    fn from(domain: DomainSpec) -> Self {
        Self {
            parameters: None,
            domains: vec![domain],
        }
    }
}

/// Ids may be written as numbers or strings in input files
fn id_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_parameters_override_shared() {
        let shared = Parameters::new(2.0, 250.0);
        let own = Parameters::new(0.5, 10.0);

        let plain = DomainSpec::new("a");
        assert_eq!(plain.resolve_parameters(Some(&shared)), Some(shared));
        assert_eq!(plain.resolve_parameters(None), None);

        let custom = DomainSpec::new("b").with_parameters(own);
        assert_eq!(custom.resolve_parameters(Some(&shared)), Some(own));
    }

    #[test]
    fn body_defaults_fill_optional_fields() {
        let json = r#"{"id": 7, "mass": 2.0, "position": [1.0, 2.0]}"#;
        let body: BodySpec = serde_json::from_str(json).expect("body should parse");

        assert_eq!(body.id, "7");
        assert_eq!(body.color, "black");
        assert!(!body.is_static);
        assert_eq!(body.velocity, [0.0, 0.0]);
    }

    #[test]
    fn static_flag_uses_plain_name() {
        let json = r#"{"id": "sun", "static": true, "mass": 1.0, "position": [0.0, 0.0]}"#;
        let body: BodySpec = serde_json::from_str(json).expect("body should parse");
        assert!(body.is_static);
    }

    #[test]
    fn template_is_complete() {
        let template = DomainSpec::template();
        assert_eq!(template.bodies.len(), 2);
        assert!(template.parameters.is_some());
        assert!(template.bodies.iter().any(|b| b.is_static));
    }
}
