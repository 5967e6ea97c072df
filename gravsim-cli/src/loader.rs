//! Reads domain and campaign files for the engine
//!
//! A file holds either a campaign (top-level `domains` list, optional shared
//! `parameters`) or a single domain, which is wrapped into a one-domain
//! campaign. YAML and JSON are told apart by extension. Exported scenes are
//! read back for retiming.

use anyhow::{bail, Context, Result};
use gravsim_core::{CampaignSpec, DomainSpec, Scene};
use std::fs;
use std::path::Path;

pub fn load_campaign(path: &Path) -> Result<CampaignSpec> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let spec = match extension.as_deref() {
        Some("yaml") | Some("yml") => from_yaml(&text),
        Some("json") => from_json(&text),
        _ => bail!("{}: expected a .yaml, .yml or .json file", path.display()),
    };

    spec.with_context(|| format!("parsing {}", path.display()))
}

/// Scenes written by `run --format json`
pub fn load_scenes(path: &Path) -> Result<Vec<Scene>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing scenes from {}", path.display()))
}

fn from_yaml(text: &str) -> Result<CampaignSpec> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if value.get("domains").is_some() {
        Ok(serde_yaml::from_value(value)?)
    } else {
        Ok(serde_yaml::from_value::<DomainSpec>(value)?.into())
    }
}

fn from_json(text: &str) -> Result<CampaignSpec> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("domains").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(serde_json::from_value::<DomainSpec>(value)?.into())
    }
}
