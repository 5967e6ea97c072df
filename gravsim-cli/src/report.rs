use anyhow::{Context, Result};
use gravsim_core::{trajectory_tables, Campaign, RunState, Scene};
use std::fmt::Write;

/// Final state of every body, one block per domain
pub fn summary(campaign: &Campaign) -> String {
    let mut out = String::new();

    for run in campaign.domains() {
        let s = run.summary();
        let state = match s.state {
            RunState::NotStarted => "not started",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Aborted => "aborted",
        };
        let _ = writeln!(out, "domain {}: {}, {} ticks, t = {}", s.domain, state, s.ticks, s.t);
        let _ = writeln!(
            out,
            "  {:<12} {:>6} {:>8} {:>14} {:>14} {:>12} {:>12}",
            "id", "static", "samples", "x", "y", "vx", "vy"
        );
        for b in &s.bodies {
            let _ = writeln!(
                out,
                "  {:<12} {:>6} {:>8} {:>14.6e} {:>14.6e} {:>12.4e} {:>12.4e}",
                b.id, b.is_static, b.samples, b.last.pos.x, b.last.pos.y, b.last.vel.x, b.last.vel.y
            );
        }
    }

    out
}

/// Every domain as a renderer-ready scene, pretty JSON
pub fn scenes_json(campaign: &Campaign) -> Result<String> {
    let scenes: Vec<Scene> = campaign.domains().iter().map(Scene::from_run).collect();
    scenes_to_json(&scenes)
}

pub fn scenes_to_json(scenes: &[Scene]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(scenes).context("serializing scenes")?;
    json.push('\n');
    Ok(json)
}

/// Per-body CSV tables, each preceded by a `# domain <id> body <id>` line
pub fn tables_csv(campaign: &Campaign) -> String {
    let mut out = String::new();

    for run in campaign.domains() {
        for table in trajectory_tables(run) {
            let _ = writeln!(out, "# domain {} body {}", run.id(), table.body_id);
            out.push_str(&table.to_csv_string());
        }
    }

    out
}
