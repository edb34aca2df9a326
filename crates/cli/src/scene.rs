//! Scenes the CLI can build, plus settings loading.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use specrel::prelude::*;
use std::fs;
use std::path::Path;

/// Settings file layout; every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geom: GeomCfg,
    pub grid: GridCfg,
}

/// Defaults when `path` is `None`, otherwise the parsed JSON file.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

fn check_velocity(velocity: f64) -> Result<()> {
    if !(velocity.abs() < 1.0) {
        bail!("velocity must satisfy |v| < 1, got {velocity}");
    }
    Ok(())
}

/// Grid over the window, optionally transformed, drawn into a recorder.
pub fn grid_recording(
    settings: &Settings,
    tlim: (f64, f64),
    xlim: (f64, f64),
    velocity: Option<f64>,
) -> Result<Recorder> {
    if tlim.0 > tlim.1 || xlim.0 > xlim.1 {
        bail!("limits must be ordered low to high");
    }
    let mut grid = stgrid(tlim, xlim, &settings.grid);
    if let Some(v) = velocity {
        check_velocity(v)?;
        grid.lorentz_transform(v, settings.geom.origin);
    }
    let mut rec = Recorder::new();
    grid.draw(
        &mut rec,
        (Some(tlim.0), Some(tlim.1)),
        (Some(xlim.0), Some(xlim.1)),
        &settings.geom.draw_options,
    );
    tracing::info!(segments = rec.segments.len(), "grid drawn");
    Ok(rec)
}

/// Positions of a moving object at one instant.
///
/// Any finite velocity is accepted, faster than light included; nothing is
/// boosted here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectReport {
    pub time: f64,
    pub left: f64,
    pub right: f64,
    pub center: f64,
    pub length: f64,
    pub velocity: f64,
}

pub fn object_report(
    left: f64,
    length: f64,
    velocity: f64,
    start_time: f64,
    at: f64,
) -> Result<ObjectReport> {
    let obj = MovingObject::new(left, length, velocity, start_time);
    Ok(ObjectReport {
        time: at,
        left: obj.left_pos(at)?,
        right: obj.right_pos(at)?,
        center: obj.center_pos(at)?,
        length: obj.length()?,
        velocity: obj.velocity(),
    })
}
