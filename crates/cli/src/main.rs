use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod report;
mod scene;

#[derive(Parser)]
#[command(name = "specrel-cli")]
#[command(about = "Spacetime diagram geometry: grids, moving objects, reports")]
struct Cmd {
    /// JSON settings file with optional `geom` and `grid` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a (optionally transformed) spacetime grid and print the recording
    Grid {
        #[arg(long, allow_negative_numbers = true)]
        tmin: f64,
        #[arg(long, allow_negative_numbers = true)]
        tmax: f64,
        #[arg(long, allow_negative_numbers = true)]
        xmin: f64,
        #[arg(long, allow_negative_numbers = true)]
        xmax: f64,
        /// Lorentz transform velocity, as a fraction of c
        #[arg(long, allow_negative_numbers = true)]
        velocity: Option<f64>,
    },
    /// Print a moving object's positions at one time
    Object {
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
        #[arg(long, default_value_t = 0.0)]
        length: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        velocity: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start_time: f64,
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
    },
    /// Print library version and build revision
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let settings = scene::load_settings(cmd.config.as_deref())?;
    match cmd.action {
        Action::Grid {
            tmin,
            tmax,
            xmin,
            xmax,
            velocity,
        } => {
            tracing::info!(tmin, tmax, xmin, xmax, velocity = ?velocity, "grid");
            let rec = scene::grid_recording(&settings, (tmin, tmax), (xmin, xmax), velocity)?;
            println!("{}", serde_json::to_string_pretty(&rec)?);
        }
        Action::Object {
            left,
            length,
            velocity,
            start_time,
            at,
        } => {
            tracing::info!(left, length, velocity, start_time, at, "object");
            let report = scene::object_report(left, length, velocity, start_time, at)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Action::Report => {
            println!("{}", serde_json::to_string_pretty(&report::build_report())?);
        }
    }
    Ok(())
}
