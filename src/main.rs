//! vproj: project world-space points and lines through a camera
//!
//! Usage:
//!   vproj point X Y Z                     # Project a point with the default camera
//!   vproj --camera cam.ron line X0 Y0 Z0 X1 Y1 Z1
//!   vproj default-camera --width 640 --height 480 > cam.ron
//!
//! Projected coordinates are printed as `x y`, one point per line. Geometry
//! that is clipped away prints as `NaN NaN`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use vector_projection::config::{camera_config_to_string, load_camera, CameraConfig};
use vector_projection::projection::{Camera, Line3, Point2, Point3, HEIGHT, WIDTH};

#[derive(Parser)]
#[command(name = "vproj", version)]
#[command(about = "Project world-space geometry onto a camera's screen")]
struct Cli {
    /// Camera configuration file (RON); the default camera is used if omitted
    #[arg(long, global = true)]
    camera: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProjectOpts {
    /// Skip depth and viewport clipping
    #[arg(long)]
    no_clip: bool,
    /// Keep fractional pixel coordinates
    #[arg(long)]
    no_round: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single world-space point
    #[command(allow_negative_numbers = true)]
    Point {
        x: f32,
        y: f32,
        z: f32,
        #[command(flatten)]
        opts: ProjectOpts,
    },
    /// Project a world-space line segment
    #[command(allow_negative_numbers = true)]
    Line {
        x0: f32,
        y0: f32,
        z0: f32,
        x1: f32,
        y1: f32,
        z1: f32,
        #[command(flatten)]
        opts: ProjectOpts,
    },
    /// Print the default camera configuration as RON
    DefaultCamera {
        #[arg(long, default_value_t = WIDTH)]
        width: u32,
        #[arg(long, default_value_t = HEIGHT)]
        height: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Point { x, y, z, opts } => {
            let camera = camera_for(cli.camera.as_deref())?;
            let p = camera.project_point(Point3::new(x, y, z), !opts.no_clip, !opts.no_round);
            print_point(p);
        }
        Commands::Line { x0, y0, z0, x1, y1, z1, opts } => {
            let camera = camera_for(cli.camera.as_deref())?;
            let line = Line3::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1));
            let l = camera.project_line(line, !opts.no_clip, !opts.no_round);
            print_point(l.p0);
            print_point(l.p1);
        }
        Commands::DefaultCamera { width, height } => {
            let config = CameraConfig::with_display(width, height);
            println!("{}", camera_config_to_string(&config)?);
        }
    }

    Ok(())
}

/// Load the camera file if one was given
fn camera_for(path: Option<&Path>) -> Result<Camera> {
    match path {
        Some(path) => load_camera(path)
            .with_context(|| format!("Failed to load camera from {}", path.display())),
        None => {
            tracing::debug!("no camera file given, using default camera");
            Ok(Camera::new())
        }
    }
}

fn print_point(p: Point2) {
    println!("{} {}", p.x, p.y);
}
