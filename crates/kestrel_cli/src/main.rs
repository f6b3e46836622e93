//! Kestrel CLI
//!
//! Inspect scene files and replay picking sessions without a window.

use anyhow::Result;
use clap::{Parser, Subcommand};
use kestrel_3d::picking::{FrameOutcome, Selection};
use kestrel_3d::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use script::InputScript;

#[derive(Parser)]
#[command(name = "kestrel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kestrel scene-graph picking tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Scene file (TOML); the built-in demo layout is used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script through the demo scene
    Run {
        /// Input script (TOML); defaults to one click at the viewport center
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Idle frames after the click when no script is given
        #[arg(short, long, default_value = "120")]
        frames: u32,
    },

    /// Pick once at a pixel position on the first frame
    Pick {
        /// Cursor x in pixels from the left edge
        #[arg(short, long)]
        x: f32,

        /// Cursor y in pixels from the top edge
        #[arg(short, long)]
        y: f32,

        /// Also print the picking ray
        #[arg(long)]
        ray: bool,
    },

    /// Show the scene layout
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { script, frames } => cmd_run(&config, script.as_deref(), frames),
        Commands::Pick { x, y, ray } => cmd_pick(&config, x, y, ray),
        Commands::Info => cmd_info(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            Ok(SceneConfig::load(path)?)
        }
        None => Ok(SceneConfig::default()),
    }
}

fn cmd_run(config: &SceneConfig, script: Option<&Path>, frames: u32) -> Result<()> {
    let mut scene = DemoScene::new(config)?;

    let script = match script {
        Some(path) => InputScript::load(path)?,
        None => {
            let (cx, cy) = scene.viewport().center();
            InputScript::single_click(Vec2::new(cx, cy), frames)
        }
    };

    info!("Replaying {} frames", script.frame_count());

    let mut elapsed = 0.0f32;
    for (frame, (dt, input)) in script.snapshots().into_iter().enumerate() {
        let outcome = scene.step(dt, &input)?;
        elapsed += dt;
        report_frame(frame, &outcome);
    }

    println!("Elapsed: {:.3}s", elapsed);
    println!(
        "Group yaw: {:.2} deg, camera at {}",
        scene.group_yaw(),
        fmt_vec3(scene.controller().position)
    );
    print_selection(scene.selected());
    print_draw_list(&scene);

    Ok(())
}

fn cmd_pick(config: &SceneConfig, x: f32, y: f32, show_ray: bool) -> Result<()> {
    let mut scene = DemoScene::new(config)?;
    let input = InputSnapshot {
        pick_pressed: true,
        ray_debug_pressed: show_ray,
        ..InputSnapshot::focused_at(Vec2::new(x, y))
    };

    let outcome = scene.step(0.0, &input)?;

    if let Some((from, to)) = outcome.debug_segment {
        println!("Ray: {} -> {}", fmt_vec3(from), fmt_vec3(to));
    }
    match outcome.selection {
        Selection::Picked(hit) => println!(
            "Picked sphere {} at distance {:.4}",
            hit.index, hit.distance
        ),
        _ => println!("Nothing under ({x}, {y})"),
    }

    Ok(())
}

fn cmd_info(config: &SceneConfig) -> Result<()> {
    let scene = DemoScene::new(config)?;
    let viewport = scene.viewport();
    let camera = scene.camera();

    println!("Kestrel scene");
    println!("=============");
    println!();
    println!("Viewport: {}x{}", viewport.width, viewport.height);
    println!(
        "Camera: fov {:.1} deg, near {}, far {}, at {}",
        camera.fov.to_degrees(),
        camera.near,
        camera.far,
        fmt_vec3(scene.controller().position)
    );
    println!(
        "Picking: {:?} formula, radius {}",
        config.picking.formula, config.picking.sphere_radius
    );
    println!("Group spin: {} deg/s", config.group_spin);
    println!();
    println!("Nodes ({}):", scene.tree().len());
    print_tree(scene.tree());
    println!();
    print_draw_list(&scene);

    Ok(())
}

fn report_frame(frame: usize, outcome: &FrameOutcome) {
    match outcome.selection {
        Selection::Picked(hit) => info!(
            frame,
            index = hit.index,
            distance = hit.distance,
            "sphere selected"
        ),
        Selection::Cleared => info!(frame, "selection cleared"),
        Selection::Unchanged => {}
    }
    if let Some((from, to)) = outcome.debug_segment {
        info!(frame, "debug ray {} -> {}", fmt_vec3(from), fmt_vec3(to));
    }
    debug!(frame, "frame done");
}

fn print_tree(tree: &SceneTree) {
    let mut stack: Vec<(NodeId, usize)> = tree.roots().map(|id| (id, 0)).collect();
    stack.reverse();

    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        println!(
            "  {}{} {}",
            "  ".repeat(depth),
            node.name().unwrap_or("<unnamed>"),
            fmt_vec3(node.world_position())
        );
        stack.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
    }
}

fn print_selection(selected: Option<usize>) {
    match selected {
        Some(index) => println!("Selected: sphere {index}"),
        None => println!("Selected: none"),
    }
}

fn print_draw_list(scene: &DemoScene) {
    println!("Draw list:");
    for (i, item) in scene.draw_list().iter().enumerate() {
        let [r, g, b] = item.color;
        println!(
            "  sphere {} at {} color ({:.2}, {:.2}, {:.2})",
            i,
            fmt_vec3(item.world_matrix.translation_part()),
            r,
            g,
            b
        );
    }
}

fn fmt_vec3(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}
