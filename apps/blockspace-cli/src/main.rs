use anyhow::Context;
use blockspace_author::{EditOutcome, Editor, resolve_target};
use blockspace_common::{BlockType, CameraPose, EditorConfig, Ray, VoxelCoord};
use blockspace_input::{Action, InputState, ModeKind, MoveDirection};
use blockspace_kernel::VoxelWorld;
use blockspace_motion::{CameraRig, ControlMode, EYE_HEIGHT};
use blockspace_render::{CubePicker, DebugTextRenderer, RenderView, Renderer, Scene};
use blockspace_tools::WorldInspector;
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockspace-cli", about = "Headless driver for the blockspace voxel editor")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override terrain.half_width from the config
    #[arg(long, global = true)]
    half_width: Option<i32>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, block table and effective configuration
    Info,
    /// Generate the terrain and summarize it
    Generate {
        /// Also dump the voxel listing
        #[arg(long)]
        dump: bool,
        /// Voxel lines in the dump
        #[arg(long, default_value = "32")]
        lines: usize,
    },
    /// Show the voxel at a coordinate of the generated terrain
    Inspect {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,
    },
    /// Cast a ray into the generated terrain, optionally editing the target
    Pick {
        /// Ray origin as x,y,z (defaults to the configured eye)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Option<Vec3>,
        /// Point the ray passes through (defaults to the configured target)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        toward: Option<Vec3>,
        /// Apply an edit to the target
        #[arg(long, value_enum)]
        edit: Option<EditKind>,
        /// Block id to place (1-5); ignored by remove
        #[arg(long, default_value = "1")]
        block: u8,
    },
    /// Drop a walker onto the terrain and simulate ticks
    Walk {
        #[arg(short, long, default_value = "120")]
        ticks: u32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        x: f32,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        z: f32,
        /// Facing in degrees (0 = +X, 90 = +Z)
        #[arg(long, default_value = "-90", allow_negative_numbers = true)]
        yaw: f32,
        #[arg(long)]
        forward: bool,
        #[arg(long)]
        backward: bool,
        #[arg(long)]
        left: bool,
        #[arg(long)]
        right: bool,
        /// Jump once, as soon as the walker is grounded
        #[arg(long)]
        jump: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EditKind {
    Remove,
    Place,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let num = |v: &str| v.parse::<f32>().map_err(|e| format!("'{v}': {e}"));
    Ok(Vec3::new(num(x)?, num(y)?, num(z)?))
}

/// Editor and action for a headless edit. Only placing checks the block id.
fn edit_request(kind: EditKind, block: u8) -> anyhow::Result<(Editor, Action)> {
    let mut editor = Editor::new();
    let action = match kind {
        EditKind::Remove => Action::Primary,
        EditKind::Place => {
            if !editor.select(block) {
                anyhow::bail!("block id {block} is not placeable (1-5)");
            }
            Action::Secondary
        }
    };
    Ok((editor, action))
}

fn generate(config: &EditorConfig) -> (VoxelWorld, Scene) {
    let mut world = VoxelWorld::new();
    let mut scene = Scene::new();
    blockspace_terrain::populate(&config.terrain, &mut world, &mut scene);
    (world, scene)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = EditorConfig::load(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;
    if let Some(hw) = cli.half_width {
        config.terrain.half_width = hw;
    }
    config.validate()?;

    match cli.command {
        Commands::Info => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            println!("blockspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("Blocks:");
            for block in BlockType::PLACEABLE {
                let color = block.color().map_or(0, |c| c.0);
                println!("  {}  {block:<7} #{color:06X}", block.id());
            }
            println!("Config:");
            print!("{}", serde_yaml::to_string(&config)?);
        }
        Commands::Generate { dump, lines } => {
            let (world, scene) = generate(&config);
            let summary = WorldInspector::summary(&world);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("{summary}");
            println!("Drawables: {}", scene.len());
            if dump {
                let pose = CameraPose::looking_at(config.view.eye, config.view.target);
                let renderer = DebugTextRenderer { max_lines: lines };
                print!(
                    "{}",
                    renderer.render(&world, &RenderView::from_pose(&pose, config.view.fov_degrees))
                );
            }
        }
        Commands::Inspect { x, y, z } => {
            let (world, _scene) = generate(&config);
            let coord = VoxelCoord::new(x, y, z);
            let info = WorldInspector::inspect_voxel(&world, coord);
            match (cli.json, info) {
                (true, info) => println!("{}", serde_json::to_string_pretty(&info)?),
                (false, Some(info)) => println!("{info}"),
                (false, None) => println!("Voxel {coord} Air"),
            }
        }
        Commands::Pick {
            origin,
            toward,
            edit,
            block,
        } => {
            let (mut world, mut scene) = generate(&config);
            let origin = origin.unwrap_or(config.view.eye);
            let ray = Ray::towards(origin, toward.unwrap_or(config.view.target));

            let Some(target) = resolve_target(&ray, &world, &CubePicker) else {
                if cli.json {
                    println!("{}", json!({ "target": null }));
                } else {
                    println!("No target");
                }
                return Ok(());
            };

            let outcome = match edit {
                None => None,
                Some(kind) => {
                    let (mut editor, action) = edit_request(kind, block)?;
                    // headless edits act as if walking with the pointer captured
                    let mut input = InputState::new();
                    input.set_mode(ModeKind::Walk);
                    input.set_captured(true);
                    editor.apply(
                        action,
                        input.interaction(),
                        &ray,
                        &mut world,
                        &mut scene,
                        &CubePicker,
                    )
                }
            };

            if cli.json {
                let outcome = outcome.map(|o| match o {
                    EditOutcome::Removed { coord, block } => {
                        json!({ "removed": coord, "block": block })
                    }
                    EditOutcome::Placed { coord, block } => {
                        json!({ "placed": coord, "block": block })
                    }
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "target": {
                            "hit": target.hit,
                            "block": world.block_at(target.hit),
                            "face": target.face,
                            "place": target.place,
                            "distance": target.distance,
                        },
                        "outcome": outcome,
                        "voxels": world.len(),
                    }))?
                );
                return Ok(());
            }

            let n = target.normal();
            println!(
                "Hit {} on face ({}, {}, {}) at distance {:.3}; place cell {}",
                target.hit, n.x, n.y, n.z, target.distance, target.place
            );
            match outcome {
                Some(EditOutcome::Removed { coord, block }) => println!("Removed {block} at {coord}"),
                Some(EditOutcome::Placed { coord, block }) => println!("Placed {block} at {coord}"),
                None => {}
            }
            println!("{}", WorldInspector::summary(&world));
        }
        Commands::Walk {
            ticks,
            x,
            z,
            yaw,
            forward,
            backward,
            left,
            right,
            jump,
        } => {
            let (world, _scene) = generate(&config);

            let mut input = InputState::new();
            let mut rig = CameraRig::new(config.motion, config.view);
            rig.toggle_mode(&mut input);
            input.set_captured(true);

            // face along `yaw` and drop in a block above the column top
            let column = VoxelCoord::from_position(Vec3::new(x, 0.0, z));
            let top = WorldInspector::surface_height(&world, column.x, column.z)
                .unwrap_or(config.terrain.ground_height);
            let start = Vec3::new(x, top as f32 + EYE_HEIGHT + 1.0, z);
            let facing = Vec3::new(yaw.to_radians().cos(), 0.0, yaw.to_radians().sin());
            rig.set_pose(CameraPose::looking_at(start, start + facing));

            for (direction, held) in [
                (MoveDirection::Forward, forward),
                (MoveDirection::Backward, backward),
                (MoveDirection::Left, left),
                (MoveDirection::Right, right),
            ] {
                input.set_move(direction, held);
            }

            let mut jumped = !jump;
            for _ in 0..ticks {
                rig.tick(&world, &input);
                if !jumped && rig.jump(&input) {
                    jumped = true;
                    tracing::info!(y = rig.pose().position.y, "jumped");
                }
            }

            let (grounded, vv) = match rig.mode() {
                ControlMode::Walk(w) => (w.grounded(), w.vertical_velocity()),
                ControlMode::Orbit(_) => (false, 0.0),
            };
            let p = rig.pose().position;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "start": start.to_array(),
                        "position": p.to_array(),
                        "grounded": grounded,
                        "vertical_velocity": vv,
                        "ticks": ticks,
                    }))?
                );
            } else {
                println!(
                    "After {ticks} ticks: pos=({:.3}, {:.3}, {:.3}) grounded={grounded} vv={vv:.4}",
                    p.x, p.y, p.z
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_negative_and_spaces() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn cli_parses_pick_with_edit() {
        let cli = Cli::try_parse_from([
            "blockspace-cli",
            "pick",
            "--origin",
            "0,5,0",
            "--toward",
            "0,-1,0",
            "--edit",
            "place",
            "--block",
            "3",
        ])
        .unwrap();
        let Commands::Pick {
            origin, edit, block, ..
        } = cli.command
        else {
            panic!("expected pick");
        };
        assert_eq!(origin, Some(Vec3::new(0.0, 5.0, 0.0)));
        assert!(matches!(edit, Some(EditKind::Place)));
        assert_eq!(block, 3);
    }

    #[test]
    fn remove_ignores_block_id() {
        let (_, action) = edit_request(EditKind::Remove, 7).unwrap();
        assert_eq!(action, Action::Primary);
    }

    #[test]
    fn place_validates_block_id() {
        assert!(edit_request(EditKind::Place, 7).is_err());
        assert!(edit_request(EditKind::Place, 0).is_err());
        let (editor, action) = edit_request(EditKind::Place, 3).unwrap();
        assert_eq!(action, Action::Secondary);
        assert_eq!(editor.current_block(), BlockType::Stone);
    }

    #[test]
    fn cli_parses_negative_inspect_coords() {
        let cli = Cli::try_parse_from(["blockspace-cli", "inspect", "-15", "-1", "-15"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect {
                x: -15,
                y: -1,
                z: -15
            }
        ));
    }
}
