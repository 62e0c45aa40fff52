#![deny(unsafe_code)]
//! CLI binary for rendering backdrop scenes offline.
//!
//! Subcommands:
//! - `render <scene>`: run N frames, write one PNG
//! - `frames <scene>`: drive a mounted background headlessly, one PNG per frame
//! - `list`: print available scenes and palettes
//! - `schema <scene>`: print a scene's parameters

mod error;
mod sink;

use backdrop_core::{Palette, Scene, Seed, Srgb, Surface};
use backdrop_host::{Background, ManualContainer, ManualDisplay};
use backdrop_scenes::SceneKind;
use clap::{Parser, Subcommand};
use error::CliError;
use sink::PngSink;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "backdrop", about = "Animated neural-network backgrounds, rendered offline")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scene for N frames and write the last one as a PNG.
    Render {
        /// Scene name (e.g. "contact"). Optional with --seed-file.
        scene: Option<String>,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Replay a seed file written by `--json` output; overrides the
        /// scene, size, params, seed and frame count.
        #[arg(long)]
        seed_file: Option<PathBuf>,

        /// Flatten onto this color (e.g. "#080818") instead of keeping alpha.
        #[arg(short, long)]
        backdrop: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Scene parameters as a JSON string, merged over the preset.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Mount a scene on a headless host and write every presented frame.
    Frames {
        /// Scene name.
        scene: String,

        #[arg(short = 'W', long, default_value_t = 640)]
        width: usize,

        #[arg(short = 'H', long, default_value_t = 360)]
        height: usize,

        /// Number of host refreshes to run.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Resize the container to WIDTHxHEIGHT partway through.
        #[arg(long)]
        resize: Option<String>,

        /// Refresh after which the resize happens (default: halfway).
        #[arg(long)]
        resize_after: Option<usize>,

        #[arg(short, long)]
        backdrop: Option<String>,

        /// Output directory (must exist).
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available scenes and palettes.
    List,
    /// Print a scene's effective parameters and their schema.
    Schema {
        /// Scene name.
        scene: String,

        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

fn parse_backdrop(raw: Option<&str>) -> Result<Option<Srgb>, CliError> {
    raw.map(Srgb::from_hex).transpose().map_err(CliError::from)
}

fn parse_size(raw: &str) -> Result<(usize, usize), CliError> {
    let bad = || CliError::Input(format!("invalid size '{raw}', expected WIDTHxHEIGHT"));
    let (w, h) = raw.split_once(['x', 'X']).ok_or_else(bad)?;
    let w = w.trim().parse().map_err(|_| bad())?;
    let h = h.trim().parse().map_err(|_| bad())?;
    Ok((w, h))
}

fn read_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn print(json: bool, info: serde_json::Value, human: impl FnOnce()) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        human();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let scenes = SceneKind::list_scenes();
            let palettes = Palette::list_names();
            print(
                cli.json,
                serde_json::json!({"scenes": scenes, "palettes": palettes}),
                || {
                    println!("Scenes:");
                    for name in scenes {
                        println!("  {name}");
                    }
                    println!("Palettes:");
                    println!("  {}", palettes.join(", "));
                },
            )?;
        }
        Command::Schema { scene, params } => {
            let params = parse_params(&params)?;
            let built = SceneKind::from_name(&scene, 1, 1, 0, &params)?;
            let effective = built.params();
            let schema = built.param_schema();
            print(
                cli.json,
                serde_json::json!({"scene": scene, "params": effective, "schema": schema}),
                || {
                    println!("{scene}:");
                    if let Some(entries) = schema.as_object() {
                        for (key, spec) in entries {
                            println!(
                                "  {key:<16} {:<8} = {:<12} {}",
                                spec["type"].as_str().unwrap_or("?"),
                                effective[key].to_string(),
                                spec["description"].as_str().unwrap_or(""),
                            );
                        }
                    }
                },
            )?;
        }
        Command::Render {
            scene,
            width,
            height,
            frames,
            seed,
            seed_file,
            backdrop,
            output,
            params,
        } => {
            let recipe = match seed_file {
                Some(path) => read_seed(&path)?,
                None => {
                    let scene = scene.ok_or_else(|| {
                        CliError::Input("a scene name or --seed-file is required".into())
                    })?;
                    Seed {
                        params: parse_params(&params)?,
                        frames,
                        ..Seed::new(&scene, width, height, seed)
                    }
                }
            };
            recipe.validate()?;
            let backdrop = parse_backdrop(backdrop.as_deref())?;

            let mut built = SceneKind::from_name(
                &recipe.scene,
                recipe.width,
                recipe.height,
                recipe.seed,
                &recipe.params,
            )?;
            let mut surface = Surface::new(recipe.width, recipe.height)?;
            for _ in 0..recipe.frames {
                built.frame(&mut surface);
            }
            backdrop_scenes::snapshot::write_png(&surface, backdrop, &output)?;

            print(
                cli.json,
                serde_json::json!({
                    "seed": recipe,
                    "output": output.display().to_string(),
                }),
                || {
                    eprintln!(
                        "rendered {} ({}x{}, {} frames, seed {}) -> {}",
                        recipe.scene,
                        recipe.width,
                        recipe.height,
                        recipe.frames,
                        recipe.seed,
                        output.display()
                    );
                },
            )?;
        }
        Command::Frames {
            scene,
            width,
            height,
            frames,
            seed,
            resize,
            resize_after,
            backdrop,
            dir,
            params,
        } => {
            let params = parse_params(&params)?;
            let backdrop = parse_backdrop(backdrop.as_deref())?;
            let resize = resize.as_deref().map(parse_size).transpose()?;
            Seed::new(&scene, width, height, seed).validate()?;
            // Surface unknown names before mounting, which would only log them.
            SceneKind::from_name(&scene, 1, 1, seed, &params)?;

            let display = Rc::new(ManualDisplay::new());
            let container = Rc::new(ManualContainer::new(Some((width, height))));
            let sink = PngSink::new(&dir, backdrop);
            let name = scene.clone();
            let mut background = Background::new(
                display.clone(),
                move |w, h| SceneKind::from_name(&name, w, h, seed, &params),
                sink.clone(),
            );
            if !background.mount(container.clone()) {
                return Err(CliError::Input(format!("could not mount '{scene}'")));
            }

            let switch_at = resize_after.unwrap_or(frames / 2);
            for refresh in 0..frames {
                if refresh == switch_at {
                    if let Some((w, h)) = resize {
                        log::info!("resizing container to {w}x{h}");
                        container.resize(w, h);
                    }
                }
                display.pump();
                if !background.is_running() {
                    break;
                }
            }
            background.unmount();
            if let Some(failure) = sink.take_failure() {
                return Err(failure.into());
            }

            print(
                cli.json,
                serde_json::json!({
                    "scene": scene,
                    "width": width,
                    "height": height,
                    "seed": seed,
                    "frames": sink.written(),
                    "dir": dir.display().to_string(),
                }),
                || eprintln!("wrote {} frames of {scene} -> {}", sink.written(), dir.display()),
            )?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
