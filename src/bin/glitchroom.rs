use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt};

use glitchroom::{
    AssumeAvailable, ColorTheme, EffectVariantSelector, EngineConfig, FsProbe, GlitchEngine,
    ImageRef, ManualClock, PerspectiveRoom, Point, Recipe, RecipeId, Rect, SourceProbe,
};

#[derive(Parser, Debug)]
#[command(name = "glitchroom", version, about = "Inspect glitch compositions and the typographic room")]
struct Cli {
    /// Increase log verbosity (repeatable); logs go to stderr.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one composition and print it as JSON.
    Compose(ComposeArgs),
    /// Simulate the animation loop and print a JSON summary.
    Frames(FramesArgs),
    /// Drive the perspective room with synthetic input and print its scene.
    Room(RoomArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Image reference (URL, data URI or path).
    #[arg(long)]
    image: String,

    /// Recipe to build; drawn at random from the configured set when absent.
    #[arg(long)]
    recipe: Option<RecipeId>,

    /// Color theme (overrides the config file).
    #[arg(long)]
    theme: Option<ColorTheme>,

    /// RNG seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[arg(long)]
    image: String,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Regenerate counter presses applied before simulating.
    #[arg(long, default_value_t = 0)]
    regenerate: u64,

    #[arg(long)]
    theme: Option<ColorTheme>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RoomArgs {
    /// Wall text, split on whitespace.
    #[arg(long)]
    text: Option<String>,

    /// Image shown at the center of the room.
    #[arg(long, default_value = "/photo.png")]
    image: String,

    /// Pointer position in container pixels, `X,Y`.
    #[arg(long, value_parser = parse_pair)]
    pointer: Option<(f64, f64)>,

    /// Container size in pixels, `W,H`.
    #[arg(long, value_parser = parse_pair, default_value = "800,600")]
    size: (f64, f64),

    /// Wheel deltas applied in order (repeatable).
    #[arg(long, allow_hyphen_values = true)]
    wheel: Vec<f64>,

    /// Treat the pointer as a touch-primary device.
    #[arg(long, default_value_t = false)]
    touch: bool,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'A,B', got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{v}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("glitchroom={level}")));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Room(args) => cmd_room(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let image = ImageRef::non_empty(args.image).context("--image must not be blank")?;

    let recipe_id = match args.recipe {
        Some(r) => r,
        None => EffectVariantSelector::new(config.recipes.iter().copied())
            .initialize(&mut rng)
            .context("no recipes enabled")?,
    };
    let probe: Box<dyn SourceProbe> = match &config.asset_root {
        Some(root) => Box::new(FsProbe::new(root.clone())),
        None => Box::new(AssumeAvailable),
    };
    let comp = glitchroom::compose(
        &image,
        Recipe::new(recipe_id, config.theme),
        config.theme,
        &mut rng,
        probe.as_ref(),
    );
    println!("{}", serde_json::to_string_pretty(&comp)?);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps.is_finite() && args.fps > 0.0, "--fps must be > 0");
    let mut config = load_config(args.config.as_ref())?;
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    let image = ImageRef::non_empty(args.image).context("--image must not be blank")?;

    let mut engine = GlitchEngine::new(config, ManualClock::new(0.0));
    engine.set_image(Some(image));
    engine.mount();
    for counter in 1..=args.regenerate {
        engine.set_regenerate(counter);
    }

    let dt = 1.0 / args.fps;
    for i in 1..=args.frames {
        let target = f64::from(i) * dt;
        while let Some(deadline) = engine.next_deadline().filter(|d| *d <= target) {
            engine.clock().set(deadline);
            engine.fire_timers();
        }
        engine.clock().set(target);
        engine.frame();
    }

    let summary = serde_json::json!({
        "recipe": engine.current_recipe(),
        "rebuilds": engine.rebuilds(),
        "layers": engine.composition().map_or(0, |c| c.len()),
        "stats": engine.stats(),
        "snapshot": engine.snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_room(args: RoomArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let image = ImageRef::non_empty(args.image).context("--image must not be blank")?;
    let mut room = PerspectiveRoom::new(config.room, image, args.text.as_deref());

    let (w, h) = args.size;
    let bounds = Rect::new(0.0, 0.0, w, h);
    if let Some((x, y)) = args.pointer {
        room.pointer_moved(Point::new(x, y), bounds, args.touch);
    }
    for delta in args.wheel {
        room.wheel(delta);
    }

    let out = serde_json::json!({
        "state": room.state(),
        "scene": room.scene(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
