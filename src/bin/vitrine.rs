use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use vitrine::{
    InfiniteGrid, InputEvent, JsonLinesSink, MotionConfig, Rect, Stage, View, Viewport,
    VirtualScroll,
};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate the About page scroller and print frames as JSON lines.
    Scroll(ScrollArgs),
    /// Simulate the infinite work grid and print frames as JSON lines.
    Grid(GridArgs),
    /// Classify the background brightness of an image.
    Brightness(BrightnessArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Motion config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<MotionConfig> {
        match &self.config {
            Some(path) => Ok(MotionConfig::load(path)?),
            None => Ok(MotionConfig::default()),
        }
    }
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Measured content height in pixels.
    #[arg(long)]
    content_height: f64,

    /// Viewport as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_viewport)]
    viewport: Viewport,

    /// Wheel delta applied before the first frame.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    wheel: f64,

    /// Height of each stacked content block.
    #[arg(long, default_value_t = 300.0)]
    item_height: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,
}

#[derive(Parser, Debug)]
struct GridArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Content list JSON (array of works).
    #[arg(long)]
    content: PathBuf,

    /// Viewport as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_viewport)]
    viewport: Viewport,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Seed for per-item parallax eases.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct BrightnessArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Image file to sample.
    #[arg(long)]
    image: PathBuf,
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    Viewport::parse(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scroll(args) => cmd_scroll(args),
        Command::Grid(args) => cmd_grid(args),
        Command::Brightness(args) => cmd_brightness(args),
    }
}

/// Upper bound on stacked items generated for `scroll`.
const MAX_SCROLL_ITEMS: usize = 100_000;

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    anyhow::ensure!(
        args.item_height > 0.0 && args.item_height.is_finite(),
        "--item-height must be a positive number"
    );
    anyhow::ensure!(
        args.content_height.is_finite(),
        "--content-height must be a finite number"
    );
    let count = (args.content_height.max(0.0) / args.item_height).ceil();
    anyhow::ensure!(
        count <= MAX_SCROLL_ITEMS as f64,
        "--content-height yields {count} items, more than {MAX_SCROLL_ITEMS}"
    );
    let count = count as usize;
    let items = (0..count)
        .map(|i| {
            let top = i as f64 * args.item_height;
            let bottom = (top + args.item_height).min(args.content_height);
            Rect::new(0.0, top, args.viewport.width, bottom)
        })
        .collect();

    let scroll = VirtualScroll::new(&cfg, args.viewport, args.content_height, items);
    let wheel = InputEvent::Wheel {
        delta_x: 0.0,
        delta_y: args.wheel,
    };
    simulate(scroll, &[wheel], args.frames)
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let mut cfg = args.config.load()?;
    if args.seed.is_some() {
        cfg.grid.seed = args.seed;
    }
    let json = std::fs::read_to_string(&args.content)
        .with_context(|| format!("read content list '{}'", args.content.display()))?;
    let content = vitrine::content_from_json(&json)?;

    let grid = InfiniteGrid::new(&cfg, content, args.viewport);
    simulate(grid, &[], args.frames)
}

fn cmd_brightness(args: BrightnessArgs) -> anyhow::Result<()> {
    let cfg = args.config.load()?;
    let brightness = match std::fs::read(&args.image) {
        Ok(bytes) => vitrine::classify(&bytes, &cfg.brightness),
        Err(err) => {
            tracing::warn!(
                path = %args.image.display(),
                error = %err,
                "could not read image; assuming dark"
            );
            vitrine::Brightness::FALLBACK
        }
    };

    let mut out = std::io::stdout().lock();
    serde_json::to_writer(&mut out, &brightness).context("write brightness")?;
    writeln!(out).context("write brightness")?;
    Ok(())
}

/// Mount `view`, feed `events` before the first frame and print `frames` frames to stdout.
fn simulate<V: View + 'static>(
    view: V,
    events: &[InputEvent],
    frames: u64,
) -> anyhow::Result<()> {
    let mut stage = Stage::new();
    let _mounted = stage.mount(view);
    for event in events {
        stage.dispatch(event);
    }

    let mut sink = JsonLinesSink::new(BufWriter::new(std::io::stdout().lock()));
    for _ in 0..frames {
        stage.run_frame(&mut sink)?;
    }
    sink.into_inner()?;
    Ok(())
}
