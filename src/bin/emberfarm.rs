use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "emberfarm", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the contribution calendar from GitHub and write all three SVGs.
    Build(BuildArgs),
    /// Render the SVGs from a local calendar JSON file.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Output directory.
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    #[command(flatten)]
    inputs: InputArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Calendar JSON: an array of weeks, each an array of {date, count}.
    #[arg(long)]
    calendar: PathBuf,

    /// Output directory.
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    #[command(flatten)]
    inputs: InputArgs,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Dragon PNG; a missing file falls back to the vector figure.
    #[arg(long, default_value = "assets/dragon.png")]
    dragon: PathBuf,

    /// Directory of icon SVGs, keyed by file stem.
    #[arg(long)]
    icons: Option<PathBuf>,

    /// Force a minimum canvas width in weeks (0 keeps the calendar's width).
    #[arg(long, default_value_t = 0)]
    min_weeks: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let token = std::env::var("GITHUB_TOKEN")
        .context("GITHUB_TOKEN is required to fetch contributions")?;
    let calendar = emberfarm::fetch_contributions_blocking(&token)?;
    compose_and_write(&calendar, &args.out, &args.inputs)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.calendar)
        .with_context(|| format!("read calendar '{}'", args.calendar.display()))?;
    let calendar: emberfarm::Calendar =
        serde_json::from_str(&source).context("parse calendar JSON")?;
    compose_and_write(&calendar, &args.out, &args.inputs)
}

fn compose_and_write(
    calendar: &emberfarm::Calendar,
    out_dir: &Path,
    inputs: &InputArgs,
) -> anyhow::Result<()> {
    let scene_cfg = emberfarm::SceneConfig {
        min_weeks: inputs.min_weeks,
        ..emberfarm::SceneConfig::default()
    };
    let panel_cfg = emberfarm::PanelConfig::default();

    let dragon = emberfarm::load_dragon(&inputs.dragon)?;
    if dragon.is_none() {
        tracing::info!("no dragon asset, using the vector figure");
    }
    let icons = match &inputs.icons {
        Some(dir) => emberfarm::load_icon_dir(dir)?,
        None => BTreeMap::new(),
    };

    let farm = emberfarm::render_farm(calendar, &scene_cfg, dragon.as_ref())?;
    let stats = emberfarm::render_stats_card(calendar, &scene_cfg)?;
    let grid = scene_cfg.grid(calendar.week_count());
    let stacks = emberfarm::render_stack_panel(
        &emberfarm::default_sections(),
        &icons,
        grid.width,
        &panel_cfg,
    )?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
    for (name, contents) in [
        ("farm.svg", &farm),
        ("stats.svg", &stats),
        ("stacks.svg", &stacks),
    ] {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}
