use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "spritegraph", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a motion path through anchors and print the samples as JSON.
    Path(PathArgs),
    /// Render a scene description to numbered PNG frames.
    Render(RenderArgs),
    /// Encode a directory of frames into a video (requires `ffmpeg` on PATH).
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Anchor point as `X,Y` in pixels; repeat for each anchor.
    #[arg(long = "anchor", value_parser = parse_anchor)]
    anchors: Vec<(i64, i64)>,

    /// Frames per second.
    #[arg(long, default_value_t = 24)]
    fps: u32,

    /// Clip length in seconds.
    #[arg(long, default_value_t = 5)]
    seconds: u32,

    /// Background to draw anchors and samples on; anchors outside it are ignored.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Where to save the annotated background.
    #[arg(long, requires = "background")]
    debug_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Scene description JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Output directory for frames.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Directory holding the frames.
    #[arg(long)]
    in_dir: PathBuf,

    /// Output video path.
    #[arg(long)]
    out: PathBuf,

    /// Container format (mp4, avi, mkv, mov, wmv).
    #[arg(long)]
    format: String,

    /// Extension of the frame images.
    #[arg(long, default_value = "png")]
    image_ext: String,

    /// Frames per second.
    #[arg(long, default_value_t = 24)]
    fps: u32,
}

fn parse_anchor(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")?;

    match cli.cmd {
        Command::Path(args) => cmd_path(args),
        Command::Render(args) => cmd_render(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let fps = spritegraph::Fps::whole(args.fps)?;

    let result = match &args.background {
        Some(bg) => {
            let mut picker = spritegraph::AnchorCanvas::open(bg, fps, args.seconds)?;
            for &(x, y) in &args.anchors {
                if !picker.add_anchor(x, y) {
                    tracing::warn!(x, y, "anchor outside the background, ignored");
                }
            }
            let result = picker.interpolate()?;
            if let Some(out) = &args.debug_out {
                picker.save(out)?;
                eprintln!("wrote {}", out.display());
            }
            result
        }
        None => {
            let anchors = args
                .anchors
                .iter()
                .map(|&(x, y)| spritegraph::Point::new(x as f64, y as f64));
            spritegraph::AnchorPath::for_clip(fps, args.seconds)
                .with_anchors(anchors)
                .interpolate()?
        }
    };

    let samples: Vec<[f64; 2]> = result.points().iter().map(|p| [p.x, p.y]).collect();
    let json = serde_json::json!({
        "fitted": result.is_sampled(),
        "samples": samples,
    });
    println!("{}", serde_json::to_string(&json).context("serialize samples")?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let loaded = spritegraph::SceneConfig::load(&args.scene)?;
    let mut scene = loaded.build()?;

    let mut saver = spritegraph::FrameSaver::with_budget(&args.out_dir, scene.frame_count)?;
    let written = spritegraph::render_frames(
        &mut scene.graph,
        &scene.background,
        &scene.animations,
        scene.frame_count,
        &mut saver,
    )?;

    eprintln!("wrote {} frames to {}", written.len(), args.out_dir.display());
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let fps = spritegraph::Fps::whole(args.fps)?;
    let summary = spritegraph::SequenceEncoder::new(
        &args.in_dir,
        &args.out,
        &args.image_ext,
        &args.format,
        fps,
    )?
    .encode()?;

    if summary.frames_skipped > 0 {
        eprintln!("skipped {} unusable frames", summary.frames_skipped);
    }
    eprintln!(
        "wrote {} ({} frames)",
        summary.output.display(),
        summary.frames_written
    );
    Ok(())
}
