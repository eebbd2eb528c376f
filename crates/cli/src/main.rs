mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polars::prelude::{df, CsvWriter, DataFrame, NamedFrom, ParquetWriter, SerWriter};
use polypaint::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "polypaint")]
#[command(about = "Painter's Algorithm renderer for convex polyhedra")]
struct Cmd {
    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Paint the scene back to front into an SVG
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        /// Pause after each face, in milliseconds
        #[arg(long, default_value_t = 300)]
        delay_ms: u64,
        /// Viewport half width applied on all axes after the last face
        #[arg(long, default_value_t = 3.0)]
        bound: f64,
        /// Final SVG document
        #[arg(long, default_value = "painter.svg")]
        out: PathBuf,
        /// Write one SVG per flush into this directory as the render runs.
        /// Without it the per-face delay is skipped
        #[arg(long)]
        frames: Option<PathBuf>,
        /// Image size in pixels
        #[arg(long, default_value_t = 600)]
        size: u32,
        #[arg(long, default_value_t = 30.0)]
        elevation: f64,
        #[arg(long, default_value_t = -60.0, allow_hyphen_values = true)]
        azimuth: f64,
    },
    /// Print the back-to-front face order
    Order {
        #[command(flatten)]
        scene: SceneArgs,
        /// Write the order as a table (.csv or .parquet)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone)]
struct SceneArgs {
    /// Replace the demo scene with this many random shapes
    #[arg(long, allow_hyphen_values = true)]
    count: Option<String>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Depth axis
    #[arg(long, value_enum, default_value = "y")]
    axis: AxisArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for Axis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
            AxisArg::Z => Axis::Z,
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.quiet { Level::WARN } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Render {
            scene,
            delay_ms,
            bound,
            out,
            frames,
            size,
            elevation,
            azimuth,
        } => {
            let opts = RenderOpts {
                delay: Duration::from_millis(delay_ms),
                bound,
                out,
                frames,
                size,
                projection: Projection {
                    elevation_deg: elevation,
                    azimuth_deg: azimuth,
                },
            };
            render(&scene, &opts).map(|_| ())
        }
        Action::Order { scene, out } => order(&scene, out.as_deref()).map(|_| ()),
        Action::Report => report(),
    }
}

struct RenderOpts {
    delay: Duration,
    bound: f64,
    out: PathBuf,
    frames: Option<PathBuf>,
    size: u32,
    projection: Projection,
}

fn render(args: &SceneArgs, opts: &RenderOpts) -> Result<RenderStats> {
    tracing::info!(
        count = ?args.count,
        seed = args.seed,
        out = %opts.out.display(),
        "render"
    );
    let provider = GeometryProvider::with_seed(args.seed)?;
    let renderer = Renderer::new(RenderCfg {
        step_delay: opts.delay,
        bounds: Bounds3::symmetric(opts.bound),
        axis: args.axis.into(),
        ..RenderCfg::default()
    });
    let mut viewer = Viewer::new(provider, renderer);
    let mut surface = SvgSurface::new(opts.projection, opts.size);
    if let Some(dir) = &opts.frames {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let dir = dir.clone();
        surface = surface.with_frame_sink(move |i, doc| {
            fs::write(dir.join(format!("frame_{i:04}.svg")), doc)
        });
    }
    // Pause only between frames that are already on disk.
    let outcome = if surface.is_streaming() {
        viewer.trigger(args.count.as_deref(), &mut surface, &mut SleepPacer)
    } else {
        viewer.trigger(args.count.as_deref(), &mut surface, &mut NoPause)
    };
    if let Some(err) = &outcome.rejected {
        tracing::warn!(%err, "rendered the previous scene");
    }
    if let Some(err) = surface.take_sink_error() {
        return Err(err).context("writing frames");
    }

    create_parent(&opts.out)?;
    fs::write(&opts.out, surface.document())
        .with_context(|| format!("writing {}", opts.out.display()))?;
    provenance::write_sidecar(
        &opts.out,
        serde_json::json!({
            "command": "render",
            "count": args.count,
            "rejected_count": outcome.rejected.as_ref().map(|e| e.to_string()),
            "seed": args.seed,
            "delay_ms": opts.delay.as_millis() as u64,
            "bound": opts.bound,
            "faces": outcome.stats.faces,
            "frames": opts.frames.as_ref().map(|d| d.to_string_lossy().into_owned()),
        }),
    )?;
    tracing::info!(faces = outcome.stats.faces, "render written");
    Ok(outcome.stats)
}

fn order(args: &SceneArgs, out: Option<&Path>) -> Result<DataFrame> {
    let mut provider = GeometryProvider::with_seed(args.seed)?;
    // A rejected count is logged by the provider; the demo scene stays.
    let rejected = args
        .count
        .as_deref()
        .and_then(|count| provider.regenerate_from_input(count).err());
    let faces = sort_faces(&provider.snapshot(), args.axis.into());
    for (step, f) in faces.iter().enumerate() {
        println!(
            "{step:>4}  body {:>3}  face {:>2}  key {:+.4}",
            f.source.body, f.source.face, f.key
        );
    }
    let mut df = order_table(&faces)?;
    if let Some(path) = out {
        write_table(&mut df, path)?;
        provenance::write_sidecar(
            path,
            serde_json::json!({
                "command": "order",
                "count": args.count,
                "rejected_count": rejected.as_ref().map(|e| e.to_string()),
                "seed": args.seed,
                "rows": df.height(),
            }),
        )?;
        tracing::info!(rows = df.height(), out = %path.display(), "order written");
    }
    Ok(df)
}

fn order_table(faces: &[DepthKeyedFace]) -> Result<DataFrame> {
    let step: Vec<u32> = (0..faces.len() as u32).collect();
    let body: Vec<u32> = faces.iter().map(|f| f.source.body as u32).collect();
    let face: Vec<u32> = faces.iter().map(|f| f.source.face as u32).collect();
    let key: Vec<f64> = faces.iter().map(|f| f.key).collect();
    let vertices: Vec<u32> = faces.iter().map(|f| f.polygon.len() as u32).collect();
    let df = df!(
        "step" => step,
        "body" => body,
        "face" => face,
        "key" => key,
        "vertices" => vertices,
    )?;
    Ok(df)
}

fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    create_parent(path)?;
    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        _ => {
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": polypaint::VERSION,
        "defaults": {
            "delay_ms": RenderCfg::default().step_delay.as_millis() as u64,
            "bound": 3.0,
            "axis": "y",
        },
        "shapes": ShapeKind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
