use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use postline::{HeadlineRequest, LayoutKind, StyleConfig};

#[derive(Parser, Debug)]
#[command(name = "postline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a single post image.
    Compose(ComposeArgs),
    /// Compose every job of a JSON manifest in parallel.
    Batch(BatchArgs),
    /// List available layouts.
    Layouts,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Headline text.
    #[arg(long)]
    headline: String,

    /// Background image candidates, tried in order; a flat background is used if none fit.
    #[arg(long = "background")]
    backgrounds: Vec<PathBuf>,

    /// Source name shown in the attribution.
    #[arg(long)]
    source: Option<String>,

    /// Brand text.
    #[arg(long)]
    brand: Option<String>,

    /// Layout (`box` or `gradient`); defaults to the style's layout.
    #[arg(long, value_parser = parse_layout)]
    layout: Option<LayoutKind>,

    /// Style JSON; built-in defaults when omitted.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output PNG path; defaults to `<output.dir>/post_<slug>.png`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// PNG quality 0..=100, overriding the style.
    #[arg(long)]
    quality: Option<u8>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Manifest JSON listing the jobs.
    #[arg(long)]
    manifest: PathBuf,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

/// Batch manifest. Relative paths are resolved against the manifest's directory.
#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    style: Option<PathBuf>,
    jobs: Vec<Job>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct Job {
    headline: String,
    #[serde(default)]
    backgrounds: Vec<PathBuf>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Layouts => {
            cmd_layouts();
            Ok(())
        }
    }
}

fn parse_layout(s: &str) -> Result<LayoutKind, String> {
    s.parse().map_err(|e: postline::PostlineError| e.to_string())
}

fn load_style(path: Option<&Path>) -> anyhow::Result<StyleConfig> {
    let style = match path {
        Some(p) => StyleConfig::from_path(p)?,
        None => StyleConfig::default(),
    };
    style.validate()?;
    Ok(style)
}

fn read_candidates(paths: &[PathBuf]) -> Vec<Vec<u8>> {
    paths
        .iter()
        .filter_map(|p| match std::fs::read(p) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(path = %p.display(), error = %err, "cannot read background");
                None
            }
        })
        .collect()
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut style = load_style(args.style.as_deref())?;
    if let Some(q) = args.quality {
        style.output.quality = q;
    }

    let candidates = read_candidates(&args.backgrounds);
    let background = postline::background_or_default(
        candidates.iter().map(Vec::as_slice),
        &style.background,
        style.canvas,
    );

    let mut req = HeadlineRequest::new(background, args.headline, &style);
    if let Some(source) = args.source {
        req = req.with_source(source);
    }
    if let Some(brand) = args.brand {
        req = req.with_brand(brand);
    }
    if let Some(layout) = args.layout {
        req = req.with_layout(layout);
    }
    if let Some(out) = args.out {
        req = req.with_output_path(out);
    }

    let result = postline::render_to_file(req)?;
    for w in &result.warnings {
        eprintln!("warning: {w}");
    }
    eprintln!("wrote {}", result.output_path.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    if args.threads == Some(0) {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let text = std::fs::read_to_string(&args.manifest)
        .with_context(|| format!("read manifest '{}'", args.manifest.display()))?;
    let manifest: Manifest = serde_json::from_str(&text).context("parse manifest JSON")?;
    let root = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    let style_path = manifest.style.as_ref().map(|p| root.join(p));
    let style = load_style(style_path.as_deref())?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = args.threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("build rayon thread pool")?;

    let outcomes: Vec<anyhow::Result<PathBuf>> = pool.install(|| {
        manifest
            .jobs
            .par_iter()
            .map(|job| run_job(job, root, &style))
            .collect()
    });

    let mut failed = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok(path) => eprintln!("[{i}] wrote {}", path.display()),
            Err(err) => {
                failed += 1;
                eprintln!("[{i}] failed: {err:#}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} jobs failed", outcomes.len());
    }
    Ok(())
}

fn run_job(job: &Job, root: &Path, style: &StyleConfig) -> anyhow::Result<PathBuf> {
    let paths: Vec<PathBuf> = job.backgrounds.iter().map(|p| root.join(p)).collect();
    let candidates = read_candidates(&paths);
    let background = postline::background_or_default(
        candidates.iter().map(Vec::as_slice),
        &style.background,
        style.canvas,
    );

    let mut req = HeadlineRequest::new(background, job.headline.as_str(), style);
    if let Some(source) = &job.source {
        req = req.with_source(source.as_str());
    }
    if let Some(brand) = &job.brand {
        req = req.with_brand(brand.as_str());
    }
    if let Some(layout) = &job.layout {
        req = req.with_layout(layout.parse()?);
    }
    if let Some(out) = &job.out {
        req = req.with_output_path(root.join(out));
    }

    let result = postline::render_to_file(req)?;
    for w in &result.warnings {
        tracing::warn!(headline = %job.headline, "{w}");
    }
    Ok(result.output_path)
}

fn cmd_layouts() {
    for kind in LayoutKind::ALL {
        println!(
            "{:<10} {:<22} {}",
            kind.as_str(),
            kind.display_name(),
            kind.description()
        );
    }
}
