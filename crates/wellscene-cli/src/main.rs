use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use wellscene_core::color::PotentialColorMap;
use wellscene_core::config::SceneConfig;
use wellscene_core::edges::{EdgePolicy, EdgeSelection};
use wellscene_core::mesh::PolyMesh;
use wellscene_core::model::EdgeGraph;
use wellscene_core::scene::{LabelStyle, LineStyle, RenderBackend, SceneBuilder, SurfaceStyle};
use wellscene_core::trajectory::WorldLabel;
use wellscene_import::{load_dataset, load_edge_graphs, DatasetPaths};

#[derive(Debug, Parser)]
#[command(name = "wellscene")]
#[command(about = "Oriented marker discs, well paths and edge graphs from borehole observations.")]
struct Cli {
    /// Debug-level logging unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assemble the scene and print the build report as JSON.
    Build {
        observations: PathBuf,
        trajectories: PathBuf,
        /// Directory of edge-graph CSV files.
        #[arg(long)]
        edges_dir: Option<PathBuf>,
        /// Edge sources to draw, e.g. `0,2,3`, `all` or `none`.
        #[arg(long, conflicts_with = "interactive")]
        edges: Option<String>,
        #[arg(long, value_enum)]
        edge_policy: Option<PolicyArg>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Ask for the edge selection on stdin.
        #[arg(long)]
        interactive: bool,
    },
    /// Print the edge-graph sources of a directory with their indices.
    ListEdges { dir: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    FirstPair,
    Polyline,
}

impl From<PolicyArg> for EdgePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstPair => EdgePolicy::FirstPair,
            PolicyArg::Polyline => EdgePolicy::Polyline,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Build {
            observations,
            trajectories,
            edges_dir,
            edges,
            edge_policy,
            config,
            report,
            interactive,
        } => build(BuildArgs {
            paths: DatasetPaths {
                observations,
                trajectories,
                edges_dir,
            },
            edges,
            edge_policy: edge_policy.map(EdgePolicy::from),
            config,
            report,
            interactive,
        }),
        Command::ListEdges { dir } => list_edges(&dir),
    }
}

struct BuildArgs {
    paths: DatasetPaths,
    edges: Option<String>,
    edge_policy: Option<EdgePolicy>,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    interactive: bool,
}

fn build(args: BuildArgs) -> Result<()> {
    ensure_input_file(&args.paths.observations)?;
    ensure_input_file(&args.paths.trajectories)?;
    if let Some(dir) = &args.paths.edges_dir {
        ensure_input_dir(dir)?;
    }

    let mut cfg = match &args.config {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(policy) = args.edge_policy {
        cfg.edges.policy = policy;
    }

    let dataset = load_dataset(&args.paths).context("load dataset")?;

    let available = dataset.edges.len();
    let selection = if args.interactive {
        prompt_selection(&dataset.edges)?
    } else {
        match args.edges.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("all") => EdgeSelection::all(available),
            Some(s) => EdgeSelection::parse(s, available),
            None => EdgeSelection::none(),
        }
    };

    let scene = SceneBuilder::new(cfg)
        .build(&dataset, &selection)
        .context("assemble scene")?;

    let mut summary = SummaryBackend::default();
    scene.render(&mut summary);
    info!(
        filled_meshes = summary.filled_meshes,
        polygons = summary.polygons,
        line_cells = summary.line_cells,
        scalar_line_cells = summary.scalar_line_cells,
        labels = summary.labels,
        "render summary"
    );

    let json = serde_json::to_string_pretty(&scene.report).context("serialize report")?;
    if let Some(path) = &args.report {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn list_edges(dir: &Path) -> Result<()> {
    ensure_input_dir(dir)?;
    let graphs = load_edge_graphs(dir)?;
    if graphs.is_empty() {
        println!("No edge files found in {}", dir.display());
    }
    for (i, graph) in graphs.iter().enumerate() {
        println!("{}", describe_source(i, graph));
    }
    Ok(())
}

fn describe_source(index: usize, graph: &EdgeGraph) -> String {
    format!(
        "{index}: {}, {} points, {} segments",
        graph.name,
        graph.rows.len(),
        graph.distinct_segments()
    )
}

fn prompt_selection(graphs: &[EdgeGraph]) -> Result<EdgeSelection> {
    if graphs.is_empty() {
        return Ok(EdgeSelection::none());
    }

    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "Available edge files:")?;
    for (i, graph) in graphs.iter().enumerate() {
        writeln!(stderr, "  {}", describe_source(i, graph))?;
    }
    write!(stderr, "Indices to display (e.g. 0,2,3), or 'none': ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read edge selection")?;
    Ok(EdgeSelection::parse(&line, graphs.len()))
}

/// Counts what a real toolkit would be asked to draw.
#[derive(Debug, Default)]
struct SummaryBackend {
    filled_meshes: usize,
    polygons: usize,
    line_cells: usize,
    scalar_line_cells: usize,
    labels: usize,
}

impl RenderBackend for SummaryBackend {
    fn filled_mesh(&mut self, mesh: &PolyMesh, _style: SurfaceStyle) {
        self.filled_meshes += 1;
        self.polygons += mesh.num_polys();
    }

    fn line_mesh(&mut self, mesh: &PolyMesh, _style: LineStyle) {
        self.line_cells += mesh.num_lines();
    }

    fn scalar_line_mesh(&mut self, mesh: &PolyMesh, _colors: &PotentialColorMap, _width: f64) {
        self.scalar_line_cells += mesh.num_lines();
    }

    fn label(&mut self, _label: &WorldLabel, _style: LabelStyle) {
        self.labels += 1;
    }
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => not_found(input),
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn ensure_input_dir(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_dir() {
                Ok(())
            } else {
                bail!("input is not a directory: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => not_found(input),
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

fn not_found(input: &Path) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(root) = find_workspace_root(&cwd) {
        bail!(
            "input not found: {input:?} (cwd: {cwd:?}).\nHint: run from the workspace root {root:?} or pass an absolute path."
        );
    }
    bail!("input not found: {input:?} (cwd: {cwd:?}).");
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("Cargo.lock").is_file())
        .map(|dir| dir.to_path_buf())
}
