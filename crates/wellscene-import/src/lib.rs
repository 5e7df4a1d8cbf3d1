use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use wellscene_core::geom::Vec3;
use wellscene_core::model::{EdgeGraph, EdgeRow, TrajectorySample, WellDataset, WellObservationPoint};

pub mod table;

use table::{read_table, Delimiter, Table};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: file has no header row", .path.display())]
    Empty { path: PathBuf },
    #[error("{}: missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}:{line}: row has {found} fields, header has {expected}", .path.display())]
    ShortRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{}:{line}: column `{column}` is not a number: {value:?}", .path.display())]
    BadNumber {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
}

pub const OBSERVATION_COLUMNS: [&str; 10] = [
    "WellName",
    "X",
    "Y",
    "Z",
    "MD",
    "MarkerName",
    "Dip",
    "Azimuth",
    "Point_number",
    "Marker_fault",
];

pub const TRAJECTORY_COLUMNS: [&str; 5] = ["WELLNAME", "X", "Y", "Z", "MD"];

pub const EDGE_COLUMNS: [&str; 6] = ["Seg_id", "X", "Y", "Z", "potential", "point"];

/// Comma-separated observation table.
pub fn load_observations(path: &Path) -> Result<Vec<WellObservationPoint>, ImportError> {
    let table = read_table(path, Delimiter::Comma)?;
    let [well, x, y, z, md, marker, dip, azimuth, point_number, marker_fault] =
        OBSERVATION_COLUMNS.map(|c| table.column(c));
    let (well, x, y, z, md) = (well?, x?, y?, z?, md?);
    let (marker, dip, azimuth, point_number, marker_fault) =
        (marker?, dip?, azimuth?, point_number?, marker_fault?);

    let mut out = Vec::with_capacity(table.len());
    for row in table.rows() {
        out.push(WellObservationPoint {
            well_name: table.text(row, &well)?.to_string(),
            position: Vec3::new(
                table.f64(row, &x)?,
                table.f64(row, &y)?,
                table.f64(row, &z)?,
            ),
            md: table.f64(row, &md)?,
            marker_name: table.text(row, &marker)?.to_string(),
            dip: table.f64(row, &dip)?,
            azimuth: table.f64(row, &azimuth)?,
            point_number: table.opt_i64(row, &point_number)?,
            marker_fault: table.opt_i64(row, &marker_fault)?,
        });
    }
    info!(path = %path.display(), rows = out.len(), "loaded observations");
    Ok(out)
}

/// Whitespace-separated trajectory table.
pub fn load_trajectories(path: &Path) -> Result<Vec<TrajectorySample>, ImportError> {
    let table = read_table(path, Delimiter::Whitespace)?;
    let [well, x, y, z, md] = TRAJECTORY_COLUMNS.map(|c| table.column(c));
    let (well, x, y, z, md) = (well?, x?, y?, z?, md?);

    let mut out = Vec::with_capacity(table.len());
    for row in table.rows() {
        out.push(TrajectorySample {
            well_name: table.text(row, &well)?.to_string(),
            position: Vec3::new(
                table.f64(row, &x)?,
                table.f64(row, &y)?,
                table.f64(row, &z)?,
            ),
            md: table.f64(row, &md)?,
        });
    }
    info!(path = %path.display(), rows = out.len(), "loaded trajectories");
    Ok(out)
}

/// One edge-graph CSV.
pub fn load_edge_graph(path: &Path) -> Result<EdgeGraph, ImportError> {
    let table = read_table(path, Delimiter::Comma)?;
    edge_graph_from_table(&table)
}

fn edge_graph_from_table(table: &Table) -> Result<EdgeGraph, ImportError> {
    let [seg_id, x, y, z, potential, point] = EDGE_COLUMNS.map(|c| table.column(c));
    let (seg_id, x, y, z, potential, point) = (seg_id?, x?, y?, z?, potential?, point?);

    let mut rows = Vec::with_capacity(table.len());
    let mut skipped_rows = 0;
    for row in table.rows() {
        let seg = table.opt_i64(row, &seg_id)?;
        let pt = table.opt_i64(row, &point)?;
        let (Some(seg), Some(pt)) = (seg, pt) else {
            debug!(line = row.line, "edge row without segment id or point");
            skipped_rows += 1;
            continue;
        };
        rows.push(EdgeRow {
            seg_id: seg,
            position: Vec3::new(
                table.f64(row, &x)?,
                table.f64(row, &y)?,
                table.f64(row, &z)?,
            ),
            potential: table.f64(row, &potential)?,
            point: pt,
        });
    }
    if skipped_rows > 0 {
        warn!(
            path = %table.path().display(),
            skipped_rows,
            "dropped edge rows without segment id or point"
        );
    }

    let name = table
        .path()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("edges")
        .to_string();
    Ok(EdgeGraph {
        name,
        rows,
        skipped_rows,
    })
}

/// Every `*.csv` in `dir`, sorted by file name so indices stay stable.
pub fn load_edge_graphs(dir: &Path) -> Result<Vec<EdgeGraph>, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ImportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut graphs = Vec::with_capacity(files.len());
    for path in &files {
        let graph = load_edge_graph(path)?;
        debug!(path = %path.display(), rows = graph.rows.len(), "loaded edge graph");
        graphs.push(graph);
    }
    info!(dir = %dir.display(), sources = graphs.len(), "loaded edge graphs");
    Ok(graphs)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub observations: PathBuf,
    pub trajectories: PathBuf,
    pub edges_dir: Option<PathBuf>,
}

pub fn load_dataset(paths: &DatasetPaths) -> Result<WellDataset, ImportError> {
    let observations = load_observations(&paths.observations)?;
    let trajectories = load_trajectories(&paths.trajectories)?;
    let edges = match &paths.edges_dir {
        Some(dir) => load_edge_graphs(dir)?,
        None => Vec::new(),
    };
    Ok(WellDataset {
        observations,
        trajectories,
        edges,
    })
}
