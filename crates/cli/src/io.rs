//! Pile input and layout output files.
//!
//! - JSON input: `{ "objects": [ { id, x, z, rotation, min: [3], max: [3] } ] }`.
//! - CSV input: columns `id,x,z,rotation,min_x,min_y,min_z,max_x,max_y,max_z`.
//! - Output: `{ "poses": [ { id, position: [3], rotation: [x, y, z, w] } ] }`.
//!
//! Rows are in pile order (bottom first) and all land in pile `0`.

use anyhow::{Context, Result};
use pile_layout::api::{ObjectId, Pile, PileId, Pose2, Rect3, ResultPose, TableSnapshot};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pile id used for file input.
pub const FILE_PILE: PileId = PileId(0);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: u64,
    pub x: f64,
    pub z: f64,
    pub rotation: f64,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PileFile {
    pub objects: Vec<ObjectRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub id: u64,
    pub position: [f64; 3],
    pub rotation: [f64; 4],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub poses: Vec<PoseRecord>,
}

impl PileFile {
    pub fn from_pile(pile: &Pile) -> Self {
        let objects = pile
            .iter()
            .map(|e| {
                let (pose, bbox) = (e.boxed.pose, e.boxed.bbox);
                ObjectRecord {
                    id: e.id.0,
                    x: pose.position.x,
                    z: pose.position.y,
                    rotation: pose.rotation,
                    min: bbox.min.into(),
                    max: bbox.max.into(),
                }
            })
            .collect();
        Self { objects }
    }

    /// Snapshot holding every record as a member of `FILE_PILE`, in file order.
    pub fn to_snapshot(&self) -> TableSnapshot {
        let mut snap = TableSnapshot::new();
        for rec in &self.objects {
            let id = ObjectId(rec.id);
            let bbox = Rect3::new(rec.min.into(), rec.max.into());
            snap.insert_object(id, Pose2::new(rec.x, rec.z, rec.rotation), bbox)
                .push_member(FILE_PILE, id);
        }
        snap
    }
}

impl LayoutFile {
    pub fn from_poses(poses: &[ResultPose]) -> Self {
        let poses = poses
            .iter()
            .map(|r| {
                let q = r.pose.rotation.quaternion();
                PoseRecord {
                    id: r.id.0,
                    position: r.pose.position.into(),
                    rotation: [q.i, q.j, q.k, q.w],
                }
            })
            .collect();
        Self { poses }
    }
}

/// Read a pile from `.csv` (by extension) or JSON.
pub fn read_pile_file(path: &Path) -> Result<PileFile> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}

const FLOAT_COLUMNS: [&str; 9] = [
    "x", "z", "rotation", "min_x", "min_y", "min_z", "max_x", "max_y", "max_z",
];

fn read_csv(path: &Path) -> Result<PileFile> {
    let mut columns = vec![col("id").cast(DataType::UInt64)];
    columns.extend(FLOAT_COLUMNS.iter().map(|&name| col(name).cast(DataType::Float64)));
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select(columns)
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let ids: Vec<u64> = df
        .column("id")?
        .u64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("row {row}: missing id")))
        .collect::<Result<_>>()?;
    let mut values = Vec::with_capacity(FLOAT_COLUMNS.len());
    for name in FLOAT_COLUMNS {
        values.push(float_column(&df, name)?);
    }
    let objects = ids
        .into_iter()
        .enumerate()
        .map(|(row, id)| {
            let v = |k: usize| values[k][row];
            ObjectRecord {
                id,
                x: v(0),
                z: v(1),
                rotation: v(2),
                min: [v(3), v(4), v(5)],
                max: [v(6), v(7), v(8)],
            }
        })
        .collect();
    Ok(PileFile { objects })
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    df.column(name)?
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.with_context(|| format!("row {row}: missing {name}")))
        .collect()
}

/// Pretty-print `value` as JSON into `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
