//! Node and edge tables
//!
//! Column order is fixed by field order: `Id, Club, Age` and `Src, Dst, Weight`.

use super::attributes::AttributeSampler;
use super::reference::{Club, ReferenceGraph};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the nodes table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier
    #[serde(rename = "Id")]
    pub id: u32,
    /// Club membership label
    #[serde(rename = "Club")]
    pub club: Club,
    /// Synthetic age attribute
    #[serde(rename = "Age")]
    pub age: u32,
}

/// One row of the edges table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node identifier
    #[serde(rename = "Src")]
    pub src: u32,
    /// Destination node identifier
    #[serde(rename = "Dst")]
    pub dst: u32,
    /// Synthetic weight attribute
    #[serde(rename = "Weight")]
    pub weight: f64,
}

/// Nodes table in graph node order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    records: Vec<NodeRecord>,
}

impl NodeTable {
    /// Column headers in output order
    pub const COLUMNS: [&'static str; 3] = ["Id", "Club", "Age"];

    /// One record per reference node with a freshly sampled age
    pub fn derive<R: Rng>(reference: &ReferenceGraph, sampler: &mut AttributeSampler<R>) -> Self {
        let records = reference
            .nodes()
            .map(|(node, club)| NodeRecord {
                id: node.0,
                club,
                age: sampler.sample_age(),
            })
            .collect();

        Self { records }
    }

    /// Records in table order
    #[must_use]
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate rows
    pub fn iter(&self) -> std::slice::Iter<'_, NodeRecord> {
        self.records.iter()
    }
}

impl From<Vec<NodeRecord>> for NodeTable {
    fn from(records: Vec<NodeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a NodeTable {
    type Item = &'a NodeRecord;
    type IntoIter = std::slice::Iter<'a, NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Edges table in directed edge order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    records: Vec<EdgeRecord>,
}

impl EdgeTable {
    /// Column headers in output order
    pub const COLUMNS: [&'static str; 3] = ["Src", "Dst", "Weight"];

    /// One record per directed reference edge with a freshly sampled weight
    pub fn derive<R: Rng>(reference: &ReferenceGraph, sampler: &mut AttributeSampler<R>) -> Self {
        let records = reference
            .edges()
            .map(|(src, dst)| EdgeRecord {
                src: src.0,
                dst: dst.0,
                weight: sampler.sample_weight(),
            })
            .collect();

        Self { records }
    }

    /// Records in table order
    #[must_use]
    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate rows
    pub fn iter(&self) -> std::slice::Iter<'_, EdgeRecord> {
        self.records.iter()
    }
}

impl From<Vec<EdgeRecord>> for EdgeTable {
    fn from(records: Vec<EdgeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a EdgeTable {
    type Item = &'a EdgeRecord;
    type IntoIter = std::slice::Iter<'a, EdgeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for NodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 3]> = self
            .records
            .iter()
            .map(|r| [r.id.to_string(), r.club.to_string(), r.age.to_string()])
            .collect();
        render(f, Self::COLUMNS, &rows)
    }
}

impl fmt::Display for EdgeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 3]> = self
            .records
            .iter()
            .map(|r| [r.src.to_string(), r.dst.to_string(), r.weight.to_string()])
            .collect();
        render(f, Self::COLUMNS, &rows)
    }
}

/// Right-aligned columns with a leading row index and a shape footer
fn render(f: &mut fmt::Formatter<'_>, columns: [&str; 3], rows: &[[String; 3]]) -> fmt::Result {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let mut widths = columns.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    write!(f, "{:index_width$}", "")?;
    for (column, width) in columns.iter().zip(widths) {
        write!(f, "  {column:>width$}")?;
    }
    writeln!(f)?;

    for (index, row) in rows.iter().enumerate() {
        write!(f, "{index:<index_width$}")?;
        for (cell, width) in row.iter().zip(widths) {
            write!(f, "  {cell:>width$}")?;
        }
        writeln!(f)?;
    }

    write!(f, "\n[{} rows x {} columns]", rows.len(), columns.len())
}
