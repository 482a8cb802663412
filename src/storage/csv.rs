//! CSV I/O for the node and edge tables
//!
//! # Format
//!
//! Two comma-delimited files, header row first, no index column:
//! - nodes: `Id,Club,Age`
//! - edges: `Src,Dst,Weight`
//!
//! Each table is serialized in memory and written with a single call, so a
//! serialization error never leaves a half-written file behind.

use crate::dataset::{Dataset, EdgeRecord, EdgeTable, NodeRecord, NodeTable};
use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

impl Dataset {
    /// Write the nodes and edges tables as CSV
    ///
    /// Existing files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file I/O fails
    pub async fn write_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        nodes_path: P,
        edges_path: Q,
    ) -> Result<()> {
        let (nodes, edges) = (self.nodes.records(), self.edges.records());

        write_table(nodes_path.as_ref(), NodeTable::COLUMNS, nodes).await?;
        write_table(edges_path.as_ref(), EdgeTable::COLUMNS, edges).await?;

        Ok(())
    }

    /// Read nodes and edges tables previously written by [`Dataset::write_csv`]
    ///
    /// # Errors
    ///
    /// Returns error if a file is missing, has unexpected headers, or a row
    /// does not parse
    pub async fn read_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        nodes_path: P,
        edges_path: Q,
    ) -> Result<Self> {
        let nodes: Vec<NodeRecord> = read_table(nodes_path.as_ref(), NodeTable::COLUMNS).await?;
        let edges: Vec<EdgeRecord> = read_table(edges_path.as_ref(), EdgeTable::COLUMNS).await?;

        Ok(Self {
            nodes: NodeTable::from(nodes),
            edges: EdgeTable::from(edges),
        })
    }
}

/// Serialize records behind an explicit header row
///
/// The header is written by hand so empty tables still carry it.
fn encode<T: Serialize>(columns: [&str; 3], records: &[T]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))
}

fn decode<T: DeserializeOwned>(columns: [&str; 3], bytes: &[u8]) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers()?;
    if !headers.iter().eq(columns) {
        bail!(
            "Unexpected header {:?}, expected {}",
            headers,
            columns.join(",")
        );
    }

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(row, record)| record.with_context(|| format!("Invalid row {}", row + 1)))
        .collect()
}

async fn write_table<T: Serialize>(path: &Path, columns: [&str; 3], records: &[T]) -> Result<()> {
    let bytes = encode(columns, records)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), rows = records.len(), bytes = bytes.len(), "wrote table");
    Ok(())
}

async fn read_table<T: DeserializeOwned>(path: &Path, columns: [&str; 3]) -> Result<Vec<T>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    decode(columns, &bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{AttributeSampler, Club, ReferenceGraph};
    use tempfile::tempdir;

    fn tiny() -> Dataset {
        Dataset {
            nodes: NodeTable::from(vec![
                NodeRecord {
                    id: 0,
                    club: Club::MrHi,
                    age: 42,
                },
                NodeRecord {
                    id: 1,
                    club: Club::Officer,
                    age: 33,
                },
            ]),
            edges: EdgeTable::from(vec![
                EdgeRecord {
                    src: 0,
                    dst: 1,
                    weight: 0.5,
                },
                EdgeRecord {
                    src: 1,
                    dst: 0,
                    weight: 0.125,
                },
            ]),
        }
    }

    #[test]
    fn test_encode_layout() {
        let dataset = tiny();

        let nodes = encode(NodeTable::COLUMNS, dataset.nodes.records()).unwrap();
        assert_eq!(
            String::from_utf8(nodes).unwrap(),
            "Id,Club,Age\n0,Mr. Hi,42\n1,Officer,33\n"
        );

        let edges = encode(EdgeTable::COLUMNS, dataset.edges.records()).unwrap();
        assert_eq!(
            String::from_utf8(edges).unwrap(),
            "Src,Dst,Weight\n0,1,0.5\n1,0,0.125\n"
        );
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let bytes = encode::<EdgeRecord>(EdgeTable::COLUMNS, &[]).unwrap();
        assert_eq!(bytes, b"Src,Dst,Weight\n");

        let records: Vec<EdgeRecord> = decode(EdgeTable::COLUMNS, &bytes).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_header() {
        let input = b"Id,Label,Age\n0,Mr. Hi,40\n";
        let err = decode::<NodeRecord>(NodeTable::COLUMNS, input).unwrap_err();
        assert!(err.to_string().contains("expected Id,Club,Age"));
    }

    #[test]
    fn test_decode_rejects_unknown_club() {
        let result = decode::<NodeRecord>(NodeTable::COLUMNS, b"Id,Club,Age\n0,Sensei,40\n");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_csv_roundtrip() {
        let dir = tempdir().unwrap();
        let nodes_path = dir.path().join("nodes.csv");
        let edges_path = dir.path().join("edges.csv");

        let reference = ReferenceGraph::karate_club().unwrap();
        let dataset = Dataset::generate(&reference, &mut AttributeSampler::seeded(17));

        dataset.write_csv(&nodes_path, &edges_path).await.unwrap();
        let loaded = Dataset::read_csv(&nodes_path, &edges_path).await.unwrap();

        assert_eq!(loaded, dataset);
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let nodes_path = dir.path().join("nodes.csv");
        let edges_path = dir.path().join("edges.csv");
        let stale = "stale contents that are longer than the new table\n".repeat(10);
        std::fs::write(&nodes_path, stale).unwrap();

        tiny().write_csv(&nodes_path, &edges_path).await.unwrap();

        let contents = std::fs::read_to_string(&nodes_path).unwrap();
        assert_eq!(contents, "Id,Club,Age\n0,Mr. Hi,42\n1,Officer,33\n");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = Dataset::read_csv(dir.path().join("nope.csv"), dir.path().join("edges.csv"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing").join("nodes.csv");

        let edges_path = dir.path().join("edges.csv");
        let result = tiny().write_csv(&missing, edges_path).await;
        assert!(result.is_err());
    }
}
