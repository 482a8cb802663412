//! Parquet I/O for the node and edge tables
//!
//! # Format
//!
//! Tables are stored as two Parquet files next to each other:
//! - `{path}_nodes.parquet`: (`Id`: u32, `Club`: utf8, `Age`: u32)
//! - `{path}_edges.parquet`: (`Src`: u32, `Dst`: u32, `Weight`: f64)

use crate::dataset::{Club, Dataset, EdgeRecord, EdgeTable, NodeRecord, NodeTable};
use anyhow::{anyhow, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const NODES_SUFFIX: &str = "_nodes.parquet";
const EDGES_SUFFIX: &str = "_edges.parquet";

impl Dataset {
    /// Write both tables to Parquet files
    ///
    /// Creates `{path}_nodes.parquet` and `{path}_edges.parquet`.
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API to match the CSV surface
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        self.write_nodes_parquet(base_path)?;
        self.write_edges_parquet(base_path)?;

        Ok(())
    }

    /// Read both tables from Parquet files written by [`Dataset::write_parquet`]
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API to match the CSV surface
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        Ok(Self {
            nodes: Self::read_nodes_parquet(base_path)?,
            edges: Self::read_edges_parquet(base_path)?,
        })
    }

    fn write_nodes_parquet(&self, base_path: &Path) -> Result<()> {
        let nodes_path = table_path(base_path, NODES_SUFFIX);
        let [id, club, age] = NodeTable::COLUMNS;

        let schema = Arc::new(Schema::new(vec![
            Field::new(id, DataType::UInt32, false),
            Field::new(club, DataType::Utf8, false),
            Field::new(age, DataType::UInt32, false),
        ]));

        let ids: Vec<u32> = self.nodes.iter().map(|r| r.id).collect();
        let clubs: Vec<&str> = self.nodes.iter().map(|r| r.club.as_str()).collect();
        let ages: Vec<u32> = self.nodes.iter().map(|r| r.age).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from(ids)),
            Arc::new(StringArray::from(clubs)),
            Arc::new(UInt32Array::from(ages)),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)
            .context("Failed to create nodes RecordBatch")?;

        write_batch(&nodes_path, schema, &batch)
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = table_path(base_path, EDGES_SUFFIX);
        let [src, dst, weight] = EdgeTable::COLUMNS;

        let schema = Arc::new(Schema::new(vec![
            Field::new(src, DataType::UInt32, false),
            Field::new(dst, DataType::UInt32, false),
            Field::new(weight, DataType::Float64, false),
        ]));

        let sources: Vec<u32> = self.edges.iter().map(|r| r.src).collect();
        let targets: Vec<u32> = self.edges.iter().map(|r| r.dst).collect();
        let weights: Vec<f64> = self.edges.iter().map(|r| r.weight).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from(sources)),
            Arc::new(UInt32Array::from(targets)),
            Arc::new(Float64Array::from(weights)),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)
            .context("Failed to create edges RecordBatch")?;

        write_batch(&edges_path, schema, &batch)
    }

    fn read_nodes_parquet(base_path: &Path) -> Result<NodeTable> {
        let nodes_path = table_path(base_path, NODES_SUFFIX);
        let shown = nodes_path.display();
        let mut records = Vec::new();

        for batch in read_batches(&nodes_path)? {
            let ids = column::<UInt32Array>(&batch, 0, "Id")?;
            let clubs = column::<StringArray>(&batch, 1, "Club")?;
            let ages = column::<UInt32Array>(&batch, 2, "Age")?;

            for i in 0..batch.num_rows() {
                let label = clubs.value(i);
                let club = Club::from_label(label)
                    .ok_or_else(|| anyhow!("Unknown club label {label:?} in {shown}"))?;

                records.push(NodeRecord {
                    id: ids.value(i),
                    club,
                    age: ages.value(i),
                });
            }
        }

        Ok(NodeTable::from(records))
    }

    fn read_edges_parquet(base_path: &Path) -> Result<EdgeTable> {
        let edges_path = table_path(base_path, EDGES_SUFFIX);
        let mut records = Vec::new();

        for batch in read_batches(&edges_path)? {
            let sources = column::<UInt32Array>(&batch, 0, "Src")?;
            let targets = column::<UInt32Array>(&batch, 1, "Dst")?;
            let weights = column::<Float64Array>(&batch, 2, "Weight")?;

            for i in 0..batch.num_rows() {
                records.push(EdgeRecord {
                    src: sources.value(i),
                    dst: targets.value(i),
                    weight: weights.value(i),
                });
            }
        }

        Ok(EdgeTable::from(records))
    }
}

/// `{base}{suffix}`, appended at the `OsStr` level so non-UTF-8 bases survive
fn table_path(base_path: &Path, suffix: &str) -> PathBuf {
    let mut name = base_path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_batch(path: &Path, schema: SchemaRef, batch: &RecordBatch) -> Result<()> {
    let shown = path.display();
    let file = File::create(path).with_context(|| format!("Failed to create {shown}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    debug!(path = %shown, rows = batch.num_rows(), "wrote parquet table");
    Ok(())
}

fn read_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let shown = path.display();
    let file = File::open(path).with_context(|| format!("Failed to open {shown}"))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    reader
        .map(|batch| batch.with_context(|| format!("Failed to read batch from {shown}")))
        .collect()
}

fn column<'a, A: 'static>(batch: &'a RecordBatch, index: usize, name: &str) -> Result<&'a A> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<A>()
        .with_context(|| format!("Invalid {name} column type"))
}
