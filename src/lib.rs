//! karate-dataset: synthetic labeled graph dataset generator
//!
//! # Overview
//!
//! Builds Zachary's karate club graph from built-in constants, turns every
//! friendship into a pair of directed edges, attaches random attributes (an
//! age per member, a weight per edge), and writes a nodes table and an edges
//! table.
//!
//! # Quick Start
//!
//! ```no_run
//! use karate_dataset::{AttributeSampler, Dataset, ReferenceGraph};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = ReferenceGraph::karate_club()?;
//! let mut sampler = AttributeSampler::seeded(42);
//!
//! let dataset = Dataset::generate(&reference, &mut sampler);
//! assert_eq!(dataset.nodes.len(), 34);
//! assert_eq!(dataset.edges.len(), 156);
//!
//! // Id,Club,Age and Src,Dst,Weight
//! dataset.write_csv("nodes.csv", "edges.csv").await?;
//!
//! let loaded = Dataset::read_csv("nodes.csv", "edges.csv").await?;
//! assert_eq!(loaded, dataset);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Topology**: CSR (Compressed Sparse Row) directed graph
//! - **Attributes**: injectable `rand::Rng` behind [`AttributeSampler`]
//! - **Persistence**: CSV tables, optional Parquet export (`storage` feature)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dataset;
pub mod storage;

// Re-export core types
pub use dataset::{
    run, AttributeSampler, Club, Dataset, EdgeRecord, EdgeTable, GeneratorConfig, IntegrityError,
    NodeRecord, NodeTable, ReferenceGraph, AGE_MAX, AGE_MIN,
};
pub use storage::{CsrGraph, NodeId};

// Error type
pub use anyhow::{Error, Result};
