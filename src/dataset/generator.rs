//! Dataset generation: reference graph → tables → files

use super::attributes::{AttributeSampler, AGE_RANGE, WEIGHT_RANGE};
use super::reference::ReferenceGraph;
use super::tables::{EdgeTable, NodeTable};
use anyhow::{Context, Result};
use rand::Rng;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Default nodes table path (relative to the working directory)
pub const DEFAULT_NODES_PATH: &str = "nodes.csv";

/// Default edges table path (relative to the working directory)
pub const DEFAULT_EDGES_PATH: &str = "edges.csv";

/// Integrity violations found in a node/edge table pair
#[derive(Debug, Error, PartialEq)]
pub enum IntegrityError {
    /// Two node rows share an id
    #[error("Duplicate node id {0}")]
    DuplicateNode(u32),

    /// Node age outside the sampling domain
    #[error("Node {id} has age {age} outside {min}..={max}")]
    AgeOutOfRange {
        /// Node id
        id: u32,
        /// Offending age
        age: u32,
        /// Inclusive lower bound
        min: u32,
        /// Inclusive upper bound
        max: u32,
    },

    /// Edge weight outside `[0, 1)`
    #[error("Edge {src} → {dst} has weight {weight} outside [0, 1)")]
    WeightOutOfRange {
        /// Source node id
        src: u32,
        /// Destination node id
        dst: u32,
        /// Offending weight
        weight: f64,
    },

    /// Edge endpoint missing from the nodes table
    #[error("Edge {src} → {dst} references unknown node {missing}")]
    DanglingEdge {
        /// Source node id
        src: u32,
        /// Destination node id
        dst: u32,
        /// Endpoint with no node row
        missing: u32,
    },
}

/// Generator settings
///
/// `Default` yields the fixed behavior of the binary: `nodes.csv` and
/// `edges.csv` in the working directory, entropy-seeded attributes, tables
/// echoed to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Destination of the nodes table
    pub nodes_path: PathBuf,
    /// Destination of the edges table
    pub edges_path: PathBuf,
    /// Fixed seed for reproducible attributes; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Print both tables to stdout before writing
    pub print_tables: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes_path: PathBuf::from(DEFAULT_NODES_PATH),
            edges_path: PathBuf::from(DEFAULT_EDGES_PATH),
            seed: None,
            print_tables: true,
        }
    }
}

/// Generated nodes and edges tables
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Nodes table
    pub nodes: NodeTable,
    /// Edges table
    pub edges: EdgeTable,
}

impl Dataset {
    /// Derive both tables from a reference graph
    ///
    /// Ages are drawn for every node first, then weights for every edge.
    pub fn generate<R: Rng>(reference: &ReferenceGraph, sampler: &mut AttributeSampler<R>) -> Self {
        let nodes = NodeTable::derive(reference, sampler);
        debug!(rows = nodes.len(), "derived nodes table");

        let edges = EdgeTable::derive(reference, sampler);
        debug!(rows = edges.len(), "derived edges table");

        Self { nodes, edges }
    }

    /// Check ids, attribute domains, and edge endpoints
    ///
    /// # Errors
    ///
    /// Returns the first [`IntegrityError`] found, nodes before edges
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(IntegrityError::DuplicateNode(node.id));
            }
            if !AGE_RANGE.contains(&node.age) {
                return Err(IntegrityError::AgeOutOfRange {
                    id: node.id,
                    age: node.age,
                    min: *AGE_RANGE.start(),
                    max: *AGE_RANGE.end(),
                });
            }
        }

        for edge in &self.edges {
            if !WEIGHT_RANGE.contains(&edge.weight) {
                return Err(IntegrityError::WeightOutOfRange {
                    src: edge.src,
                    dst: edge.dst,
                    weight: edge.weight,
                });
            }
            for endpoint in [edge.src, edge.dst] {
                if !ids.contains(&endpoint) {
                    return Err(IntegrityError::DanglingEdge {
                        src: edge.src,
                        dst: edge.dst,
                        missing: endpoint,
                    });
                }
            }
        }

        Ok(())
    }

    /// Render both tables to `out`, nodes first
    ///
    /// # Errors
    ///
    /// Returns error if writing to `out` fails
    pub fn print_tables<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.nodes)?;
        writeln!(out, "{}", self.edges)?;
        out.flush()
    }
}

/// Generate the karate club dataset once and write it out
///
/// Prints both tables when `config.print_tables` is set, then writes the
/// nodes and edges CSV files.
///
/// # Errors
///
/// Returns error if the tables cannot be printed or either file cannot be
/// written
pub async fn run(config: &GeneratorConfig) -> Result<Dataset> {
    let reference = ReferenceGraph::karate_club()?;
    debug!(
        nodes = reference.num_nodes(),
        connections = reference.num_connections(),
        "built reference graph"
    );

    let dataset = match config.seed {
        Some(seed) => {
            debug!(seed, "sampling attributes from fixed seed");
            Dataset::generate(&reference, &mut AttributeSampler::seeded(seed))
        }
        None => Dataset::generate(&reference, &mut AttributeSampler::from_entropy()),
    };

    if config.print_tables {
        dataset
            .print_tables(&mut io::stdout().lock())
            .context("Failed to print tables")?;
    }

    dataset
        .write_csv(&config.nodes_path, &config.edges_path)
        .await?;

    info!(
        nodes = dataset.nodes.len(),
        edges = dataset.edges.len(),
        nodes_path = %config.nodes_path.display(),
        edges_path = %config.edges_path.display(),
        "wrote dataset"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::reference::Club;
    use crate::dataset::tables::{EdgeRecord, NodeRecord};

    fn node(id: u32, club: Club, age: u32) -> NodeRecord {
        NodeRecord { id, club, age }
    }

    fn edge(src: u32, dst: u32, weight: f64) -> EdgeRecord {
        EdgeRecord { src, dst, weight }
    }

    fn small_dataset() -> Dataset {
        Dataset {
            nodes: NodeTable::from(vec![node(0, Club::MrHi, 30), node(1, Club::Officer, 50)]),
            edges: EdgeTable::from(vec![edge(0, 1, 0.0), edge(1, 0, 0.999)]),
        }
    }

    #[test]
    fn test_generated_dataset_validates() {
        let reference = ReferenceGraph::karate_club().unwrap();
        let dataset = Dataset::generate(&reference, &mut AttributeSampler::seeded(5));

        assert_eq!(dataset.nodes.len(), 34);
        assert_eq!(dataset.edges.len(), 156);
        assert_eq!(dataset.validate(), Ok(()));
    }

    #[test]
    fn test_bounds_are_valid() {
        assert_eq!(small_dataset().validate(), Ok(()));
    }

    #[test]
    fn test_dangling_edge_detected() {
        let mut dataset = small_dataset();
        dataset.edges = EdgeTable::from(vec![edge(1, 7, 0.5)]);

        let expected = IntegrityError::DanglingEdge {
            src: 1,
            dst: 7,
            missing: 7,
        };
        assert_eq!(dataset.validate(), Err(expected));
    }

    #[test]
    fn test_age_out_of_range_detected() {
        let mut dataset = small_dataset();
        let nodes = vec![node(0, Club::MrHi, 30), node(1, Club::Officer, 51)];
        dataset.nodes = NodeTable::from(nodes);

        let err = dataset.validate().unwrap_err();
        let expected = IntegrityError::AgeOutOfRange {
            id: 1,
            age: 51,
            min: 30,
            max: 50,
        };
        assert_eq!(err, expected);
        assert_eq!(err.to_string(), "Node 1 has age 51 outside 30..=50");
    }

    #[test]
    fn test_weight_of_one_rejected() {
        let mut dataset = small_dataset();
        dataset.edges = EdgeTable::from(vec![edge(0, 1, 1.0)]);

        let expected = IntegrityError::WeightOutOfRange {
            src: 0,
            dst: 1,
            weight: 1.0,
        };
        assert_eq!(dataset.validate(), Err(expected));
    }

    #[test]
    fn test_duplicate_node_detected() {
        let mut dataset = small_dataset();
        dataset.nodes = NodeTable::from(vec![node(0, Club::MrHi, 40), node(0, Club::MrHi, 41)]);

        assert_eq!(dataset.validate(), Err(IntegrityError::DuplicateNode(0)));
    }

    #[test]
    fn test_print_tables_renders_nodes_then_edges() {
        let mut out = Vec::new();
        small_dataset().print_tables(&mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let expected = format!("{}\n{}\n", small_dataset().nodes, small_dataset().edges);
        assert_eq!(printed, expected);

        let nodes_header = printed.find("Id     Club  Age").unwrap();
        let edges_header = printed.find("Src  Dst  Weight").unwrap();
        assert!(nodes_header < edges_header);
        assert!(printed.contains("[2 rows x 3 columns]"));
    }

    #[test]
    fn test_default_config_uses_fixed_paths() {
        let config = GeneratorConfig::default();

        assert_eq!(config.nodes_path, PathBuf::from("nodes.csv"));
        assert_eq!(config.edges_path, PathBuf::from("edges.csv"));
        assert_eq!(config.seed, None);
        assert!(config.print_tables);
    }
}
