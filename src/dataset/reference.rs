//! Built-in reference graph: Zachary's karate club
//!
//! Zachary, "An Information Flow Model for Conflict and Fission in Small
//! Groups" (J. Anthropological Research, 1977). 34 members, 78 friendships,
//! and the faction each member joined after the club split.

use crate::storage::{CsrGraph, NodeId};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of club members
pub const KARATE_CLUB_NODES: usize = 34;

/// Club membership label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Club {
    /// Followers of the instructor
    #[serde(rename = "Mr. Hi")]
    MrHi,
    /// Followers of the club administrator
    #[serde(rename = "Officer")]
    Officer,
}

impl Club {
    /// Label as written to the node table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MrHi => "Mr. Hi",
            Self::Officer => "Officer",
        }
    }

    /// Parse a label as written to the node table
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Mr. Hi" => Some(Self::MrHi),
            "Officer" => Some(Self::Officer),
            _ => None,
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

use Club::{MrHi as H, Officer as O};

/// Faction per member, indexed by node id
#[rustfmt::skip]
pub const KARATE_CLUB_LABELS: [Club; KARATE_CLUB_NODES] = [
    H, H, H, H, H, H, H, H, H, O, // 0-9
    H, H, H, H, O, O, H, H, O, H, // 10-19
    O, H, O, O, O, O, O, O, O, O, // 20-29
    O, O, O, O, // 30-33
];

/// Undirected friendships, `(u, v)` with `u < v`, ascending
#[rustfmt::skip]
pub const KARATE_CLUB_CONNECTIONS: [(u32, u32); 78] = [
    (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), (0, 8),
    (0, 10), (0, 11), (0, 12), (0, 13), (0, 17), (0, 19), (0, 21), (0, 31),
    (1, 2), (1, 3), (1, 7), (1, 13), (1, 17), (1, 19), (1, 21), (1, 30),
    (2, 3), (2, 7), (2, 8), (2, 9), (2, 13), (2, 27), (2, 28), (2, 32),
    (3, 7), (3, 12), (3, 13),
    (4, 6), (4, 10),
    (5, 6), (5, 10), (5, 16),
    (6, 16),
    (8, 30), (8, 32), (8, 33),
    (9, 33),
    (13, 33),
    (14, 32), (14, 33),
    (15, 32), (15, 33),
    (18, 32), (18, 33),
    (19, 33),
    (20, 32), (20, 33),
    (22, 32), (22, 33),
    (23, 25), (23, 27), (23, 29), (23, 32), (23, 33),
    (24, 25), (24, 27), (24, 31),
    (25, 31),
    (26, 29), (26, 33),
    (27, 33),
    (28, 31), (28, 33),
    (29, 32), (29, 33),
    (30, 32), (30, 33),
    (31, 32), (31, 33),
    (32, 33),
];

/// Labeled reference graph with directed topology
#[derive(Debug, Clone)]
pub struct ReferenceGraph {
    graph: CsrGraph,
    labels: Vec<Club>,
    num_connections: usize,
}

impl ReferenceGraph {
    /// Build a reference graph from labels and undirected connections
    ///
    /// Node ids are the label indices. Each connection is materialized in both
    /// orientations.
    ///
    /// # Errors
    ///
    /// Returns error if a connection references a node without a label
    pub fn new(labels: Vec<Club>, connections: &[(u32, u32)]) -> Result<Self> {
        let graph = CsrGraph::from_undirected(labels.len(), connections)?;

        Ok(Self {
            graph,
            labels,
            num_connections: connections.len(),
        })
    }

    /// The built-in karate club graph
    ///
    /// # Errors
    ///
    /// Never fails for the built-in constants; the `Result` comes from [`Self::new`].
    pub fn karate_club() -> Result<Self> {
        Self::new(KARATE_CLUB_LABELS.to_vec(), &KARATE_CLUB_CONNECTIONS)
    }

    /// Directed topology
    #[must_use]
    pub const fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    /// Number of nodes
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Number of undirected connections before duplication
    #[must_use]
    pub const fn num_connections(&self) -> usize {
        self.num_connections
    }

    /// Club label of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn label(&self, node: NodeId) -> Result<Club> {
        self.labels
            .get(node.0 as usize)
            .copied()
            .ok_or_else(|| anyhow!("Node ID {} out of bounds", node.0))
    }

    /// Iterate `(node, label)` in node order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Club)> + '_ {
        self.graph.nodes().zip(self.labels.iter().copied())
    }

    /// Iterate directed edges in CSR order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph.edges()
    }
}
