//! CSR (Compressed Sparse Row) topology for the reference graph
//!
//! The dataset only needs topology (labels and weights live in the tables), so
//! this CSR carries offsets and column indices without an edge payload.
//!
//! # CSR Format
//!
//! ```text
//! Undirected: {0, 1}, {0, 2}
//! Directed:   0 → 1, 0 → 2, 1 → 0, 2 → 0
//!
//! CSR:
//!   row_offsets: [0, 2, 3, 4]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..4)
//!   col_indices: [1, 2, 0, 0]
//! ```

use anyhow::{anyhow, Result};

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Directed CSR graph with a fixed node count
///
/// Rows keep neighbors in insertion order, so iterating edges yields them
/// grouped by source node in node order.
///
/// # Example
///
/// ```
/// use karate_dataset::{CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_undirected(3, &[(0, 1), (0, 2)]).unwrap();
/// assert_eq!(graph.num_edges(), 4);
/// assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[1, 2]);
/// assert_eq!(graph.outgoing_neighbors(NodeId(2)).unwrap(), &[0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    /// node i's edges start at `row_offsets`[i]
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u32>,

    /// Edge targets
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    num_nodes: usize,
}

impl CsrGraph {
    /// Create graph with `num_nodes` isolated nodes
    #[must_use]
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            row_offsets: vec![0; num_nodes + 1],
            col_indices: Vec::new(),
            num_nodes,
        }
    }

    /// Create graph from a directed edge list
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is not below `num_nodes`
    pub fn from_edge_list(num_nodes: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut adj_list: Vec<Vec<u32>> = vec![Vec::new(); num_nodes];

        for &(src, dst) in edges {
            for endpoint in [src, dst] {
                if endpoint.0 as usize >= num_nodes {
                    return Err(anyhow!(
                        "Edge {} → {} references node {} outside graph of {num_nodes} nodes",
                        src.0,
                        dst.0,
                        endpoint.0
                    ));
                }
            }
            adj_list[src.0 as usize].push(dst.0);
        }

        let mut row_offsets = Vec::with_capacity(num_nodes + 1);
        let mut col_indices = Vec::with_capacity(edges.len());

        let mut offset = 0_u32;
        row_offsets.push(offset);

        for neighbors in adj_list {
            #[allow(clippy::cast_possible_truncation)] // Graphs >4B edges not supported
            let len_u32 = neighbors.len() as u32;
            offset += len_u32;
            row_offsets.push(offset);
            col_indices.extend(neighbors);
        }

        Ok(Self {
            row_offsets,
            col_indices,
            num_nodes,
        })
    }

    /// Create directed graph from undirected connections
    ///
    /// Every connection `{u, v}` becomes both `u → v` and `v → u`, so the
    /// result has exactly twice as many edges as `connections`.
    ///
    /// # Errors
    ///
    /// Returns error if an endpoint is not below `num_nodes`
    pub fn from_undirected(num_nodes: usize, connections: &[(u32, u32)]) -> Result<Self> {
        let directed: Vec<(NodeId, NodeId)> = connections
            .iter()
            .flat_map(|&(u, v)| [(NodeId(u), NodeId(v)), (NodeId(v), NodeId(u))])
            .collect();

        Self::from_edge_list(num_nodes, &directed)
    }

    /// Get outgoing neighbors of a node
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if (node.0 as usize) >= self.num_nodes {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        let idx = node.0 as usize;
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        Ok(&self.col_indices[start..end])
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of directed edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Iterate node IDs in order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        #[allow(clippy::cast_possible_truncation)] // Graphs >4B nodes not supported
        (0..self.num_nodes).map(|id| NodeId(id as u32))
    }

    /// Iterate directed edges `(source, target)` grouped by source node
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.row_offsets
            .windows(2)
            .enumerate()
            .flat_map(move |(src, bounds)| {
                let targets = &self.col_indices[bounds[0] as usize..bounds[1] as usize];
                #[allow(clippy::cast_possible_truncation)]
                let src = NodeId(src as u32);
                targets.iter().map(move |&dst| (src, NodeId(dst)))
            })
    }

    /// Get CSR components (row offsets, column indices)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32]) {
        (&self.row_offsets, &self.col_indices)
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::with_nodes(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();
        assert_eq!(graph.num_nodes(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_isolated_nodes() {
        let graph = CsrGraph::with_nodes(3);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(
            graph.nodes().collect::<Vec<_>>(),
            vec![NodeId(0), NodeId(1), NodeId(2)]
        );

        let empty: &[u32] = &[];
        assert_eq!(graph.outgoing_neighbors(NodeId(2)).unwrap(), empty);
    }

    #[test]
    fn test_from_edge_list_simple() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(1), NodeId(2)),
        ];

        let graph = CsrGraph::from_edge_list(3, &edges).unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);

        // Check CSR structure
        assert_eq!(graph.row_offsets, vec![0, 2, 3, 3]);
        assert_eq!(graph.col_indices, vec![1, 2, 2]);
    }

    #[test]
    fn test_from_edge_list_out_of_bounds() {
        let edges = vec![(NodeId(0), NodeId(5))];
        let err = CsrGraph::from_edge_list(3, &edges).unwrap_err();
        assert!(err.to_string().contains("node 5"));
    }

    #[test]
    fn test_from_undirected_duplicates_both_orientations() {
        let graph = CsrGraph::from_undirected(3, &[(0, 1), (1, 2)]).unwrap();

        assert_eq!(graph.num_edges(), 4);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![
                (NodeId(0), NodeId(1)),
                (NodeId(1), NodeId(0)),
                (NodeId(1), NodeId(2)),
                (NodeId(2), NodeId(1)),
            ]
        );
    }

    #[test]
    fn test_neighbors_keep_insertion_order() {
        let connections = [(0, 3), (0, 1), (2, 3)];
        let graph = CsrGraph::from_undirected(4, &connections).unwrap();

        assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[3, 1]);
        assert_eq!(graph.outgoing_neighbors(NodeId(3)).unwrap(), &[0, 2]);
    }

    #[test]
    fn test_outgoing_neighbors_out_of_bounds() {
        let graph = CsrGraph::with_nodes(2);
        assert!(graph.outgoing_neighbors(NodeId(2)).is_err());
    }

    #[test]
    fn test_csr_components() {
        let graph = CsrGraph::from_undirected(3, &[(0, 1)]).unwrap();
        let (row_offsets, col_indices) = graph.csr_components();

        assert_eq!(row_offsets, &[0, 1, 2, 2]);
        assert_eq!(col_indices, &[1, 0]);
    }
}
