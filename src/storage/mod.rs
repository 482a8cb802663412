//! Graph storage layer
//!
//! CSR topology for the reference graph, plus CSV and Parquet persistence of
//! the generated tables.

pub mod csr;
pub mod csv;
#[cfg(feature = "storage")]
pub mod parquet;

pub use csr::{CsrGraph, NodeId};
