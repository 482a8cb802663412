//! Karate club dataset: reference graph, synthetic attributes, and tables

pub mod attributes;
pub mod generator;
pub mod reference;
pub mod tables;

pub use attributes::{AttributeSampler, AGE_MAX, AGE_MIN, AGE_RANGE, WEIGHT_RANGE};
pub use generator::{run, Dataset, GeneratorConfig, IntegrityError};
pub use reference::{Club, ReferenceGraph, KARATE_CLUB_CONNECTIONS, KARATE_CLUB_LABELS};
pub use tables::{EdgeRecord, EdgeTable, NodeRecord, NodeTable};
