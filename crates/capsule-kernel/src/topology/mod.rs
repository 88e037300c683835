//! Vertex indexing shared by generation and outline drawing.
//!
//! Vertices are laid out as `[poles..., ring 0, ring 1, ...]` with rings
//! ordered bottom to top and each ring holding `sides` vertices. Anything
//! that reads a position array produced by a [`crate::VertexGenerator`] must
//! go through the [`TopologyLayout`] returned with it.

pub mod layout;

pub use layout::{CapsuleTopology, TopologyLayout};
