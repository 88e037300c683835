pub mod generator;
pub mod geometry;
pub mod topology;

// Re-export the pieces every caller needs at crate root for convenience.
pub use generator::{CapsuleVertexGenerator, GeneratorConfig, VertexGenerator};
pub use geometry::{Point3d, Vec3};
pub use topology::{CapsuleTopology, TopologyLayout};
