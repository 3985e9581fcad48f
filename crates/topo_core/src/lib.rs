//! The `topo_core` crate is the geometry engine behind the surface explorer.
//! It embeds a small neighborhood of a viewpoint on a curved, possibly
//! non-orientable surface into R³, one frame at a time.
//!
//! Key components:
//! - **Surfaces**: registry of torus, Möbius strips, Klein bottle and projective plane.
//! - **Metric**: metric tensors, orthonormal tangent frames and Gaussian curvature.
//! - **Wrap**: periodic identifications, seam unwrapping and wrap-aware distances.
//! - **Embedding**: tangent-plane projection bent onto the osculating paraboloid.
//! - **Player / Explorer**: seam crossings, orientation tracking and the cached mesh.

pub mod embedding;
pub mod error;
pub mod explorer;
pub mod metric;
pub mod player;
pub mod settings;
pub mod surfaces;
pub mod traits;
pub mod triangulation;
pub mod types;
pub mod wrap;

pub use error::TopologyError;
pub use explorer::{Diagnostics, Explorer};
pub use settings::ExplorerSettings;
pub use surfaces::{Surface, SurfaceKind};
