//! Core value types for the surface geometry engine.
//!
//! Everything here is plain data: tensors, bases, triangles and the flat
//! render buffers handed to the external renderer.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A point (or offset) in UV parameter space.
pub type Uv = Vector2<f64>;

/// Symmetric 2x2 metric tensor `[[g11, g12], [g12, g22]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricTensor {
    pub g11: f64,
    pub g12: f64,
    pub g22: f64,
}

impl MetricTensor {
    pub const IDENTITY: MetricTensor = MetricTensor {
        g11: 1.0,
        g12: 0.0,
        g22: 1.0,
    };

    pub fn new(g11: f64, g12: f64, g22: f64) -> Self {
        Self { g11, g12, g22 }
    }

    /// Inner product of two parameter-space vectors under this metric.
    pub fn inner(&self, a: &Uv, b: &Uv) -> f64 {
        self.g11 * a.x * b.x + self.g12 * (a.x * b.y + a.y * b.x) + self.g22 * a.y * b.y
    }

    /// Induced squared norm `g11·x² + 2·g12·x·y + g22·y²`.
    pub fn norm_squared(&self, w: &Uv) -> f64 {
        self.g11 * w.x * w.x + 2.0 * self.g12 * w.x * w.y + self.g22 * w.y * w.y
    }

    pub fn is_finite(&self) -> bool {
        self.g11.is_finite() && self.g12.is_finite() && self.g22.is_finite()
    }
}

/// Pair of parameter-space vectors orthonormal under the metric at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentBasis {
    pub e1: Uv,
    pub e2: Uv,
}

impl TangentBasis {
    pub fn identity() -> Self {
        Self {
            e1: Uv::new(1.0, 0.0),
            e2: Uv::new(0.0, 1.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.e1.iter().chain(self.e2.iter()).all(|c| c.is_finite())
    }
}

/// A triangle of the UV-space triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Uv; 3],
}

impl Triangle {
    pub fn new(v0: Uv, v1: Uv, v2: Uv) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    pub fn centroid(&self) -> Uv {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }
}

/// Named reference point drawn on top of the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub position: Uv,
    pub label: String,
    pub color: [f32; 3],
}

impl Landmark {
    pub fn new(u: f64, v: f64, label: &str, color: [f32; 3]) -> Self {
        Self {
            position: Uv::new(u, v),
            label: label.to_string(),
            color,
        }
    }
}

/// A landmark that falls inside the view radius, placed in local 3D space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleLandmark {
    pub position: Vector3<f64>,
    pub label: String,
    pub color: [f32; 3],
}

/// Chirality of the viewpoint. Crossing a flipping seam toggles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Direct,
    Reversed,
}

impl Orientation {
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Direct => 1,
            Orientation::Reversed => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Direct => Orientation::Reversed,
            Orientation::Reversed => Orientation::Direct,
        }
    }

    pub fn is_reversed(self) -> bool {
        self == Orientation::Reversed
    }
}

/// Outcome of a geometry query that never fails outright.
///
/// `Fallback` carries the safe default that was substituted because the
/// computed value was degenerate or non-finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<T> {
    Exact(T),
    Fallback(T),
}

impl<T> Resolved<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolved::Exact(v) | Resolved::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Resolved::Exact(v) | Resolved::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolved<U> {
        match self {
            Resolved::Exact(v) => Resolved::Exact(f(v)),
            Resolved::Fallback(v) => Resolved::Fallback(f(v)),
        }
    }
}

/// Flat-shaded local mesh, laid out for direct upload to vertex buffers.
///
/// `positions` and `normals` hold 3 floats per vertex, `indices` 3 per triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl LocalMesh {
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 9),
            normals: Vec::with_capacity(triangles * 9),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn position(&self, vertex: usize) -> [f32; 3] {
        let start = vertex * 3;
        [
            self.positions[start],
            self.positions[start + 1],
            self.positions[start + 2],
        ]
    }

    pub fn normal(&self, vertex: usize) -> [f32; 3] {
        let start = vertex * 3;
        [
            self.normals[start],
            self.normals[start + 1],
            self.normals[start + 2],
        ]
    }

    pub(crate) fn push_triangle(&mut self, corners: [Vector3<f64>; 3], normal: Vector3<f64>) {
        let base = self.vertex_count() as u32;
        for corner in corners.iter() {
            self.positions
                .extend_from_slice(&[corner.x as f32, corner.y as f32, corner.z as f32]);
            self.normals
                .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_norm_matches_inner_product() {
        let g = MetricTensor::new(2.0, 0.5, 3.0);
        let w = Uv::new(0.3, -1.2);
        assert!((g.norm_squared(&w) - g.inner(&w, &w)).abs() < 1e-12);
    }

    #[test]
    fn orientation_flips_back_and_forth() {
        let o = Orientation::Direct;
        assert_eq!(o.sign(), 1);
        assert_eq!(o.flipped().sign(), -1);
        assert_eq!(o.flipped().flipped(), o);
        assert!(o.flipped().is_reversed());
    }

    #[test]
    fn resolved_reports_fallback() {
        let exact = Resolved::Exact(1.0);
        let fallback = Resolved::Fallback(0.0);
        assert!(!exact.is_fallback());
        assert!(fallback.is_fallback());
        assert_eq!(fallback.map(|v: f64| v + 1.0).into_inner(), 1.0);
    }

    #[test]
    fn push_triangle_appends_sequential_indices() {
        let mut mesh = LocalMesh::with_capacity(2);
        let corners = [Vector3::zeros(), Vector3::x(), Vector3::y()];
        mesh.push_triangle(corners, Vector3::z());
        mesh.push_triangle(corners, Vector3::z());
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
        assert_eq!(mesh.normal(5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn orientation_serializes_lowercase() {
        let text = serde_json::to_string(&Orientation::Reversed).expect("serialize");
        assert_eq!(text, "\"reversed\"");
    }
}
